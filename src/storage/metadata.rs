use rusqlite::OptionalExtension;
use std::path::{Path, PathBuf};

use crate::core::error::TrackError;
use crate::core::types::StatMode;
use crate::storage::{open_read_only, to_unsigned, METADATA_FILE};

const METADATA_SQL: &str = "SELECT public_id, name, reads, stat_mode FROM track LIMIT 1";

/// The single record stored in a sample's metadata database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub public_id: String,
    pub name: String,
    pub reads: u64,
    pub stat_mode: StatMode,
}

/// Per-sample metadata database (`track.db` inside the sample directory)
#[derive(Debug, Clone)]
pub struct TrackMetadataStore {
    path: PathBuf,
}

impl TrackMetadataStore {
    /// Locate the metadata store inside a sample directory
    #[must_use]
    pub fn in_dir(sample_dir: &Path) -> Self {
        Self {
            path: sample_dir.join(METADATA_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the store and read its one record.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::Open` if the database is missing or unreadable and
    /// `TrackError::Schema` if the table is absent, empty, or has the wrong
    /// column types.
    pub fn read(&self) -> Result<TrackMetadata, TrackError> {
        let conn = open_read_only(&self.path)?;

        let row = conn
            .query_row(METADATA_SQL, [], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .optional()
            .map_err(|e| TrackError::from_query(&self.path, e))?;

        let Some((public_id, name, reads, stat_mode)) = row else {
            return Err(TrackError::Schema {
                path: self.path.clone(),
                message: "metadata table has no record".to_string(),
            });
        };

        Ok(TrackMetadata {
            public_id,
            name,
            reads: to_unsigned(&self.path, "reads", reads)?,
            stat_mode: StatMode::parse(&stat_mode),
        })
    }
}
