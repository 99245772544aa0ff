use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use crate::core::error::TrackError;
use crate::core::types::{StatMode, Track};
use crate::reader::aggregator::TrackReader;
use crate::storage::{open_read_only, to_unsigned, INDEX_FILE};

const RESOLVE_SQL: &str = "SELECT platform, genome, name, reads, stat_mode, dir
    FROM tracks
    WHERE public_id = ?1";

/// A track located through the master index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedTrack {
    pub track: Track,
    pub public_id: String,
    pub stat_mode: StatMode,
    pub reads: u64,
    /// Sample directory; relative paths are resolved against the storage root
    pub dir: PathBuf,
}

/// Master index mapping public track ids to their storage location.
///
/// Holds one long-lived read-only connection. Lookups from several threads
/// take turns on it through a mutex.
#[derive(Debug)]
pub struct TrackIndexStore {
    root: PathBuf,
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl TrackIndexStore {
    /// Open the index at `root/tracks-index`.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::Open` if the index database cannot be opened.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, TrackError> {
        let root = root.into();
        let path = root.join(INDEX_FILE);
        let conn = open_read_only(&path)?;

        tracing::debug!("Opened track index {}", path.display());

        Ok(Self {
            root,
            path,
            conn: Mutex::new(conn),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a track by its public id.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::NotFound` if the id is not in the index and
    /// `TrackError::Schema` if the row has the wrong shape.
    pub fn resolve(&self, public_id: &str) -> Result<IndexedTrack, TrackError> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached(RESOLVE_SQL)
            .and_then(|mut stmt| {
                stmt.query_row([public_id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                })
                .optional()
            })
            .map_err(|e| TrackError::from_query(&self.path, e))?;
        drop(conn);

        let Some((platform, genome, name, reads, stat_mode, dir)) = row else {
            return Err(TrackError::not_found("track id", public_id));
        };

        let dir = PathBuf::from(dir);
        let dir = if dir.is_absolute() {
            dir
        } else {
            self.root.join(dir)
        };

        Ok(IndexedTrack {
            track: Track::new(platform, genome, name),
            public_id: public_id.to_string(),
            stat_mode: StatMode::parse(&stat_mode),
            reads: to_unsigned(&self.path, "reads", reads)?,
            dir,
        })
    }

    /// Resolve `public_id` and bind a reader to it. Nothing is constructed if
    /// the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`TrackIndexStore::resolve`] and
    /// [`TrackReader::with_dir`].
    pub fn reader_from_track_id(
        &self,
        public_id: &str,
        bin_width: u32,
    ) -> Result<TrackReader, TrackError> {
        let indexed = self.resolve(public_id)?;
        TrackReader::with_dir(indexed.dir, indexed.track, bin_width)
    }
}
