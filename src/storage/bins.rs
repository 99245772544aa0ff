use std::path::{Path, PathBuf};

use crate::core::error::TrackError;
use crate::core::types::RunLengthSegment;
use crate::storage::{open_read_only, to_unsigned};

/// Segments intersecting the closed bin window `[?1, ?2]`. A segment covers
/// `[start_bin, end_bin)`, so it intersects when it ends after the first bin
/// and starts at or before the last.
const SEGMENTS_SQL: &str = "SELECT start_bin, end_bin, reads
    FROM bins
    WHERE end_bin > ?1 AND start_bin <= ?2
    ORDER BY start_bin";

/// One chromosome's run-length encoded counts at one bin width
#[derive(Debug, Clone)]
pub struct ChromosomeBinStore {
    path: PathBuf,
}

impl ChromosomeBinStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetch the segments intersecting bins `[start_bin, end_bin]`, ascending by
    /// start. The connection is opened for this call only and closed on return.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::Open` if the file is missing or unreadable and
    /// `TrackError::Schema` if rows do not have the expected shape.
    pub fn segments(
        &self,
        start_bin: u32,
        end_bin: u32,
    ) -> Result<Vec<RunLengthSegment>, TrackError> {
        let conn = open_read_only(&self.path)?;

        let mut stmt = conn
            .prepare(SEGMENTS_SQL)
            .map_err(|e| TrackError::from_query(&self.path, e))?;

        let rows = stmt
            .query_map((i64::from(start_bin), i64::from(end_bin)), |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })
            .map_err(|e| TrackError::from_query(&self.path, e))?;

        let mut segments = Vec::new();
        for row in rows {
            let (start, end, count) = row.map_err(|e| TrackError::from_query(&self.path, e))?;
            segments.push(RunLengthSegment::new(
                to_unsigned(&self.path, "start_bin", start)?,
                to_unsigned(&self.path, "end_bin", end)?,
                to_unsigned(&self.path, "reads", count)?,
            ));
        }

        tracing::debug!(
            "{} segments in bins [{}, {}] of {}",
            segments.len(),
            start_bin,
            end_bin,
            self.path.display()
        );

        Ok(segments)
    }
}
