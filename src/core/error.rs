use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Unexpected data in {}: {message}", path.display())]
    Schema { path: PathBuf, message: String },

    #[error("Failed to list {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bin width must be greater than zero")]
    InvalidBinWidth,

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Segment [{seg_start}, {seg_end}) does not intersect bins [{start_bin}, {end_bin}]")]
    SegmentOutOfWindow {
        seg_start: u32,
        seg_end: u32,
        start_bin: u32,
        end_bin: u32,
    },

    #[error("Segment [{seg_start}, {seg_end}) overlaps or precedes a previous segment ending at {previous_end}")]
    SegmentOrder {
        seg_start: u32,
        seg_end: u32,
        previous_end: u32,
    },
}

impl TrackError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Classify a rusqlite error raised while reading rows from `path`. Type
    /// and column errors mean the store exists but holds the wrong shape.
    pub(crate) fn from_query(path: impl Into<PathBuf>, err: rusqlite::Error) -> Self {
        let path = path.into();
        match err {
            rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::InvalidColumnIndex(_)
            | rusqlite::Error::InvalidColumnName(_)
            | rusqlite::Error::IntegralValueOutOfRange(..)
            | rusqlite::Error::FromSqlConversionFailure(..) => Self::Schema {
                path,
                message: err.to_string(),
            },
            rusqlite::Error::SqliteFailure(_, Some(ref msg))
                if msg.starts_with("no such table") || msg.starts_with("no such column") =>
            {
                Self::Schema {
                    path,
                    message: msg.clone(),
                }
            }
            source => Self::Open { path, source },
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Errors caused by the caller's input rather than by the stored data
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidBinWidth | Self::InvalidLocation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = TrackError::not_found("platform", "RNA-seq");
        assert_eq!(err.to_string(), "platform 'RNA-seq' not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_query_classifies_type_errors_as_schema() {
        let err = TrackError::from_query(
            "x.db",
            rusqlite::Error::InvalidColumnType(0, "reads".into(), rusqlite::types::Type::Text),
        );
        assert!(matches!(err, TrackError::Schema { .. }));

        let err = TrackError::from_query("x.db", rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, TrackError::Open { .. }));
    }
}
