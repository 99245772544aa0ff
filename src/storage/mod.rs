//! SQLite storage units backing the catalog and readers.
//!
//! Every unit is opened read-only; nothing in this crate writes to the
//! storage tree.
//!
//! - [`metadata`]: the per-sample `track.db` holding one metadata record
//! - [`bins`]: the per-chromosome run-length segment files

use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::core::error::TrackError;

pub mod bins;
pub mod metadata;

/// Name of the per-sample metadata database inside a sample directory
pub const METADATA_FILE: &str = "track.db";

/// Name of the master index database at the storage root
pub const INDEX_FILE: &str = "tracks-index";

/// Open an existing SQLite database read-only. A missing file is an error
/// rather than an empty new database.
pub(crate) fn open_read_only(path: &Path) -> Result<Connection, TrackError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Connection::open_with_flags(path, flags).map_err(|source| TrackError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert a stored integer column into an unsigned Rust integer, reporting
/// negative or oversized values as schema errors.
pub(crate) fn to_unsigned<T: TryFrom<i64>>(
    path: &Path,
    column: &str,
    value: i64,
) -> Result<T, TrackError> {
    T::try_from(value).map_err(|_| TrackError::Schema {
        path: path.to_path_buf(),
        message: format!("column '{column}' holds out-of-range value {value}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");
        let err = open_read_only(&path).unwrap_err();
        assert!(matches!(err, TrackError::Open { .. }));
        assert!(!path.exists(), "read-only open must not create the file");
    }

    #[test]
    fn test_to_unsigned_rejects_negative() {
        let path = Path::new("x.db");
        assert_eq!(to_unsigned::<u32>(path, "reads", 7).unwrap(), 7);
        let err = to_unsigned::<u32>(path, "reads", -1).unwrap_err();
        assert!(matches!(err, TrackError::Schema { .. }));
        assert!(to_unsigned::<u32>(path, "reads", i64::from(u32::MAX) + 1).is_err());
    }
}
