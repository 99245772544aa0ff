//! Catalog builder: a single recursive scan of the storage root.
//!
//! The layout is `root/{platform}/{genome}/{sample}/track.db`. Every level is
//! sorted by name before insertion so the resulting catalog does not depend on
//! the order the filesystem lists entries in. Regular files at any level, such
//! as the master index at the root, are ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::store::TrackCatalog;
use crate::core::error::TrackError;
use crate::core::types::{Track, TrackInfo};
use crate::storage::metadata::TrackMetadataStore;

/// Scans a storage root into a [`TrackCatalog`]
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    root: PathBuf,
}

impl CatalogBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scan the whole hierarchy, reading each sample's metadata once.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::Scan` if any directory cannot be listed, and the
    /// metadata store's `Open`/`Schema` errors if a sample cannot be read.
    /// Nothing is returned on failure; there is no partial catalog.
    pub fn build(self) -> Result<TrackCatalog, TrackError> {
        tracing::debug!("Caching track databases in {}", self.root.display());

        let mut platforms = BTreeMap::new();

        for (platform, platform_dir) in sorted_subdirs(&self.root)? {
            let mut genomes = BTreeMap::new();

            for (genome, genome_dir) in sorted_subdirs(&platform_dir)? {
                let mut tracks = Vec::new();

                for (sample, sample_dir) in sorted_subdirs(&genome_dir)? {
                    tracks.push(read_sample(&platform, &genome, sample, &sample_dir)?);
                }

                tracing::debug!("{}/{}: {} tracks", platform, genome, tracks.len());
                genomes.insert(genome, tracks);
            }

            platforms.insert(platform, genomes);
        }

        let catalog = TrackCatalog::from_parts(self.root, platforms);
        tracing::info!(
            "Cached {} tracks across {} platforms",
            catalog.len(),
            catalog.platforms().len()
        );

        Ok(catalog)
    }
}

fn read_sample(
    platform: &str,
    genome: &str,
    sample: String,
    sample_dir: &Path,
) -> Result<TrackInfo, TrackError> {
    let metadata = TrackMetadataStore::in_dir(sample_dir).read()?;

    if metadata.name != sample {
        tracing::warn!(
            "Sample directory {} records name '{}'; using the directory name",
            sample_dir.display(),
            metadata.name
        );
    }

    Ok(TrackInfo {
        track: Track::new(platform, genome, sample),
        public_id: metadata.public_id,
        reads: metadata.reads,
        stat_mode: metadata.stat_mode,
    })
}

/// Subdirectories of `dir` as `(name, path)` pairs, sorted by name.
/// Entries whose names are not valid UTF-8 are skipped.
fn sorted_subdirs(dir: &Path) -> Result<Vec<(String, PathBuf)>, TrackError> {
    let scan_error = |source| TrackError::Scan {
        path: dir.to_path_buf(),
        source,
    };

    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => subdirs.push((name, path)),
            Err(name) => tracing::warn!("Skipping non UTF-8 directory {:?}", name),
        }
    }

    subdirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(subdirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn write_sample(dir: &Path, public_id: &str, name: &str) {
        std::fs::create_dir_all(dir).unwrap();
        let conn = Connection::open(dir.join("track.db")).unwrap();
        conn.execute_batch(
            "CREATE TABLE track (public_id TEXT, name TEXT, reads INTEGER, stat_mode TEXT);",
        )
        .unwrap();
        conn.execute(
            "INSERT INTO track VALUES (?1, ?2, 100, 'count')",
            (public_id, name),
        )
        .unwrap();
    }

    #[test]
    fn test_sorted_subdirs_skips_files() {
        let root = tempfile::tempdir().unwrap();
        for name in ["b", "a", "c"] {
            std::fs::create_dir(root.path().join(name)).unwrap();
        }
        std::fs::write(root.path().join("tracks-index"), b"").unwrap();

        let names: Vec<_> = sorted_subdirs(root.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_root_is_scan_error() {
        let root = tempfile::tempdir().unwrap();
        let err = CatalogBuilder::new(root.path().join("nope"))
            .build()
            .unwrap_err();
        assert!(matches!(err, TrackError::Scan { .. }));
    }

    #[test]
    fn test_unreadable_sample_fails_build() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("A/g1/s1")).unwrap();
        let err = CatalogBuilder::new(root.path()).build().unwrap_err();
        assert!(matches!(err, TrackError::Open { .. }));
    }

    #[test]
    fn test_directory_name_is_track_name() {
        let root = tempfile::tempdir().unwrap();
        write_sample(&root.path().join("A/g1/s1"), "id-1", "Renamed");

        let catalog = CatalogBuilder::new(root.path()).build().unwrap();
        let tracks = catalog.tracks("A", "g1").unwrap();
        assert_eq!(tracks[0].track.name, "s1");
        assert_eq!(tracks[0].public_id, "id-1");
    }

    #[test]
    fn test_empty_genome_is_kept() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("A/g1")).unwrap();

        let catalog = CatalogBuilder::new(root.path()).build().unwrap();
        assert_eq!(catalog.genomes("A").unwrap(), vec!["g1"]);
        assert!(catalog.tracks("A", "g1").unwrap().is_empty());
    }
}
