use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::builder::CatalogBuilder;
use crate::catalog::hierarchical::{AllTracks, TrackGenome, TrackPlatform};
use crate::core::error::TrackError;
use crate::core::types::{Track, TrackInfo};
use crate::reader::aggregator::TrackReader;

type GenomeMap = BTreeMap<String, Vec<TrackInfo>>;

/// Immutable index of every track under a storage root.
///
/// Built once by [`TrackCatalog::build`] and never mutated afterwards; share
/// it between threads with an `Arc` and read it without locking.
#[derive(Debug)]
pub struct TrackCatalog {
    root: PathBuf,

    /// platform -> genome -> tracks ordered by sample name
    platforms: BTreeMap<String, GenomeMap>,

    /// When the scan finished
    built_at: chrono::DateTime<chrono::Utc>,
}

impl TrackCatalog {
    /// Scan `root` and build the catalog.
    ///
    /// # Errors
    ///
    /// See [`CatalogBuilder::build`].
    pub fn build(root: impl Into<PathBuf>) -> Result<Self, TrackError> {
        CatalogBuilder::new(root).build()
    }

    pub(crate) fn from_parts(root: PathBuf, platforms: BTreeMap<String, GenomeMap>) -> Self {
        Self {
            root,
            platforms,
            built_at: chrono::Utc::now(),
        }
    }

    /// Storage root the catalog was built from
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn built_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.built_at
    }

    /// Platform names in lexicographic order
    #[must_use]
    pub fn platforms(&self) -> Vec<&str> {
        self.platforms.keys().map(String::as_str).collect()
    }

    /// Genome names for a platform in lexicographic order
    ///
    /// # Errors
    ///
    /// Returns `TrackError::NotFound` if the platform is unknown.
    pub fn genomes(&self, platform: &str) -> Result<Vec<&str>, TrackError> {
        Ok(self.genome_map(platform)?.keys().map(String::as_str).collect())
    }

    /// Tracks for a platform and genome, ordered by name
    ///
    /// # Errors
    ///
    /// Returns `TrackError::NotFound` if the platform or genome is unknown.
    pub fn tracks(&self, platform: &str, genome: &str) -> Result<&[TrackInfo], TrackError> {
        self.genome_map(platform)?
            .get(genome)
            .map(Vec::as_slice)
            .ok_or_else(|| TrackError::not_found("genome", format!("{platform}/{genome}")))
    }

    /// Look up a single track
    ///
    /// # Errors
    ///
    /// Returns `TrackError::NotFound` if any of the three names is unknown.
    pub fn track(&self, platform: &str, genome: &str, name: &str) -> Result<&TrackInfo, TrackError> {
        self.tracks(platform, genome)?
            .iter()
            .find(|t| t.track.name == name)
            .ok_or_else(|| TrackError::not_found("track", format!("{platform}/{genome}/{name}")))
    }

    /// Snapshot of the whole catalog, assembled from the accessors above
    #[must_use]
    pub fn all_tracks(&self) -> AllTracks {
        let platforms = self
            .platforms()
            .into_iter()
            .map(|platform| TrackPlatform {
                platform: platform.to_string(),
                genomes: self
                    .genomes(platform)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|genome| TrackGenome {
                        genome: genome.to_string(),
                        tracks: self
                            .tracks(platform, genome)
                            .map(<[TrackInfo]>::to_vec)
                            .unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        AllTracks { platforms }
    }

    /// Construct a reader for a catalogued track.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::NotFound` for an unknown track, otherwise the
    /// errors of [`TrackReader::new`].
    pub fn reader(
        &self,
        platform: &str,
        genome: &str,
        name: &str,
        bin_width: u32,
    ) -> Result<TrackReader, TrackError> {
        let info = self.track(platform, genome, name)?;
        TrackReader::new(&self.root, info.track.clone(), bin_width)
    }

    /// Whether `track` is catalogued
    #[must_use]
    pub fn contains(&self, track: &Track) -> bool {
        self.track(&track.platform, &track.genome, &track.name).is_ok()
    }

    /// Number of tracks in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.platforms
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Check if the catalog has no tracks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn genome_map(&self, platform: &str) -> Result<&GenomeMap, TrackError> {
        self.platforms
            .get(platform)
            .ok_or_else(|| TrackError::not_found("platform", platform))
    }
}
