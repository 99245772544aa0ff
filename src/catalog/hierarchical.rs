//! Nested discovery tree: `AllTracks` → `TrackPlatform` → `TrackGenome` → `TrackInfo`.
//!
//! This is a detached, serializable copy of the catalog used purely for
//! listing. It is assembled from the catalog's accessors so its ordering is
//! the catalog's ordering.

use serde::{Deserialize, Serialize};

use crate::core::types::TrackInfo;

/// All tracks aligned to one genome on one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackGenome {
    pub genome: String,
    pub tracks: Vec<TrackInfo>,
}

/// All genomes for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPlatform {
    pub platform: String,
    pub genomes: Vec<TrackGenome>,
}

/// Snapshot of every catalogued track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllTracks {
    pub platforms: Vec<TrackPlatform>,
}

impl AllTracks {
    /// Total number of tracks across all platforms and genomes
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.platforms
            .iter()
            .flat_map(|p| &p.genomes)
            .map(|g| g.tracks.len())
            .sum()
    }

    /// Iterate over every track in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &TrackInfo> {
        self.platforms
            .iter()
            .flat_map(|p| &p.genomes)
            .flat_map(|g| &g.tracks)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.track_count() == 0
    }
}
