use serde::{Deserialize, Serialize};

use crate::core::location::GenomicLocation;

/// Identity of a track: the platform it belongs to, the genome assembly it
/// was aligned against, and its sample name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Track {
    pub platform: String,
    pub genome: String,
    pub name: String,
}

impl Track {
    pub fn new(
        platform: impl Into<String>,
        genome: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            genome: genome.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.platform, self.genome, self.name)
    }
}

/// Statistic used to aggregate reads into bins when the track was generated.
///
/// Serialised as the stored string, so `Other` values keep their spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum StatMode {
    Count,
    Mean,
    Max,
    Sum,
    Other(String),
}

impl StatMode {
    /// Parse the value stored in a metadata record. Only the exact lower-case
    /// names map to known modes; anything else is kept verbatim.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "count" => Self::Count,
            "mean" => Self::Mean,
            "max" => Self::Max,
            "sum" => Self::Sum,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl std::fmt::Display for StatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::Mean => write!(f, "mean"),
            Self::Max => write!(f, "max"),
            Self::Sum => write!(f, "sum"),
            Self::Other(mode) => write!(f, "{mode}"),
        }
    }
}

impl From<String> for StatMode {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<StatMode> for String {
    fn from(mode: StatMode) -> Self {
        match mode {
            StatMode::Other(mode) => mode,
            known => known.to_string(),
        }
    }
}

/// A catalogued track with the metadata read from its sample store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    #[serde(flatten)]
    pub track: Track,
    pub public_id: String,
    pub reads: u64,
    pub stat_mode: StatMode,
}

/// A contiguous run of bins sharing one count, covering `[start_bin, end_bin)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLengthSegment {
    pub start_bin: u32,
    pub end_bin: u32,
    pub count: u32,
}

impl RunLengthSegment {
    #[must_use]
    pub fn new(start_bin: u32, end_bin: u32, count: u32) -> Self {
        Self {
            start_bin,
            end_bin,
            count,
        }
    }
}

/// Dense per-bin counts for one genomic window of one track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinCounts {
    pub track: Track,
    pub location: GenomicLocation,
    pub bins: Vec<u32>,
    /// 1-based coordinate of the first returned bin
    pub start: u32,
    pub bin_width: u32,
    /// Total reads in the track, for normalisation
    pub reads: u64,
    pub stat_mode: StatMode,
}

impl BinCounts {
    /// 1-based inclusive coordinate of the last base covered by the returned bins
    #[must_use]
    pub fn end(&self) -> u64 {
        u64::from(self.start) + self.bins.len() as u64 * u64::from(self.bin_width) - 1
    }
}
