use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::TrackError;

/// A genomic interval with 1-based inclusive coordinates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomicLocation {
    pub chr: String,
    pub start: u32,
    pub end: u32,
}

impl GenomicLocation {
    pub fn new(chr: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            chr: chr.into(),
            start,
            end,
        }
    }

    /// Number of bases spanned by the interval
    #[must_use]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl std::fmt::Display for GenomicLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}

/// Parses `chr:start-end`. Thousands separators (`,` and `_`) are accepted in
/// the coordinates.
impl FromStr for GenomicLocation {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackError::InvalidLocation(s.to_string());

        let (chr, range) = s.trim().rsplit_once(':').ok_or_else(invalid)?;
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;

        let parse = |v: &str| -> Result<u32, TrackError> {
            v.replace([',', '_'], "").parse::<u32>().map_err(|_| invalid())
        };

        let start = parse(start)?;
        let end = parse(end)?;

        if chr.is_empty() || start == 0 || end < start {
            return Err(invalid());
        }

        Ok(Self::new(chr, start, end))
    }
}
