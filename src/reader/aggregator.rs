use std::path::{Path, PathBuf};

use crate::core::error::TrackError;
use crate::core::location::GenomicLocation;
use crate::core::types::{BinCounts, StatMode, Track};
use crate::reader::decode::{bin_window, decode_segments};
use crate::storage::bins::ChromosomeBinStore;
use crate::storage::metadata::TrackMetadataStore;
use crate::utils::validation::{check_bin_limit, validate_path_component};

/// Reads binned counts for one track at one bin width.
///
/// Construction reads the track's metadata once; every [`bin_counts`] call
/// opens its own connection to the chromosome file and closes it before
/// returning, so a reader holds no open handles between queries.
///
/// [`bin_counts`]: TrackReader::bin_counts
#[derive(Debug, Clone)]
pub struct TrackReader {
    track: Track,
    dir: PathBuf,
    bin_width: u32,
    reads: u64,
    stat_mode: StatMode,
}

impl TrackReader {
    /// Bind a reader to the sample directory `root/platform/genome/name`.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::InvalidBinWidth` for a zero bin width, and the
    /// metadata store's `Open`/`Schema` errors if it cannot be read.
    pub fn new(root: &Path, track: Track, bin_width: u32) -> Result<Self, TrackError> {
        let dir = root
            .join(&track.platform)
            .join(&track.genome)
            .join(&track.name);
        Self::with_dir(dir, track, bin_width)
    }

    /// Bind a reader to an explicit sample directory, as recorded in the
    /// master index.
    ///
    /// # Errors
    ///
    /// As [`TrackReader::new`].
    pub fn with_dir(dir: PathBuf, track: Track, bin_width: u32) -> Result<Self, TrackError> {
        if bin_width == 0 {
            return Err(TrackError::InvalidBinWidth);
        }

        let metadata = TrackMetadataStore::in_dir(&dir).read()?;

        tracing::debug!(
            "Opened {} at bin width {} ({} reads, {})",
            track,
            bin_width,
            metadata.reads,
            metadata.stat_mode
        );

        Ok(Self {
            track,
            dir,
            bin_width,
            reads: metadata.reads,
            stat_mode: metadata.stat_mode,
        })
    }

    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn bin_width(&self) -> u32 {
        self.bin_width
    }

    #[must_use]
    pub fn reads(&self) -> u64 {
        self.reads
    }

    #[must_use]
    pub fn stat_mode(&self) -> &StatMode {
        &self.stat_mode
    }

    /// Path of the chromosome file holding `location`'s bins at this reader's
    /// bin width: `{chr}_bw{bin_width}_{genome}.db`, chromosome lower-cased.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::InvalidLocation` if the chromosome name is not a
    /// single safe file name component.
    pub fn chromosome_path(&self, location: &GenomicLocation) -> Result<PathBuf, TrackError> {
        let chr = validate_path_component(&location.chr)
            .map_err(|e| TrackError::InvalidLocation(format!("{location}: {e}")))?;

        Ok(self.dir.join(format!(
            "{}_bw{}_{}.db",
            chr.to_lowercase(),
            self.bin_width,
            self.track.genome
        )))
    }

    /// Dense per-bin counts for `location`.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::InvalidLocation` if `location` starts at 0, ends
    /// before it starts or spans more than
    /// [`MAX_QUERY_BINS`](crate::utils::validation::MAX_QUERY_BINS) bins.
    /// Returns `TrackError::Open` if the chromosome file is missing,
    /// `TrackError::Schema` for malformed rows, and the decoding errors of
    /// [`decode_segments`] if stored segments are out of order.
    pub fn bin_counts(&self, location: &GenomicLocation) -> Result<BinCounts, TrackError> {
        if location.start == 0 || location.end < location.start {
            return Err(TrackError::InvalidLocation(format!(
                "{location}: start must be at least 1 and not after end"
            )));
        }
        check_bin_limit(location, self.bin_width)
            .map_err(|e| TrackError::InvalidLocation(format!("{location}: {e}")))?;

        let path = self.chromosome_path(location)?;
        let (start_bin, end_bin) = bin_window(location.start, location.end, self.bin_width);

        let segments = ChromosomeBinStore::new(path).segments(start_bin, end_bin)?;
        let bins = decode_segments(start_bin, end_bin, &segments)?;

        Ok(BinCounts {
            track: self.track.clone(),
            location: location.clone(),
            bins,
            start: start_bin.saturating_mul(self.bin_width).saturating_add(1),
            bin_width: self.bin_width,
            reads: self.reads,
            stat_mode: self.stat_mode.clone(),
        })
    }
}
