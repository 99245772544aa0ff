//! Bin-range reading.
//!
//! A [`TrackReader`] is bound to one track and one bin width. Given a
//! [`GenomicLocation`] it converts the 1-based interval into zero-based bin
//! indices, fetches the run-length segments that intersect those bins and
//! decodes them into a dense count array:
//!
//! ```text
//! start_bin = (start - 1) / bin_width
//! end_bin   = (end - 1) / bin_width
//! result    = [0; end_bin - start_bin + 1], filled from segments
//! first bin = start_bin * bin_width + 1
//! ```
//!
//! Storage is proportional to the number of distinct-count runs, and decoding
//! cost to the number of runs intersecting the window.
//!
//! [`TrackReader`]: aggregator::TrackReader
//! [`GenomicLocation`]: crate::core::location::GenomicLocation

pub mod aggregator;
pub mod decode;
