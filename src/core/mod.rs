//! Core data types shared by the catalog, index and readers.
//!
//! - [`Track`], [`TrackInfo`], [`StatMode`]: track identity and metadata
//! - [`RunLengthSegment`]: a stored run of bins sharing one count
//! - [`BinCounts`]: the dense result of a bin-range query
//! - [`GenomicLocation`]: a 1-based inclusive interval on one chromosome
//! - [`TrackError`]: the error type returned by every fallible operation
//!
//! [`Track`]: types::Track
//! [`TrackInfo`]: types::TrackInfo
//! [`StatMode`]: types::StatMode
//! [`RunLengthSegment`]: types::RunLengthSegment
//! [`BinCounts`]: types::BinCounts
//! [`GenomicLocation`]: location::GenomicLocation
//! [`TrackError`]: error::TrackError

pub mod error;
pub mod location;
pub mod types;
