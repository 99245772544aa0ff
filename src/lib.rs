//! # track-server
//!
//! A library for serving binned genomic read-count tracks.
//!
//! Tracks are per-sample read-count histograms stored as a directory tree of
//! SQLite databases: one metadata database per sample and one run-length
//! encoded database per chromosome and bin width. `track-server` scans the
//! tree once into an immutable catalog and decodes bin ranges on request.
//!
//! ## Features
//!
//! - **Deterministic discovery**: platforms, genomes and tracks always list in sorted order
//! - **Public id lookup**: resolve stable ids through the master index
//! - **Run-length decoding**: cost proportional to the runs in the window, not its width
//! - **Explicit errors**: missing data, malformed rows and out-of-order segments are reported, never guessed around
//!
//! ## Example
//!
//! ```rust,no_run
//! use track_server::{GenomicLocation, TrackCatalog, TrackIndexStore};
//!
//! // Scan the storage root once
//! let catalog = TrackCatalog::build("/data/tracks").unwrap();
//!
//! // Bind a reader by name and read 100 bp bins
//! let reader = catalog.reader("ChIP-seq", "hg19", "Sample1", 100).unwrap();
//! let counts = reader.bin_counts(&GenomicLocation::new("chr1", 150, 350)).unwrap();
//! println!("{} bins starting at {}", counts.bins.len(), counts.start);
//!
//! // Or by public id through the master index
//! let index = TrackIndexStore::open("/data/tracks").unwrap();
//! let reader = index.reader_from_track_id("a1b2c3", 100).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Directory scan, discovery snapshot and master index
//! - [`core`]: Track, location, result and error types
//! - [`reader`]: Bin-range reading and run-length decoding
//! - [`storage`]: Read-only access to the SQLite storage units
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP server

pub mod catalog;
pub mod cli;
pub mod core;
pub mod reader;
pub mod storage;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::index::TrackIndexStore;
pub use catalog::store::TrackCatalog;
pub use core::error::TrackError;
pub use core::location::GenomicLocation;
pub use core::types::*;
pub use reader::aggregator::TrackReader;
