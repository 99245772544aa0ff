//! Track discovery and lookup.
//!
//! Tracks live in a directory hierarchy under a storage root:
//!
//! ```text
//! root/
//! ├── tracks-index                   master index (public id -> location)
//! └── {platform}/
//!     └── {genome}/
//!         └── {sample}/
//!             ├── track.db           one metadata record
//!             └── {chr}_bw{bin_width}_{genome}.db
//! ```
//!
//! Two ways of finding a track are provided:
//!
//! - [`TrackCatalog`]: built once by scanning the tree, then read-only. Lists
//!   platforms, genomes and tracks in sorted order.
//! - [`TrackIndexStore`]: resolves a stable public id through the master index.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use track_server::catalog::store::TrackCatalog;
//! use track_server::core::location::GenomicLocation;
//!
//! let catalog = Arc::new(TrackCatalog::build("/data/tracks").unwrap());
//!
//! for platform in catalog.platforms() {
//!     println!("{platform}");
//! }
//!
//! let reader = catalog.reader("ChIP-seq", "hg19", "Sample1", 100).unwrap();
//! let counts = reader.bin_counts(&GenomicLocation::new("chr1", 150, 350)).unwrap();
//! assert_eq!(counts.start, 101);
//! ```
//!
//! [`TrackCatalog`]: store::TrackCatalog
//! [`TrackIndexStore`]: index::TrackIndexStore

pub mod builder;
pub mod hierarchical;
pub mod index;
pub mod store;
