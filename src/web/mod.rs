//! HTTP interface over the catalog, index and readers.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! track-server serve --root /data/tracks
//!
//! # Bind to all interfaces
//! track-server serve --root /data/tracks --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/platforms` - Platform names
//! - `GET /api/platforms/{platform}/genomes` - Genome names for a platform
//! - `GET /api/platforms/{platform}/genomes/{genome}/tracks` - Tracks for a genome
//! - `GET /api/tracks` - Every track, nested by platform and genome
//! - `GET /api/bins?id=..&location=..&bin_width=..` - Bin counts by public id
//! - `GET /api/bins/{platform}/{genome}/{name}?location=..&bin_width=..` - Bin counts by name

pub mod server;
