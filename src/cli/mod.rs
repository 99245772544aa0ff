//! Command-line interface for track-server.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **tracks**: List platforms, genomes and tracks, or resolve a public id
//! - **bins**: Print binned counts for a genomic location
//! - **serve**: Serve the catalog and bin queries over HTTP
//!
//! ## Usage
//!
//! ```text
//! # List platforms under a storage root
//! track-server tracks --root /data/tracks platforms
//!
//! # Every track as JSON
//! TRACKS_ROOT=/data/tracks track-server --format json tracks all
//!
//! # Counts in 100 bp bins
//! track-server bins --root /data/tracks --track ChIP-seq/hg19/Sample1 \
//!     --location chr1:100000-200000 --bin-width 100
//!
//! # Start the HTTP server
//! track-server serve --root /data/tracks --port 8080
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod bins;
pub mod tracks;

#[derive(Parser)]
#[command(name = "track-server")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Serve binned genomic read-count tracks")]
#[command(
    long_about = "track-server reads binned read-count tracks stored as a directory tree of SQLite databases.\n\nIt provides:\n- Sorted listings of platforms, genomes and tracks\n- Public id lookup through the master index\n- Dense per-bin counts for any genomic location"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalogued tracks or resolve a public id
    Tracks(tracks::TracksArgs),

    /// Print binned counts for a location
    Bins(bins::BinsArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Storage root containing platform directories and tracks-index
    #[arg(long, env = "TRACKS_ROOT")]
    pub root: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
