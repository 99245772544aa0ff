use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::index::TrackIndexStore;
use crate::catalog::store::TrackCatalog;
use crate::cli::OutputFormat;
use crate::core::types::TrackInfo;

#[derive(Args)]
pub struct TracksArgs {
    /// Storage root containing platform directories and tracks-index
    #[arg(long, env = "TRACKS_ROOT")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: TracksCommands,
}

#[derive(Subcommand)]
pub enum TracksCommands {
    /// List platforms
    Platforms,

    /// List genomes for a platform
    Genomes {
        #[arg(required = true)]
        platform: String,
    },

    /// List tracks for a platform and genome
    List {
        #[arg(required = true)]
        platform: String,

        #[arg(required = true)]
        genome: String,
    },

    /// List every track grouped by platform and genome
    All,

    /// Resolve a public track id through the master index
    Resolve {
        #[arg(required = true)]
        id: String,
    },
}

pub fn run(args: TracksArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let root = args.root;
    match args.command {
        TracksCommands::Platforms => {
            let catalog = load_catalog(root, verbose)?;
            print_names(&catalog.platforms(), "platform", format)
        }
        TracksCommands::Genomes { platform } => {
            let catalog = load_catalog(root, verbose)?;
            print_names(&catalog.genomes(&platform)?, "genome", format)
        }
        TracksCommands::List { platform, genome } => {
            let catalog = load_catalog(root, verbose)?;
            print_tracks(catalog.tracks(&platform, &genome)?, format)
        }
        TracksCommands::All => run_all(&load_catalog(root, verbose)?, format),
        TracksCommands::Resolve { id } => run_resolve(root, &id, format),
    }
}

fn load_catalog(root: PathBuf, verbose: bool) -> anyhow::Result<TrackCatalog> {
    let catalog = TrackCatalog::build(root)?;
    if verbose {
        eprintln!("Loaded catalog with {} tracks", catalog.len());
    }
    Ok(catalog)
}

fn print_names(names: &[&str], header: &str, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for name in names {
                println!("{name}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(names)?),
        OutputFormat::Tsv => {
            println!("{header}");
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn print_tracks(tracks: &[TrackInfo], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let name_width = tracks
                .iter()
                .map(|t| t.track.name.len())
                .max()
                .unwrap_or(4)
                .max(4);
            let id_width = tracks
                .iter()
                .map(|t| t.public_id.len())
                .max()
                .unwrap_or(2)
                .max(2);

            println!(
                "{:<name_w$} {:<id_w$} {:>12} {:<6}",
                "Name",
                "ID",
                "Reads",
                "Stat",
                name_w = name_width,
                id_w = id_width
            );
            println!("{}", "-".repeat(name_width + id_width + 12 + 6 + 3));
            for t in tracks {
                println!(
                    "{:<name_w$} {:<id_w$} {:>12} {:<6}",
                    t.track.name,
                    t.public_id,
                    t.reads,
                    t.stat_mode,
                    name_w = name_width,
                    id_w = id_width
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tracks)?),
        OutputFormat::Tsv => {
            print_tsv_header();
            for t in tracks {
                print_tsv_row(t);
            }
        }
    }
    Ok(())
}

fn run_all(catalog: &TrackCatalog, format: OutputFormat) -> anyhow::Result<()> {
    let all = catalog.all_tracks();

    match format {
        OutputFormat::Text => {
            println!("Track Catalog ({} tracks)\n", all.track_count());
            for platform in &all.platforms {
                println!("{}", platform.platform);
                for genome in &platform.genomes {
                    println!("  {} ({} tracks)", genome.genome, genome.tracks.len());
                    for t in &genome.tracks {
                        println!("    └─ {}  [{}]  {} reads", t.track.name, t.public_id, t.reads);
                    }
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&all)?),
        OutputFormat::Tsv => {
            print_tsv_header();
            for t in all.iter() {
                print_tsv_row(t);
            }
        }
    }
    Ok(())
}

fn run_resolve(root: PathBuf, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    let index = TrackIndexStore::open(root)?;
    let indexed = index.resolve(id)?;

    match format {
        OutputFormat::Text => {
            println!("Track:    {}", indexed.track);
            println!("ID:       {}", indexed.public_id);
            println!("Reads:    {}", indexed.reads);
            println!("Stat:     {}", indexed.stat_mode);
            println!("Dir:      {}", indexed.dir.display());
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "platform": indexed.track.platform,
                "genome": indexed.track.genome,
                "name": indexed.track.name,
                "publicId": indexed.public_id,
                "reads": indexed.reads,
                "statMode": indexed.stat_mode,
                "dir": indexed.dir,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("platform\tgenome\tname\tpublic_id\treads\tstat_mode\tdir");
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                indexed.track.platform,
                indexed.track.genome,
                indexed.track.name,
                indexed.public_id,
                indexed.reads,
                indexed.stat_mode,
                indexed.dir.display()
            );
        }
    }
    Ok(())
}

fn print_tsv_header() {
    println!("platform\tgenome\tname\tpublic_id\treads\tstat_mode");
}

fn print_tsv_row(t: &TrackInfo) {
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        t.track.platform, t.track.genome, t.track.name, t.public_id, t.reads, t.stat_mode
    );
}
