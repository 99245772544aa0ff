use std::path::PathBuf;

use clap::Args;

use crate::catalog::index::TrackIndexStore;
use crate::catalog::store::TrackCatalog;
use crate::cli::OutputFormat;
use crate::core::location::GenomicLocation;
use crate::reader::aggregator::TrackReader;
use crate::utils::validation::check_bin_limit;

#[derive(Args)]
pub struct BinsArgs {
    /// Storage root containing platform directories and tracks-index
    #[arg(long, env = "TRACKS_ROOT")]
    pub root: PathBuf,

    /// Public track id, resolved through the master index
    #[arg(long, conflicts_with = "track", required_unless_present = "track")]
    pub id: Option<String>,

    /// Track as platform/genome/name, resolved through the catalog
    #[arg(long)]
    pub track: Option<String>,

    /// Genomic location (e.g., chr1:100000-200000)
    #[arg(short, long, required = true)]
    pub location: GenomicLocation,

    /// Bin width in bases
    #[arg(short, long, default_value = "100")]
    pub bin_width: u32,
}

pub fn run(args: BinsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    check_bin_limit(&args.location, args.bin_width)?;

    let reader = open_reader(&args)?;

    if verbose {
        eprintln!(
            "Reading {} at bin width {} from {}",
            reader.track(),
            reader.bin_width(),
            reader.dir().display()
        );
    }

    let counts = reader.bin_counts(&args.location)?;

    match format {
        OutputFormat::Text => {
            println!("Track:     {}", counts.track);
            println!("Location:  {}", counts.location);
            println!("Bin width: {}", counts.bin_width);
            println!("Reads:     {} ({})", counts.reads, counts.stat_mode);
            println!("Bins:      {}\n", counts.bins.len());
            for (i, count) in counts.bins.iter().enumerate() {
                let bin_start = u64::from(counts.start) + i as u64 * u64::from(counts.bin_width);
                println!("{bin_start:>12} {count:>8}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&counts)?),
        OutputFormat::Tsv => {
            println!("chr\tstart\tend\tcount");
            for (i, count) in counts.bins.iter().enumerate() {
                let bin_start = u64::from(counts.start) + i as u64 * u64::from(counts.bin_width);
                let bin_end = bin_start + u64::from(counts.bin_width) - 1;
                println!("{}\t{bin_start}\t{bin_end}\t{count}", counts.location.chr);
            }
        }
    }

    Ok(())
}

fn open_reader(args: &BinsArgs) -> anyhow::Result<TrackReader> {
    if let Some(id) = &args.id {
        let index = TrackIndexStore::open(&args.root)?;
        return Ok(index.reader_from_track_id(id, args.bin_width)?);
    }

    let track = args
        .track
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Either --id or --track is required"))?;
    let parts: Vec<&str> = track.split('/').collect();
    let [platform, genome, name] = parts.as_slice() else {
        anyhow::bail!("Track must be given as platform/genome/name, got '{track}'");
    };

    let catalog = TrackCatalog::build(&args.root)?;
    Ok(catalog.reader(platform, genome, name, args.bin_width)?)
}
