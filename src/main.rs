use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stackdist::{DistanceHistogram, ReuseAnalyzer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "stackdist",
    about = "Online reuse-distance analysis for access traces"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the reuse distance of every access in a trace.
    Distances {
        /// Trace file (one key per line, decimal or 0x-prefixed hex).
        trace: PathBuf,
    },
    /// Summarize a trace: distance histogram and LRU hit ratios.
    Profile {
        /// Trace file (one key per line, decimal or 0x-prefixed hex).
        trace: PathBuf,
        /// LRU capacities (in keys) to price; repeatable.
        #[arg(long = "capacity", default_values_t = [16usize, 64, 256, 1024])]
        capacities: Vec<usize>,
        /// Also print the full distance histogram.
        #[arg(long)]
        histogram: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Distances { trace } => run_distances(trace)?,
        Commands::Profile {
            trace,
            capacities,
            histogram,
        } => run_profile(trace, capacities, histogram)?,
    }

    Ok(())
}

fn run_distances(trace_path: PathBuf) -> Result<()> {
    let mut analyzer = ReuseAnalyzer::new();

    for_each_key(&trace_path, |key| {
        let distance = analyzer.record(key)?;
        println!("{distance}");
        Ok(())
    })
}

fn run_profile(trace_path: PathBuf, mut capacities: Vec<usize>, show_histogram: bool) -> Result<()> {
    let mut analyzer = ReuseAnalyzer::new();
    let mut histogram = DistanceHistogram::new();

    for_each_key(&trace_path, |key| {
        histogram.observe(analyzer.record(key)?);
        Ok(())
    })?;

    println!("accesses\t{}", histogram.total());
    println!("distinct keys\t{}", analyzer.tracked_keys());
    println!("cold misses\t{}", histogram.cold());
    if let Some(max) = histogram.max_distance() {
        println!("max distance\t{max}");
    }

    capacities.sort_unstable();
    capacities.dedup();
    for capacity in capacities {
        println!(
            "hit ratio @ {capacity}\t{:.4}",
            histogram.hit_ratio(capacity)
        );
    }

    if show_histogram {
        println!("distance\tcount");
        for (distance, count) in histogram.iter() {
            println!("{distance}\t{count}");
        }
    }

    Ok(())
}

/// Stream keys out of a trace file and feed them to `handle`.
///
/// One key per line, decimal or 0x-prefixed hex; blank lines and `#`
/// comments are skipped.
fn for_each_key(path: &PathBuf, mut handle: impl FnMut(u64) -> Result<()>) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("failed to open trace file {}", path.display()))?;
    let reader = BufReader::new(file);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        let key = parse_key(entry)
            .with_context(|| format!("invalid key '{}' on line {}", entry, line_no + 1))?;
        handle(key)?;
    }

    Ok(())
}

fn parse_key(entry: &str) -> Result<u64, std::num::ParseIntError> {
    if let Some(hex) = entry.strip_prefix("0x").or_else(|| entry.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        entry.parse()
    }
}
