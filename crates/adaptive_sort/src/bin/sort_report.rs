//! Sort synthetic datasets and print a JSON report.
//!
//! Run with: cargo run --release --bin sort_report
//!
//! Usage:
//!   sort_report                          All patterns at 100k elements
//!   sort_report -n 1m -p nearly_sorted   One pattern at one million elements
//!   sort_report --min-run 64 --pretty    Custom run length, indented output

use std::error::Error;

use adaptive_sort::harness::{Pattern, run_pattern};
use adaptive_sort::{AdaptiveSort, DEFAULT_GALLOP_THRESHOLD, DEFAULT_MIN_RUN, SortConfig};
use clap::Parser;

fn parse_count(s: &str) -> Result<usize, String> {
    let s = s.to_lowercase();
    let (num_str, multiplier) = if let Some(num) = s.strip_suffix('m') {
        (num, 1_000_000)
    } else if let Some(num) = s.strip_suffix('k') {
        (num, 1_000)
    } else {
        (s.as_str(), 1)
    };

    num_str
        .parse::<f64>()
        .map(|n| (n * multiplier as f64) as usize)
        .map_err(|e| format!("invalid count '{}': {}", s, e))
}

#[derive(Parser, Debug)]
#[command(about = "Measure the adaptive sort across data patterns")]
struct Args {
    /// Elements per dataset (accepts k/m suffixes).
    #[arg(short = 'n', long, default_value = "100k", value_parser = parse_count)]
    size: usize,

    /// Patterns to run; repeat the flag for several. Defaults to all.
    #[arg(short, long = "pattern")]
    patterns: Vec<Pattern>,

    #[arg(long, default_value_t = DEFAULT_MIN_RUN)]
    min_run: usize,

    #[arg(long, default_value_t = DEFAULT_GALLOP_THRESHOLD)]
    gallop_threshold: usize,

    #[arg(long, default_value_t = 0x5EED_2026)]
    seed: u64,

    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let engine = AdaptiveSort::new(SortConfig {
        min_run: args.min_run,
        gallop_threshold: args.gallop_threshold,
    })?;

    let patterns = if args.patterns.is_empty() {
        Pattern::ALL.to_vec()
    } else {
        args.patterns
    };

    let reports: Vec<_> = patterns
        .iter()
        .map(|&pattern| run_pattern(&engine, args.size, pattern, args.seed))
        .collect();

    let json = if args.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    println!("{json}");

    if reports.iter().any(|r| !r.stats.is_sorted || r.stable == Some(false)) {
        return Err("sort verification failed".into());
    }
    Ok(())
}
