//! A binary to check that both ways of obtaining a UCSC transcript table
//! produce identical exon intervals.
//!
//! ```shell
//! cargo run --release --bin=compare-sources --features=binaries hg38
//! ```
//!
//! It achieves this by carrying out the following:
//!
//! * Downloading the bulk dump of the `refFlat` table and converting it.
//! * Querying the rows of the same table from the UCSC data API and
//!   converting them.
//! * Ensuring that the two interval sequences match exactly, row for row.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use exonbed::interval;
use exonbed::source;
use exonbed::Config;
use exonbed::Reference;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Comparison between sources
////////////////////////////////////////////////////////////////////////////////////////

/// The intervals that only one of the two sources produced.
#[derive(Debug, Default)]
struct Differences<'a> {
    /// Intervals (and how many extra copies) only found via the download.
    download: Vec<(&'a interval::Record, usize)>,

    /// Intervals (and how many extra copies) only found via the query.
    query: Vec<(&'a interval::Record, usize)>,
}

impl<'a> Differences<'a> {
    /// Counts each interval in `download` against `query`.
    fn new(download: &'a [interval::Record], query: &'a [interval::Record]) -> Self {
        let mut counts = BTreeMap::<&interval::Record, isize>::new();

        for record in download {
            *counts.entry(record).or_default() += 1;
        }

        for record in query {
            *counts.entry(record).or_default() -= 1;
        }

        let mut differences = Self::default();

        for (record, count) in counts {
            match count {
                0 => {}
                n if n > 0 => differences.download.push((record, n as usize)),
                n => differences.query.push((record, n.unsigned_abs())),
            }
        }

        differences
    }

    /// Returns whether both sources produced the same intervals.
    fn is_empty(&self) -> bool {
        self.download.is_empty() && self.query.is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Checks that the download and query sources agree.
#[derive(Parser)]
struct Args {
    /// The reference genome to compare (e.g., `hg38`).
    reference: String,

    /// A contact email address sent along with each request.
    #[arg(short, long)]
    email: Option<String>,

    /// If desired, a directory in which the downloaded table is kept. This is
    /// generally for debugging only.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// If desired, the number of differences to explore.
    #[arg(short = 'n', long)]
    explore_mismatches: Option<usize>,

    #[command(flatten)]
    verbose: Verbosity,
}

fn compare(args: &Args) -> Result<()> {
    let reference = match Reference::try_new(&args.reference) {
        Some(reference) => reference,
        None => bail!("invalid reference: {}", args.reference),
    };

    let config = Config::default();
    let email = args.email.as_deref();

    let mut download = source::Download::new(email).context("creating download source")?;
    if let Some(dir) = &args.cache_dir {
        download = download.with_cache_dir(dir);
    }

    info!("download: generating exons");
    let downloaded = exonbed::generate(&download, &reference, &config)
        .context("generating exons from the download")?;

    info!("query: generating exons");
    let query = source::Query::new(email).context("creating query source")?;
    let queried = exonbed::generate(&query, &reference, &config)
        .context("generating exons from the query")?;

    // Both sequences are totally ordered, so equal multisets are equal
    // sequences.
    let differences = Differences::new(&downloaded, &queried);

    if differences.is_empty() {
        println!(
            "download and query matched exactly for {reference} (n = {})",
            downloaded.len()
        );
        return Ok(());
    }

    println!(
        "download (n = {}) and query (n = {}) differ for {reference}: {} intervals only via \
         download, {} intervals only via query",
        downloaded.len(),
        queried.len(),
        differences.download.len(),
        differences.query.len()
    );

    if let Some(n) = args.explore_mismatches {
        for (record, count) in differences.download.iter().take(n) {
            warn!("only via download (x{count}): {record}");
        }

        for (record, count) in differences.query.iter().take(n) {
            warn!("only via query (x{count}): {record}");
        }
    }

    std::process::exit(1);
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    compare(&args)
}
