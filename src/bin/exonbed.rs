//! A binary that writes a BED file of every exon in a UCSC reference.
//!
//! ```shell
//! cargo run --release --bin=exonbed --features=binaries hg38 > hg38.exons.bed
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use clap_verbosity_flag::Verbosity;
use exonbed::bed;
use exonbed::contig::Filter;
use exonbed::source;
use exonbed::source::Source;
use exonbed::Config;
use exonbed::Reference;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// The way the transcript table is obtained.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    /// Query the rows of the table from the UCSC data API.
    #[value(alias = "sql")]
    Query,

    /// Download the gzipped dump of the table.
    #[value(alias = "ftp")]
    Download,

    /// Read a local refFlat file (requires `--input`).
    File,
}

/// Writes a BED file with one line per exon of every transcript in a UCSC
/// reference.
#[derive(Parser)]
struct Args {
    /// The reference genome to use (e.g., `hg38`).
    reference: String,

    /// The maximum number of transcripts to use as a data source (defaults to
    /// all).
    #[arg(short, long)]
    limit: Option<usize>,

    /// A contact email address sent along with each request.
    #[arg(short, long)]
    email: Option<String>,

    /// The method used to obtain the transcript table.
    #[arg(short, long, value_enum, default_value_t = Method::Query)]
    method: Method,

    /// The refFlat file to read when the method is `file`.
    #[arg(short, long, required_if_eq("method", "file"))]
    input: Option<PathBuf>,

    /// Strip the exons on alternate contigs. Requires either
    /// `--primary-contigs` or `--alt-pattern`; on its own it has no effect.
    #[arg(short = 'a', long)]
    strip_alt: bool,

    /// A comma-separated list of the contigs to keep when stripping.
    #[arg(long, value_delimiter = ',', conflicts_with = "alt_pattern")]
    primary_contigs: Option<Vec<String>>,

    /// A regular expression matching the contigs to drop when stripping.
    #[arg(long)]
    alt_pattern: Option<String>,

    /// If desired, a directory in which downloaded tables are kept and reused.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// The file to write to (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity,
}

/// Builds the alternate-contig policy from the arguments.
fn strip_alt(args: &Args) -> Result<Filter> {
    if !args.strip_alt {
        return Ok(Filter::Inert);
    }

    let filter = match (&args.primary_contigs, &args.alt_pattern) {
        (Some(contigs), _) => Filter::allowlist(contigs.iter().cloned()),
        (None, Some(pattern)) => {
            Filter::try_pattern(pattern).context("compiling the alternate contig pattern")?
        }
        (None, None) => {
            warn!(
                "`--strip-alt` was provided without `--primary-contigs` or `--alt-pattern`; no \
                 contigs will be stripped"
            );
            Filter::Inert
        }
    };

    Ok(filter)
}

/// Builds the source selected by the arguments.
fn build_source(args: &Args) -> Result<Box<dyn Source>> {
    let email = args.email.as_deref();

    let source: Box<dyn Source> = match args.method {
        Method::Query => Box::new(source::Query::new(email).context("creating query source")?),
        Method::Download => {
            let mut download = source::Download::new(email).context("creating download source")?;

            if let Some(dir) = &args.cache_dir {
                download = download.with_cache_dir(dir);
            }

            Box::new(download)
        }
        Method::File => {
            let path = args
                .input
                .clone()
                .context("`--input` is required when the method is `file`")?;
            Box::new(source::File::new(path))
        }
    };

    Ok(source)
}

fn run(args: &Args) -> Result<()> {
    let reference = args
        .reference
        .parse::<Reference>()
        .context("parsing the reference")?;

    let config = Config {
        limit: args.limit,
        strip_alt: strip_alt(args)?,
    };

    let source = build_source(args)?;

    info!("{reference}: generating exons via {:?}", args.method);
    let intervals = exonbed::generate(source.as_ref(), &reference, &config)
        .with_context(|| format!("generating exons for {reference}"))?;

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut writer = bed::Writer::new(BufWriter::new(output));
    writer
        .write_all(&intervals)
        .context("writing the BED file")?;

    info!("{reference}: wrote {} exons", intervals.len());

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .init(),
    };

    run(&args)
}
