//! Generating intervals for a reference end to end.

use tracing::info;

use crate::convert;
use crate::convert::Config;
use crate::interval;
use crate::source;
use crate::source::Source;
use crate::Reference;

/// An error related to [`generate()`].
#[derive(Debug)]
pub enum Error {
    /// The transcript table could not be fetched.
    Source(source::Error),

    /// The transcript table could not be converted.
    Convert(convert::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Source(err) => write!(f, "source error: {err}"),
            Error::Convert(err) => write!(f, "convert error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// Fetches the transcript table for `reference` from `source` and converts it
/// into sorted exon intervals.
pub fn generate<S>(
    source: &S,
    reference: &Reference,
    config: &Config,
) -> Result<Vec<interval::Record>, Error>
where
    S: Source + ?Sized,
{
    let table = source
        .fetch(reference, config.limit)
        .map_err(Error::Source)?;
    info!("{reference}: fetched {} transcripts", table.len());

    let intervals = convert::convert(&table, &config.strip_alt).map_err(Error::Convert)?;
    info!("{reference}: generated {} intervals", intervals.len());

    Ok(intervals)
}
