//! Transcript records.

use std::str::FromStr;

pub mod table;

pub use table::Table;

/// The delimiter between columns of a refFlat line.
const REFFLAT_DELIMITER: char = '\t';

/// The number of expected columns in a refFlat line.
pub const NUM_REFFLAT_FIELDS: usize = 11;

/// The column holding the gene name.
const GENE_NAME_COLUMN: usize = 0;

/// The column holding the chromosome.
const CHROMOSOME_COLUMN: usize = 2;

/// The column holding the exon starts.
const EXON_STARTS_COLUMN: usize = 9;

/// The column holding the exon ends.
const EXON_ENDS_COLUMN: usize = 10;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of a refFlat line.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of columns in the refFlat line.
    IncorrectNumberOfFields(usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in refFlat line: expected {NUM_REFFLAT_FIELDS} fields, \
                 found {n} fields"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// A single transcript.
///
/// The exon starts and ends are kept exactly as the source provided them: a
/// comma-delimited list of integers, often with a trailing comma. They are
/// only split apart (and validated) when exons are expanded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The chromosome.
    chromosome: String,

    /// The raw, delimited exon starts.
    exon_starts: String,

    /// The raw, delimited exon ends.
    exon_ends: String,

    /// The gene name.
    gene_name: String,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::transcript::Record;
    ///
    /// let record = Record::new("chr1", "10,20,", "15,25,", "GENE1");
    ///
    /// assert_eq!(record.chromosome(), "chr1");
    /// assert_eq!(record.exon_starts(), "10,20,");
    /// assert_eq!(record.exon_ends(), "15,25,");
    /// assert_eq!(record.gene_name(), "GENE1");
    /// ```
    pub fn new(
        chromosome: impl Into<String>,
        exon_starts: impl Into<String>,
        exon_ends: impl Into<String>,
        gene_name: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            exon_starts: exon_starts.into(),
            exon_ends: exon_ends.into(),
            gene_name: gene_name.into(),
        }
    }

    /// Gets the chromosome.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the raw exon starts.
    pub fn exon_starts(&self) -> &str {
        &self.exon_starts
    }

    /// Gets the raw exon ends.
    pub fn exon_ends(&self) -> &str {
        &self.exon_ends
    }

    /// Gets the gene name.
    pub fn gene_name(&self) -> &str {
        &self.gene_name
    }
}

impl FromStr for Record {
    type Err = ParseError;

    /// Parses a full refFlat line, keeping only the columns needed to build
    /// exon intervals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(REFFLAT_DELIMITER).collect::<Vec<_>>();

        if parts.len() != NUM_REFFLAT_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        Ok(Self::new(
            parts[CHROMOSOME_COLUMN],
            parts[EXON_STARTS_COLUMN],
            parts[EXON_ENDS_COLUMN],
            parts[GENE_NAME_COLUMN],
        ))
    }
}
