//! Per-exon genomic intervals.

use std::cmp::Ordering;

use crate::exon::Position;

pub mod assemble;

pub use assemble::assemble;

/// The delimiter between columns of a rendered interval.
pub const INTERVAL_DELIMITER: char = '\t';

/// A single exon interval labelled with its gene.
///
/// Intervals are ordered by chromosome (lexicographically), then start, then
/// end. Intervals that tie on all three are further ordered by gene name, so
/// the final order never depends on the order transcripts were read in.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Record {
    /// The chromosome.
    chromosome: String,

    /// The exon start.
    start: Position,

    /// The exon end.
    end: Position,

    /// The gene name.
    gene_name: String,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::interval::Record;
    ///
    /// let record = Record::new("chr1", 11873, 12227, "DDX11L1");
    ///
    /// assert_eq!(record.chromosome(), "chr1");
    /// assert_eq!(record.start(), 11873);
    /// assert_eq!(record.end(), 12227);
    /// assert_eq!(record.gene_name(), "DDX11L1");
    /// assert_eq!(record.to_string(), "chr1\t11873\t12227\tDDX11L1");
    /// ```
    pub fn new(
        chromosome: impl Into<String>,
        start: Position,
        end: Position,
        gene_name: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            gene_name: gene_name.into(),
        }
    }

    /// Gets the chromosome.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the exon start.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the exon end.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Gets the gene name.
    pub fn gene_name(&self) -> &str {
        &self.gene_name
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chromosome
            .cmp(&other.chromosome)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.gene_name.cmp(&other.gene_name))
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}",
            self.chromosome,
            INTERVAL_DELIMITER,
            self.start,
            INTERVAL_DELIMITER,
            self.end,
            INTERVAL_DELIMITER,
            self.gene_name
        )
    }
}
