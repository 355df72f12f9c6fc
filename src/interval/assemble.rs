//! Assembling exon pairs into the final, sorted interval sequence.

use tracing::debug;

use crate::contig::Filter;
use crate::exon::Pair;
use crate::interval::Record;
use crate::transcript::Table;

/// An error related to assembling intervals.
#[derive(Debug)]
pub enum Error {
    /// An exon pair refers to a transcript row that is not in the table.
    ///
    /// Pairs are only ever derived from the same table they are assembled
    /// against, so this is an internal invariant violation rather than a
    /// problem with the input.
    OrphanPair {
        /// The row index the pair refers to.
        row: usize,

        /// The number of rows in the table.
        rows: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::OrphanPair { row, rows } => write!(
                f,
                "exon pair refers to transcript row {row}, but the table only has {rows} rows"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Attaches the chromosome and gene name of each pair's transcript, applies
/// the contig filter, and sorts the result.
///
/// This is a pure function of its inputs.
///
/// # Examples
///
/// ```
/// use exonbed::contig::Filter;
/// use exonbed::exon::Pair;
/// use exonbed::interval::Record;
/// use exonbed::interval::assemble;
/// use exonbed::transcript;
/// use exonbed::transcript::Table;
///
/// let table = Table::new(vec![
///     transcript::Record::new("chr2", "5,", "9,", "G0"),
///     transcript::Record::new("chr1", "10,3,", "15,4,", "G1"),
/// ]);
/// let pairs = vec![Pair::new(0, 5, 9), Pair::new(1, 10, 15), Pair::new(1, 3, 4)];
///
/// let intervals = assemble(&table, pairs, &Filter::Inert)?;
///
/// assert_eq!(
///     intervals,
///     vec![
///         Record::new("chr1", 3, 4, "G1"),
///         Record::new("chr1", 10, 15, "G1"),
///         Record::new("chr2", 5, 9, "G0"),
///     ]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn assemble(table: &Table, pairs: Vec<Pair>, filter: &Filter) -> Result<Vec<Record>> {
    let mut intervals = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let transcript = table.get(pair.row()).ok_or(Error::OrphanPair {
            row: pair.row(),
            rows: table.len(),
        })?;

        if !filter.keeps(transcript.chromosome()) {
            continue;
        }

        intervals.push(Record::new(
            transcript.chromosome(),
            pair.start(),
            pair.end(),
            transcript.gene_name(),
        ));
    }

    if !filter.is_inert() {
        debug!("contig filter ({filter}) kept {} intervals", intervals.len());
    }

    intervals.sort();

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript;

    /// Four transcripts, one of them on an alternate contig.
    fn table() -> Table {
        Table::new(vec![
            transcript::Record::new("chr2", "5,", "6,", "G0"),
            transcript::Record::new("chr1", "10,", "11,", "G1"),
            transcript::Record::new("chr1", "3,", "4,", "G2"),
            transcript::Record::new("chr6_GL000250v2_alt", "7,", "8,", "G3"),
        ])
    }

    /// One exon per transcript in [`table()`].
    fn pairs() -> Vec<Pair> {
        vec![
            Pair::new(0, 5, 6),
            Pair::new(1, 10, 11),
            Pair::new(2, 3, 4),
            Pair::new(3, 7, 8),
        ]
    }

    #[test]
    fn sorts_by_chromosome_then_start() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let intervals = assemble(&table(), pairs(), &Filter::Inert)?;

        let keys = intervals
            .iter()
            .map(|r| (r.chromosome(), r.start()))
            .collect::<Vec<_>>();

        assert_eq!(
            keys,
            vec![
                ("chr1", 3),
                ("chr1", 10),
                ("chr2", 5),
                ("chr6_GL000250v2_alt", 7)
            ]
        );

        Ok(())
    }

    #[test]
    fn one_transcript_fans_out() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let table = Table::new(vec![transcript::Record::new(
            "chrX",
            "1,5,9,",
            "2,6,10,",
            "G",
        )]);
        let pairs = vec![Pair::new(0, 9, 10), Pair::new(0, 1, 2), Pair::new(0, 5, 6)];

        let intervals = assemble(&table, pairs, &Filter::Inert)?;

        assert_eq!(intervals.len(), 3);
        assert!(intervals.iter().all(|r| r.gene_name() == "G"));

        Ok(())
    }

    #[test]
    fn resorting_is_a_no_op() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let intervals = assemble(&table(), pairs(), &Filter::Inert)?;

        let mut resorted = intervals.clone();
        resorted.sort();

        assert_eq!(intervals, resorted);

        Ok(())
    }

    #[test]
    fn filter_drops_alternate_contigs() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let filter = Filter::try_pattern("_alt$")?;
        let intervals = assemble(&table(), pairs(), &filter)?;

        assert_eq!(intervals.len(), 3);
        assert!(intervals.iter().all(|r| !r.chromosome().ends_with("_alt")));

        let filter = Filter::allowlist(["chr2"]);
        let intervals = assemble(&table(), pairs(), &filter)?;

        assert_eq!(intervals, vec![Record::new("chr2", 5, 6, "G0")]);

        Ok(())
    }

    #[test]
    fn orphan_pair() {
        let err = assemble(&table(), vec![Pair::new(4, 1, 2)], &Filter::Inert).unwrap_err();

        assert!(matches!(err, Error::OrphanPair { row: 4, rows: 4 }));
        assert_eq!(
            err.to_string(),
            "exon pair refers to transcript row 4, but the table only has 4 rows"
        );
    }
}
