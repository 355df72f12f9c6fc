//! Converting a transcript table into sorted exon intervals.

use tracing::debug;

use crate::contig::Filter;
use crate::exon;
use crate::exon::Field;
use crate::interval;
use crate::transcript::Table;

/// An error related to converting a [`Table`].
///
/// Conversion never produces partial output: any of these aborts the whole
/// table.
#[derive(Debug)]
pub enum Error {
    /// An exon field could not be split.
    Split(exon::split::Error),

    /// Exon starts and ends could not be paired.
    Realign(exon::realign::Error),

    /// Intervals could not be assembled.
    Assemble(interval::assemble::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Split(err) => write!(f, "split error: {err}"),
            Error::Realign(err) => write!(f, "realign error: {err}"),
            Error::Assemble(err) => write!(f, "assemble error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Options that drive a conversion.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// The maximum number of transcripts to read from the source.
    ///
    /// This is enforced by the source, not by [`convert()`].
    pub limit: Option<usize>,

    /// The alternate-contig policy.
    pub strip_alt: Filter,
}

/// Expands every transcript in `table` into its exons and returns the
/// resulting intervals in sorted order.
///
/// # Examples
///
/// ```
/// use exonbed::contig::Filter;
/// use exonbed::convert;
/// use exonbed::transcript::Record;
/// use exonbed::transcript::Table;
///
/// let table = Table::new(vec![Record::new("chr1", "10,20,,", "15,25,,", "GENE1")]);
/// let intervals = convert(&table, &Filter::Inert)?;
///
/// let lines = intervals.iter().map(|r| r.to_string()).collect::<Vec<_>>();
/// assert_eq!(lines, vec!["chr1\t10\t15\tGENE1", "chr1\t20\t25\tGENE1"]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert(table: &Table, filter: &Filter) -> Result<Vec<interval::Record>> {
    let starts = exon::split(table, Field::Starts).map_err(Error::Split)?;
    let ends = exon::split(table, Field::Ends).map_err(Error::Split)?;
    debug!(
        "split {} transcripts into {} starts and {} ends",
        table.len(),
        starts.len(),
        ends.len()
    );

    let pairs = exon::realign(starts, ends).map_err(Error::Realign)?;
    let intervals = interval::assemble(table, pairs, filter).map_err(Error::Assemble)?;
    debug!("assembled {} intervals", intervals.len());

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exon::split::EXON_DELIMITER;
    use crate::transcript::Record;

    #[test]
    fn trailing_empty_tokens_produce_no_intervals(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let table = Table::new(vec![Record::new("chr1", "10,20,,", "15,25,,", "G")]);
        let intervals = convert(&table, &Filter::Inert)?;

        assert_eq!(
            intervals,
            vec![
                interval::Record::new("chr1", 10, 15, "G"),
                interval::Record::new("chr1", 20, 25, "G"),
            ]
        );

        Ok(())
    }

    #[test]
    fn cardinality_is_the_sum_of_exon_counts(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let table = Table::new(vec![
            Record::new("chr1", "1,3,5,", "2,4,6,", "A"),
            Record::new("chr2", "7,", "8,", "B"),
            Record::new("chr3", "", "", "C"),
            Record::new("chr1", "9,11,", "10,12,", "D"),
        ]);

        let expected = table
            .records()
            .iter()
            .map(|r| {
                r.exon_starts()
                    .split(EXON_DELIMITER)
                    .filter(|t| !t.is_empty())
                    .count()
            })
            .sum::<usize>();

        assert_eq!(convert(&table, &Filter::Inert)?.len(), expected);
        assert_eq!(expected, 6);

        Ok(())
    }

    #[test]
    fn sort_order_across_transcripts() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let table = Table::new(vec![
            Record::new("chr2", "5,", "6,", "A"),
            Record::new("chr1", "10,", "11,", "B"),
            Record::new("chr1", "3,", "4,", "C"),
        ]);

        let intervals = convert(&table, &Filter::Inert)?;

        assert_eq!(
            intervals,
            vec![
                interval::Record::new("chr1", 3, 4, "C"),
                interval::Record::new("chr1", 10, 11, "B"),
                interval::Record::new("chr2", 5, 6, "A"),
            ]
        );

        Ok(())
    }

    #[test]
    fn unbalanced_exon_counts() {
        let table = Table::new(vec![Record::new("chr1", "10,20", "15", "G")]);
        let err = convert(&table, &Filter::Inert).unwrap_err();

        assert!(matches!(
            err,
            Error::Realign(exon::realign::Error::Unbalanced {
                row: 0,
                position: 1,
                missing: Field::Ends
            })
        ));
        assert_eq!(
            err.to_string(),
            "realign error: unbalanced exon count in transcript row 0: exon 1 has no matching \
             exonEnds value"
        );
    }

    #[test]
    fn malformed_field() {
        let table = Table::new(vec![
            Record::new("chr1", "1,", "2,", "A"),
            Record::new("chr1", "10,abc,30", "15,25,35", "G"),
        ]);
        let err = convert(&table, &Filter::Inert).unwrap_err();

        assert!(matches!(
            err,
            Error::Split(exon::split::Error::MalformedField {
                row: 1,
                field: Field::Starts,
                ..
            })
        ));
    }

    #[test]
    fn malformed_end_field() {
        let table = Table::new(vec![Record::new("chr1", "10,", "1x,", "G")]);
        let err = convert(&table, &Filter::Inert).unwrap_err();

        assert!(matches!(
            err,
            Error::Split(exon::split::Error::MalformedField {
                row: 0,
                field: Field::Ends,
                ..
            })
        ));
    }

    #[test]
    fn empty_table() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert!(convert(&Table::default(), &Filter::Inert)?.is_empty());
        Ok(())
    }
}
