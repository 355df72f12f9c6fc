//! Splitting delimited exon fields into individual values.

use std::num::ParseIntError;

use crate::exon::Field;
use crate::exon::Position;
use crate::exon::Value;
use crate::transcript::Table;

/// The delimiter between coordinates within an exon field.
pub const EXON_DELIMITER: char = ',';

/// An error related to splitting an exon field.
#[derive(Debug)]
pub enum Error {
    /// A non-empty token in an exon field was not an integer.
    MalformedField {
        /// The row index of the transcript.
        row: usize,

        /// The field holding the token.
        field: Field,

        /// The offending token.
        token: String,

        /// The underlying parse error.
        source: ParseIntError,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedField {
                row,
                field,
                token,
                source,
            } => write!(
                f,
                "malformed {field} field in transcript row {row}: token `{token}`: {source}"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedField { source, .. } => Some(source),
        }
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Lazily splits one raw exon field belonging to transcript `row`.
///
/// Empty tokens (such as the one following a trailing comma) are discarded.
/// The positions of the remaining tokens are dense: they count retained
/// tokens only, in their original order.
///
/// # Examples
///
/// ```
/// use exonbed::exon::Field;
/// use exonbed::exon::Value;
/// use exonbed::exon::split::split_field;
///
/// let values = split_field(4, Field::Starts, "10,,20,")
///     .collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(values, vec![Value::new(4, 0, 10), Value::new(4, 1, 20)]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn split_field(
    row: usize,
    field: Field,
    raw: &str,
) -> impl Iterator<Item = Result<Value>> + '_ {
    raw.split(EXON_DELIMITER)
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(move |(position, token)| {
            token
                .parse::<Position>()
                .map(|value| Value::new(row, position, value))
                .map_err(|source| Error::MalformedField {
                    row,
                    field,
                    token: token.to_string(),
                    source,
                })
        })
}

/// Splits `field` for every transcript in the table.
///
/// The values come out in `(row, position)` order. The first malformed token
/// aborts the whole split.
///
/// # Examples
///
/// ```
/// use exonbed::exon::Field;
/// use exonbed::exon::split;
/// use exonbed::transcript::Record;
/// use exonbed::transcript::Table;
///
/// let table = Table::new(vec![
///     Record::new("chr1", "10,20,", "15,25,", "G1"),
///     Record::new("chr2", "5,", "9,", "G2"),
/// ]);
///
/// let ends = split(&table, Field::Ends)?;
/// assert_eq!(ends.len(), 3);
/// assert_eq!(ends[2].key(), (1, 0));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn split(table: &Table, field: Field) -> Result<Vec<Value>> {
    table
        .rows()
        .flat_map(|(row, record)| {
            let raw = match field {
                Field::Starts => record.exon_starts(),
                Field::Ends => record.exon_ends(),
            };

            split_field(row, field, raw)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Record;

    #[test]
    fn trailing_delimiters_produce_no_values() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let values = split_field(0, Field::Starts, "10,20,,").collect::<Result<Vec<_>>>()?;
        assert_eq!(values, vec![Value::new(0, 0, 10), Value::new(0, 1, 20)]);
        Ok(())
    }

    #[test]
    fn positions_are_dense_after_dropping_empty_tokens(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let values = split_field(2, Field::Ends, ",7,,9").collect::<Result<Vec<_>>>()?;
        assert_eq!(values, vec![Value::new(2, 0, 7), Value::new(2, 1, 9)]);
        Ok(())
    }

    #[test]
    fn empty_field_produces_no_values() {
        assert_eq!(split_field(0, Field::Starts, "").count(), 0);
        assert_eq!(split_field(0, Field::Starts, ",,").count(), 0);
    }

    #[test]
    fn negative_values_are_accepted() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let values = split_field(0, Field::Starts, "-5,").collect::<Result<Vec<_>>>()?;
        assert_eq!(values, vec![Value::new(0, 0, -5)]);
        Ok(())
    }

    #[test]
    fn malformed_token() {
        let table = Table::new(vec![
            Record::new("chr1", "1,", "2,", "G0"),
            Record::new("chr1", "10,abc,30", "15,35,40", "G1"),
        ]);

        let err = split(&table, Field::Starts).unwrap_err();

        assert!(matches!(
            &err,
            Error::MalformedField { row: 1, field: Field::Starts, token, .. } if token == "abc"
        ));
        assert_eq!(
            err.to_string(),
            "malformed exonStarts field in transcript row 1: token `abc`: invalid digit found in \
             string"
        );
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let err = split_field(0, Field::Ends, "10, 20")
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert!(matches!(err, Error::MalformedField { token, .. } if token == " 20"));
    }

    #[test]
    fn values_follow_row_order() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let table = Table::new(vec![
            Record::new("chr2", "5,6,", "9,10,", "G0"),
            Record::new("chr1", "1,", "2,", "G1"),
        ]);

        let keys = split(&table, Field::Starts)?
            .iter()
            .map(Value::key)
            .collect::<Vec<_>>();
        assert_eq!(keys, vec![(0, 0), (0, 1), (1, 0)]);

        Ok(())
    }
}
