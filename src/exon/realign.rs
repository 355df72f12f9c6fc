//! Pairing split exon starts back up with their ends.

use std::collections::BTreeMap;

use crate::exon::Field;
use crate::exon::Pair;
use crate::exon::Position;
use crate::exon::Value;

/// An error related to realigning exon starts and ends.
#[derive(Debug)]
pub enum Error {
    /// A `(row, position)` key was present in one field but not the other.
    ///
    /// This means the transcript's start and end lists hold a different
    /// number of exons.
    Unbalanced {
        /// The row index of the transcript.
        row: usize,

        /// The ordinal of the unmatched exon.
        position: usize,

        /// The field that lacks a value for this exon.
        missing: Field,
    },

    /// The same `(row, position)` key was present more than once in a field.
    DuplicateKey {
        /// The row index of the transcript.
        row: usize,

        /// The ordinal of the duplicated exon.
        position: usize,

        /// The field holding the duplicate.
        field: Field,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unbalanced {
                row,
                position,
                missing,
            } => write!(
                f,
                "unbalanced exon count in transcript row {row}: exon {position} has no matching \
                 {missing} value"
            ),
            Error::DuplicateKey {
                row,
                position,
                field,
            } => write!(
                f,
                "duplicate {field} value for exon {position} in transcript row {row}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Indexes values by their `(row, position)` key.
fn index(values: Vec<Value>, field: Field) -> Result<BTreeMap<(usize, usize), Position>> {
    let mut map = BTreeMap::new();

    for value in values {
        if map.insert(value.key(), value.value()).is_some() {
            let (row, position) = value.key();
            return Err(Error::DuplicateKey {
                row,
                position,
                field,
            });
        }
    }

    Ok(map)
}

/// Joins exon starts to exon ends on their `(row, position)` key.
///
/// Every key must be present in both inputs exactly once. The pairs come out
/// in `(row, position)` order regardless of the order of the inputs.
///
/// # Examples
///
/// ```
/// use exonbed::exon::Pair;
/// use exonbed::exon::Value;
/// use exonbed::exon::realign;
///
/// let starts = vec![Value::new(0, 1, 20), Value::new(0, 0, 10)];
/// let ends = vec![Value::new(0, 0, 15), Value::new(0, 1, 25)];
///
/// let pairs = realign(starts, ends)?;
/// assert_eq!(pairs, vec![Pair::new(0, 10, 15), Pair::new(0, 20, 25)]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn realign(starts: Vec<Value>, ends: Vec<Value>) -> Result<Vec<Pair>> {
    let starts = index(starts, Field::Starts)?;
    let mut ends = index(ends, Field::Ends)?;

    let mut pairs = Vec::with_capacity(starts.len());

    for ((row, position), start) in starts {
        let end = ends.remove(&(row, position)).ok_or(Error::Unbalanced {
            row,
            position,
            missing: Field::Ends,
        })?;

        pairs.push(Pair::new(row, start, end));
    }

    // Anything left over had no start.
    if let Some(((row, position), _)) = ends.pop_first() {
        return Err(Error::Unbalanced {
            row,
            position,
            missing: Field::Starts,
        });
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_by_key() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let starts = vec![
            Value::new(0, 0, 10),
            Value::new(0, 1, 20),
            Value::new(1, 0, 100),
        ];
        let ends = vec![
            Value::new(1, 0, 150),
            Value::new(0, 1, 25),
            Value::new(0, 0, 15),
        ];

        let pairs = realign(starts, ends)?;

        assert_eq!(
            pairs,
            vec![
                Pair::new(0, 10, 15),
                Pair::new(0, 20, 25),
                Pair::new(1, 100, 150)
            ]
        );

        Ok(())
    }

    #[test]
    fn empty_inputs() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert!(realign(Vec::new(), Vec::new())?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_end() {
        let starts = vec![Value::new(0, 0, 10), Value::new(0, 1, 20)];
        let ends = vec![Value::new(0, 0, 15)];

        let err = realign(starts, ends).unwrap_err();

        assert!(matches!(
            err,
            Error::Unbalanced {
                row: 0,
                position: 1,
                missing: Field::Ends
            }
        ));
        assert_eq!(
            err.to_string(),
            "unbalanced exon count in transcript row 0: exon 1 has no matching exonEnds value"
        );
    }

    #[test]
    fn missing_start() {
        let starts = vec![Value::new(3, 0, 10)];
        let ends = vec![Value::new(3, 0, 15), Value::new(3, 1, 25)];

        let err = realign(starts, ends).unwrap_err();

        assert!(matches!(
            err,
            Error::Unbalanced {
                row: 3,
                position: 1,
                missing: Field::Starts
            }
        ));
    }

    #[test]
    fn duplicate_key() {
        let starts = vec![Value::new(0, 0, 10), Value::new(0, 0, 11)];
        let ends = vec![Value::new(0, 0, 15)];

        let err = realign(starts, ends).unwrap_err();

        assert_eq!(
            err.to_string(),
            "duplicate exonStarts value for exon 0 in transcript row 0"
        );
    }
}
