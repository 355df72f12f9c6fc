//! Exons expanded out of transcript records.
//!
//! A transcript stores its exons as two parallel, comma-delimited lists: one
//! for the starts and one for the ends. Expanding a table into exons happens
//! in two steps:
//!
//! - [`split`] explodes each list into [`Value`]s, each keyed by the row of
//!   its transcript and its slot within that transcript.
//! - [`realign`] joins the split starts and ends back together on that key to
//!   form [`Pair`]s.
//!
//! Pairing always goes through the `(row, position)` key. Nothing relies on
//! the two lists happening to line up after empty tokens are dropped.

pub mod realign;
pub mod split;

pub use realign::realign;
pub use split::split;

/// A genomic coordinate as it appears in the source table.
pub type Position = i64;

/// One of the two multi-valued exon fields of a transcript.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Field {
    /// The exon starts.
    Starts,

    /// The exon ends.
    Ends,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Starts => write!(f, "exonStarts"),
            Field::Ends => write!(f, "exonEnds"),
        }
    }
}

/// A single coordinate split out of an exon field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Value {
    /// The row index of the parent transcript.
    row: usize,

    /// The ordinal of the exon within its transcript.
    position: usize,

    /// The coordinate.
    value: Position,
}

impl Value {
    /// Creates a new [`Value`].
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::exon::Value;
    ///
    /// let value = Value::new(3, 1, 12612);
    ///
    /// assert_eq!(value.row(), 3);
    /// assert_eq!(value.position(), 1);
    /// assert_eq!(value.value(), 12612);
    /// assert_eq!(value.key(), (3, 1));
    /// ```
    pub fn new(row: usize, position: usize, value: Position) -> Self {
        Self {
            row,
            position,
            value,
        }
    }

    /// Gets the row index of the parent transcript.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Gets the ordinal of the exon within its transcript.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Gets the coordinate.
    pub fn value(&self) -> Position {
        self.value
    }

    /// Gets the `(row, position)` key used to pair starts with ends.
    pub fn key(&self) -> (usize, usize) {
        (self.row, self.position)
    }
}

/// A start paired with its matching end.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pair {
    /// The row index of the parent transcript.
    row: usize,

    /// The exon start.
    start: Position,

    /// The exon end.
    end: Position,
}

impl Pair {
    /// Creates a new [`Pair`].
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::exon::Pair;
    ///
    /// let pair = Pair::new(0, 10, 15);
    ///
    /// assert_eq!(pair.row(), 0);
    /// assert_eq!(pair.start(), 10);
    /// assert_eq!(pair.end(), 15);
    /// ```
    pub fn new(row: usize, start: Position, end: Position) -> Self {
        Self { row, start, end }
    }

    /// Gets the row index of the parent transcript.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Gets the exon start.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the exon end.
    pub fn end(&self) -> Position {
        self.end
    }
}
