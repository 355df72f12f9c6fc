//! A table of transcripts.

use std::io;
use std::io::BufRead;

use crate::transcript;
use crate::transcript::Record;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// An error related to reading a [`Table`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A refFlat line could not be parsed.
    Line(usize, transcript::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Line(line_no, err) => write!(f, "line {line_no}: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A table of transcripts, one row per transcript.
///
/// The position of a record within the table is its row index, which is the
/// identity that every exon carries back to its parent transcript. A table is
/// never mutated once built.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table(Vec<Record>);

impl Table {
    /// Creates a new [`Table`] from the provided records.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::transcript::Record;
    /// use exonbed::transcript::Table;
    ///
    /// let table = Table::new(vec![Record::new("chr1", "10,", "15,", "GENE1")]);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn new(records: Vec<Record>) -> Self {
        Self(records)
    }

    /// Reads a table from refFlat lines, keeping at most `limit` transcripts.
    ///
    /// Blank lines are skipped and do not count towards the limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::transcript::Table;
    ///
    /// let data = b"G1\tT1\tchr1\t+\t10\t25\t10\t25\t2\t10,20,\t15,25,\n\
    ///              G2\tT2\tchr2\t-\t5\t9\t5\t9\t1\t5,\t9,\n";
    ///
    /// let table = Table::read_refflat(&data[..], Some(1))?;
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.get(0).unwrap().gene_name(), "G1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_refflat<T>(mut reader: T, limit: Option<usize>) -> Result<Self, Error>
    where
        T: BufRead,
    {
        let mut records = Vec::new();
        let mut buffer = String::new();
        let mut line_no = 0usize;

        while limit.map_or(true, |limit| records.len() < limit) {
            let read = read_line(&mut reader, &mut buffer).map_err(Error::Io)?;

            if read == 0 {
                break;
            }

            line_no += 1;

            if buffer.is_empty() {
                continue;
            }

            let record = buffer
                .parse::<Record>()
                .map_err(|err| Error::Line(line_no, err))?;
            records.push(record);
        }

        Ok(Self(records))
    }

    /// Gets the number of transcripts in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the table holds no transcripts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the transcript at the provided row index.
    pub fn get(&self, row: usize) -> Option<&Record> {
        self.0.get(row)
    }

    /// Gets the transcripts in row order.
    pub fn records(&self) -> &[Record] {
        &self.0
    }

    /// Iterates over the `(row, transcript)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.0.iter().enumerate()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reads a line from a buffered reader without its line ending.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    const REFFLAT: &[u8] = b"G1\tT1\tchr1\t+\t10\t25\t10\t25\t2\t10,20,\t15,25,\r\n\
                             \n\
                             G2\tT2\tchr2\t-\t5\t9\t5\t9\t1\t5,\t9,";

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);
    }

    #[test]
    fn reads_every_row() -> Result<(), Box<dyn std::error::Error>> {
        let table = Table::read_refflat(REFFLAT, None)?;

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(0),
            Some(&Record::new("chr1", "10,20,", "15,25,", "G1"))
        );
        assert_eq!(table.get(1), Some(&Record::new("chr2", "5,", "9,", "G2")));
        assert_eq!(table.get(2), None);

        Ok(())
    }

    #[test]
    fn limit_caps_the_number_of_rows() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Table::read_refflat(REFFLAT, Some(0))?.len(), 0);
        assert_eq!(Table::read_refflat(REFFLAT, Some(1))?.len(), 1);
        assert_eq!(Table::read_refflat(REFFLAT, Some(5))?.len(), 2);
        Ok(())
    }

    #[test]
    fn bad_line_reports_its_number() {
        let data = b"G1\tT1\tchr1\t+\t10\t25\t10\t25\t2\t10,20,\t15,25,\nG2\tchr2\n";
        let err = Table::read_refflat(&data[..], None).unwrap_err();

        assert!(matches!(err, Error::Line(2, _)));
        assert_eq!(
            err.to_string(),
            "line 2: invalid number of fields in refFlat line: expected 11 fields, found 2 fields"
        );
    }
}
