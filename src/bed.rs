//! Writing intervals as BED.

use std::io;
use std::io::Write;

use crate::interval::Record;

/// A BED writer.
///
/// Each interval is written as a single tab-separated line of chromosome,
/// start, end, and gene name. No header is written.
#[derive(Debug)]
pub struct Writer<W>(W)
where
    W: Write;

impl<W> Writer<W>
where
    W: Write,
{
    /// Creates a new BED writer.
    ///
    /// # Examples
    ///
    /// ```
    /// let writer = exonbed::bed::Writer::new(Vec::new());
    /// ```
    pub fn new(inner: W) -> Self {
        Self(inner)
    }

    /// Gets a reference to the inner writer.
    pub fn inner(&self) -> &W {
        &self.0
    }

    /// Consumes self and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.0
    }

    /// Writes a single interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::bed::Writer;
    /// use exonbed::interval::Record;
    ///
    /// let mut writer = Writer::new(Vec::new());
    /// writer.write_record(&Record::new("chr1", 10, 15, "GENE1"))?;
    ///
    /// assert_eq!(writer.into_inner(), b"chr1\t10\t15\tGENE1\n");
    ///
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.0, "{record}")
    }

    /// Writes every interval in order and flushes the inner writer.
    pub fn write_all<'a, I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for record in records {
            self.write_record(record)?;
        }

        self.0.flush()
    }
}
