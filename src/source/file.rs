//! Reading a transcript table from a local file.

use std::fs;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;
use tracing::debug;
use tracing::info;

use crate::source::Error;
use crate::source::Result;
use crate::source::Source;
use crate::transcript::Table;
use crate::Reference;

/// The magic bytes that open every gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A refFlat file on disk, either plain or gzipped.
#[derive(Clone, Debug)]
pub struct File {
    /// The path to the file.
    path: PathBuf,
}

impl File {
    /// Creates a new [`File`] source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Gets the path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for File {
    /// Reads the file, whatever the reference.
    fn fetch(&self, reference: &Reference, limit: Option<usize>) -> Result<Table> {
        info!(
            "file: reading {} as the {reference} table",
            self.path.display()
        );

        let mut reader = fs::File::open(&self.path)
            .map(BufReader::new)
            .map_err(Error::Io)?;

        let compressed = reader.fill_buf().map_err(Error::Io)?.starts_with(&GZIP_MAGIC);

        let table = if compressed {
            Table::read_refflat(BufReader::new(GzDecoder::new(reader)), limit)
        } else {
            Table::read_refflat(reader, limit)
        }
        .map_err(Error::Table)?;

        debug!("file: read {} transcripts", table.len());
        Ok(table)
    }
}
