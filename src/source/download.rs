//! Bulk download of the compressed transcript table.

use std::fs;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use tracing::debug;
use tracing::info;

use crate::source;
use crate::source::Error;
use crate::source::Result;
use crate::source::Source;
use crate::transcript::Table;
use crate::Reference;

/// Downloads the gzipped refFlat dump of a reference.
#[derive(Clone, Debug)]
pub struct Download {
    /// The HTTP client.
    client: Client,

    /// If desired, a directory in which downloads are kept and reused.
    cache_dir: Option<PathBuf>,
}

impl Download {
    /// Creates a new [`Download`] source.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::source::Download;
    ///
    /// let source = Download::new(Some("someone@example.com"))?;
    /// assert!(source.cache_dir().is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(email: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: source::client(email)?,
            cache_dir: None,
        })
    }

    /// Keeps downloaded archives in `directory` and reuses them on later
    /// fetches.
    pub fn with_cache_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(directory.into());
        self
    }

    /// Gets the cache directory, if any.
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// Gets the path the archive for `reference` is cached at, if caching is
    /// enabled.
    pub fn cached_path(&self, reference: &Reference) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(reference.name()).join(reference.file_name()))
    }

    /// Reads a table out of a gzipped refFlat stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Write;
    ///
    /// use exonbed::source::Download;
    /// use flate2::Compression;
    /// use flate2::write::GzEncoder;
    ///
    /// let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    /// encoder.write_all(b"G1\tT1\tchr1\t+\t10\t25\t10\t25\t2\t10,20,\t15,25,\n")?;
    /// let compressed = encoder.finish()?;
    ///
    /// let table = Download::parse(&compressed[..], None)?;
    /// assert_eq!(table.len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse<R>(compressed: R, limit: Option<usize>) -> Result<Table>
    where
        R: Read,
    {
        let reader = BufReader::new(GzDecoder::new(compressed));
        Table::read_refflat(reader, limit).map_err(Error::Table)
    }

    /// Downloads the archive for `reference` to `path`.
    fn download_to(&self, reference: &Reference, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        let url = reference.download_url();
        info!("download: fetching {url}");

        let bytes = source::get(&self.client, &url)?
            .bytes()
            .map_err(Error::Http)?;

        // Written under a temporary name so an interrupted download is never
        // mistaken for a cached archive.
        let partial = path.with_extension("part");
        fs::write(&partial, &bytes).map_err(Error::Io)?;
        fs::rename(&partial, path).map_err(Error::Io)?;

        info!("download: completed ({} bytes)", bytes.len());
        Ok(())
    }
}

impl Source for Download {
    fn fetch(&self, reference: &Reference, limit: Option<usize>) -> Result<Table> {
        let table = match self.cached_path(reference) {
            Some(path) => {
                if path.exists() {
                    info!("download: reusing cached archive at {}", path.display());
                } else {
                    self.download_to(reference, &path)?;
                }

                let file = fs::File::open(&path).map_err(Error::Io)?;
                Self::parse(file, limit)?
            }
            None => {
                let url = reference.download_url();
                info!("download: fetching {url}");

                let bytes = source::get(&self.client, &url)?
                    .bytes()
                    .map_err(Error::Http)?;
                Self::parse(bytes.as_ref(), limit)?
            }
        };

        debug!("download: read {} transcripts", table.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempdir::TempDir;

    use super::*;

    const REFFLAT: &[u8] = b"G1\tT1\tchr1\t+\t10\t25\t10\t25\t2\t10,20,\t15,25,\n\
                             G2\tT2\tchr2\t-\t5\t9\t5\t9\t1\t5,\t9,\n";

    /// Gzips `data` in memory.
    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    #[test]
    fn parses_a_gzipped_table() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let compressed = compress(REFFLAT)?;

        assert_eq!(Download::parse(&compressed[..], None)?.len(), 2);
        assert_eq!(Download::parse(&compressed[..], Some(1))?.len(), 1);

        Ok(())
    }

    #[test]
    fn rejects_uncompressed_input() {
        let err = Download::parse(REFFLAT, None).unwrap_err();
        assert!(matches!(err, Error::Table(_)));
    }

    #[test]
    fn cached_path() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let reference = "hg38".parse::<Reference>()?;
        let source = Download::new(None)?.with_cache_dir("/tmp/cache");

        assert_eq!(
            source.cached_path(&reference),
            Some(PathBuf::from("/tmp/cache/hg38/refFlat.txt.gz"))
        );
        assert_eq!(Download::new(None)?.cached_path(&reference), None);

        Ok(())
    }

    #[test]
    fn reuses_a_cached_archive() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("cache")?;
        let reference = "hg38".parse::<Reference>()?;
        let source = Download::new(None)?.with_cache_dir(dir.path());

        // SAFETY: the cache directory was just set.
        let path = source.cached_path(&reference).unwrap();
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(&path, compress(REFFLAT)?)?;

        let table = source.fetch(&reference, None)?;
        assert_eq!(table.len(), 2);

        Ok(())
    }
}
