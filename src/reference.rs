//! Reference genome assemblies.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// The prefix for bulk downloads from the UCSC genome browser.
const DOWNLOAD_URL_PREFIX: &str = "https://hgdownload.soe.ucsc.edu/goldenPath";

/// The UCSC endpoint for querying the rows of a track.
const QUERY_URL_PREFIX: &str = "https://api.genome.ucsc.edu/getData/track";

/// The name of the transcript table within each assembly database.
pub const TABLE_NAME: &str = "refFlat";

/// The value passed to the query endpoint to request every row.
const UNLIMITED: i64 = -1;

/// The pattern that all UCSC assembly names follow.
static REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][A-Za-z]*[0-9]+$").expect("reference regex to compile"));

/// An error related to parsing a [`Reference`].
#[derive(Debug)]
pub enum ParseError {
    /// The name does not look like a UCSC assembly name.
    InvalidName(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidName(name) => write!(
                f,
                "invalid reference name: expected a UCSC assembly name such as `hg38`, found \
                 `{name}`"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// A named reference genome assembly (e.g., `hg38`).
///
/// The name selects both the coordinate system and the source table that
/// transcripts are read from.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Reference(String);

impl Reference {
    /// Attempts to create a new reference.
    ///
    /// [`None`] is returned if the name is not a valid assembly name.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::Reference;
    ///
    /// assert!(Reference::try_new("hg38").is_some());
    /// assert!(Reference::try_new("danRer11").is_some());
    /// assert!(Reference::try_new("hg38/../etc").is_none());
    /// ```
    pub fn try_new(value: impl AsRef<str>) -> Option<Self> {
        let value = value.as_ref();

        if !REGEX.is_match(value) {
            return None;
        }

        Some(Self(value.to_string()))
    }

    /// Gets the name of the assembly.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::Reference;
    ///
    /// let reference = "hg19".parse::<Reference>()?;
    /// assert_eq!(reference.name(), "hg19");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Gets the file name of the compressed transcript table.
    pub fn file_name(&self) -> String {
        format!("{TABLE_NAME}.txt.gz")
    }

    /// Gets the bulk download url for the compressed transcript table.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::Reference;
    ///
    /// let reference = "hg38".parse::<Reference>()?;
    /// assert_eq!(
    ///     reference.download_url(),
    ///     "https://hgdownload.soe.ucsc.edu/goldenPath/hg38/database/refFlat.txt.gz"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn download_url(&self) -> String {
        format!(
            "{}/{}/database/{}",
            DOWNLOAD_URL_PREFIX,
            self.0,
            self.file_name()
        )
    }

    /// Gets the query url for the transcript table, optionally capped at
    /// `limit` rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::Reference;
    ///
    /// let reference = "hg38".parse::<Reference>()?;
    /// assert_eq!(
    ///     reference.query_url(Some(10)),
    ///     "https://api.genome.ucsc.edu/getData/track?genome=hg38;track=refFlat;maxItemsOutput=10"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn query_url(&self, limit: Option<usize>) -> String {
        let max_items = limit.map(|n| n as i64).unwrap_or(UNLIMITED);

        format!(
            "{}?genome={};track={};maxItemsOutput={}",
            QUERY_URL_PREFIX, self.0, TABLE_NAME, max_items
        )
    }
}

impl FromStr for Reference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s).ok_or_else(|| ParseError::InvalidName(s.to_string()))
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid() {
        let reference = Reference::try_new("hg38").unwrap();

        assert_eq!(reference.name(), "hg38");
        assert_eq!(reference.file_name(), "refFlat.txt.gz");
        assert_eq!(
            reference.download_url(),
            "https://hgdownload.soe.ucsc.edu/goldenPath/hg38/database/refFlat.txt.gz"
        );
        assert_eq!(
            reference.query_url(None),
            "https://api.genome.ucsc.edu/getData/track?genome=hg38;track=refFlat;maxItemsOutput=-1"
        );
    }

    #[test]
    fn invalid() {
        assert!(Reference::try_new("").is_none());
        assert!(Reference::try_new("hg").is_none());
        assert!(Reference::try_new("38").is_none());
        assert!(Reference::try_new("hg38 ").is_none());
        assert!(Reference::try_new("hg38;track=foo").is_none());
    }

    #[test]
    fn invalid_parse() {
        let err = "HG38!".parse::<Reference>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid reference name: expected a UCSC assembly name such as `hg38`, found `HG38!`"
        );
    }
}
