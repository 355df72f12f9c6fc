//! Policies for stripping alternate contigs.
//!
//! What counts as an "alternate" contig depends entirely on the naming scheme
//! of the assembly (e.g., `chr6_GL000250v2_alt` in `hg38`), so no convention
//! is assumed here. The caller either names the contigs to keep or supplies a
//! pattern for the contigs to drop. Without either, filtering is inert.

use std::collections::HashSet;

use regex::Regex;

/// A policy deciding which chromosomes survive alternate-contig stripping.
#[derive(Clone, Debug, Default)]
pub enum Filter {
    /// Every chromosome is kept.
    #[default]
    Inert,

    /// Only the listed chromosomes are kept.
    Allowlist(HashSet<String>),

    /// Chromosomes matching the pattern are dropped.
    Pattern(Regex),
}

impl Filter {
    /// Creates a [`Filter::Allowlist`] from the provided chromosome names.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::contig::Filter;
    ///
    /// let filter = Filter::allowlist(["chr1", "chr2"]);
    ///
    /// assert!(filter.keeps("chr1"));
    /// assert!(!filter.keeps("chr1_KI270706v1_random"));
    /// ```
    pub fn allowlist<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Allowlist(names.into_iter().map(Into::into).collect())
    }

    /// Attempts to create a [`Filter::Pattern`] from a regular expression
    /// matching the contigs to drop.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::contig::Filter;
    ///
    /// let filter = Filter::try_pattern(r"_alt$")?;
    ///
    /// assert!(filter.keeps("chr6"));
    /// assert!(!filter.keeps("chr6_GL000250v2_alt"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// Returns whether this filter keeps everything.
    pub fn is_inert(&self) -> bool {
        matches!(self, Filter::Inert)
    }

    /// Returns whether intervals on `chromosome` are kept.
    pub fn keeps(&self, chromosome: &str) -> bool {
        match self {
            Filter::Inert => true,
            Filter::Allowlist(names) => names.contains(chromosome),
            Filter::Pattern(pattern) => !pattern.is_match(chromosome),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Inert => write!(f, "inert"),
            Filter::Allowlist(names) => write!(f, "allowlist of {} contigs", names.len()),
            Filter::Pattern(pattern) => write!(f, "drop contigs matching `{pattern}`"),
        }
    }
}
