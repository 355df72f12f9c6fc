//! `exonbed` is a crate for turning UCSC transcript tables into per-exon BED
//! intervals.
//!
//! The UCSC `refFlat` table holds one row per transcript. Each row stores the
//! exons of its transcript as two parallel, comma-delimited lists of
//! coordinates: one for the exon starts and one for the exon ends. This crate
//! expands every transcript into one interval per exon, labels each interval
//! with its gene, and sorts the result by chromosome, start, and end.
//!
//! The crate provides two main points of entry:
//!
//! - Converting a [`transcript::Table`] you already have via [`convert()`].
//! - Fetching and converting the table for a [`Reference`] in one go via
//!   [`generate()`].
//!
//! ## Converting a table
//!
//! A [`transcript::Table`] can be built by hand, read from refFlat lines with
//! [`transcript::Table::read_refflat()`], or fetched from a
//! [`source::Source`]. The conversion is a pure function of the table and the
//! [alternate-contig policy](contig::Filter). It either yields every interval
//! or fails as a whole: a malformed coordinate or a transcript whose start and
//! end lists disagree in length aborts the conversion.
//!
//! ```
//! use exonbed::bed;
//! use exonbed::contig::Filter;
//! use exonbed::transcript::Table;
//!
//! let data = b"DDX11L1\tNR_046018\tchr1\t+\t11873\t14409\t14409\t14409\t3\t\
//!              11873,12612,13220,\t12227,12721,14409,\n";
//! let table = Table::read_refflat(&data[..], None)?;
//!
//! let intervals = exonbed::convert(&table, &Filter::Inert)?;
//! assert_eq!(intervals.len(), 3);
//!
//! let mut writer = bed::Writer::new(Vec::new());
//! writer.write_all(&intervals)?;
//!
//! assert_eq!(
//!     String::from_utf8(writer.into_inner())?,
//!     "chr1\t11873\t12227\tDDX11L1\n\
//!      chr1\t12612\t12721\tDDX11L1\n\
//!      chr1\t13220\t14409\tDDX11L1\n"
//! );
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Sources
//!
//! There are two ways to obtain the table for a reference from UCSC, and both
//! are expected to produce identical intervals:
//!
//! - [`source::Download`] fetches the gzipped bulk dump of the table.
//! - [`source::Query`] queries the rows of the table from the UCSC data API.
//!
//! A local copy of the dump can be read with [`source::File`]. Everything
//! downstream of [`source::Source::fetch()`] is oblivious to which source was
//! used.
//!
//! ```no_run
//! use exonbed::Config;
//! use exonbed::Reference;
//! use exonbed::source::Query;
//!
//! let reference = "hg38".parse::<Reference>()?;
//! let source = Query::new(None)?;
//!
//! let intervals = exonbed::generate(&source, &reference, &Config::default())?;
//! println!("{} exons", intervals.len());
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod bed;
pub mod contig;
pub mod convert;
pub mod exon;
pub mod generate;
pub mod interval;
pub mod reference;
pub mod source;
pub mod transcript;

pub use convert::convert;
pub use convert::Config;
pub use generate::generate;
pub use reference::Reference;
