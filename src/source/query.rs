//! Querying the transcript table directly.

use std::collections::BTreeMap;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::reference::TABLE_NAME;
use crate::source;
use crate::source::Error;
use crate::source::Result;
use crate::source::Source;
use crate::transcript;
use crate::transcript::Table;
use crate::Reference;

/// The key holding an error message in a response.
const ERROR_KEY: &str = "error";

/// The key flagging that the server truncated the response.
const TRUNCATED_KEY: &str = "maxItemsLimit";

/// A row of the transcript table as returned by the query endpoint.
///
/// Only the columns needed to build exon intervals are kept.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Row {
    /// The chromosome.
    chrom: String,

    /// The raw, delimited exon starts.
    exon_starts: String,

    /// The raw, delimited exon ends.
    exon_ends: String,

    /// The gene name.
    gene_name: String,
}

impl Row {
    /// Converts the row into a transcript record.
    fn into_record(self) -> transcript::Record {
        transcript::Record::new(self.chrom, self.exon_starts, self.exon_ends, self.gene_name)
    }
}

/// The rows of a response.
///
/// Whole-genome responses group the rows by chromosome, while responses for
/// a single chromosome return them as a flat list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Rows {
    /// A flat list of rows.
    Flat(Vec<Row>),

    /// Rows grouped by chromosome.
    ByChromosome(BTreeMap<String, Vec<Row>>),
}

impl Rows {
    /// Flattens the rows into a single list.
    fn into_rows(self) -> Vec<Row> {
        match self {
            Rows::Flat(rows) => rows,
            Rows::ByChromosome(groups) => groups.into_values().flatten().collect(),
        }
    }
}

/// Queries the rows of the transcript table from the UCSC data API.
#[derive(Clone, Debug)]
pub struct Query {
    /// The HTTP client.
    client: Client,
}

impl Query {
    /// Creates a new [`Query`] source.
    pub fn new(email: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: source::client(email)?,
        })
    }

    /// Reads a table out of a JSON response body.
    ///
    /// # Examples
    ///
    /// ```
    /// use exonbed::source::Query;
    ///
    /// let body = r#"{
    ///     "genome": "hg38",
    ///     "refFlat": [
    ///         {"geneName": "G1", "name": "T1", "chrom": "chr1", "strand": "+",
    ///          "exonStarts": "10,20,", "exonEnds": "15,25,"}
    ///     ]
    /// }"#;
    ///
    /// let table = Query::parse(body, None)?;
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.get(0).unwrap().exon_starts(), "10,20,");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(body: &str, limit: Option<usize>) -> Result<Table> {
        let mut response = serde_json::from_str::<Value>(body).map_err(Error::Json)?;

        if let Some(message) = response.get(ERROR_KEY) {
            let message = match message {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };

            return Err(Error::Api(message));
        }

        if limit.is_none() && response.get(TRUNCATED_KEY) == Some(&Value::Bool(true)) {
            warn!("query: the server truncated the response; the table is incomplete");
        }

        let rows = response
            .get_mut(TABLE_NAME)
            .map(Value::take)
            .ok_or_else(|| Error::MissingTable(TABLE_NAME.to_string()))?;
        let rows = serde_json::from_value::<Rows>(rows).map_err(Error::Json)?;

        let table = rows
            .into_rows()
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(Row::into_record)
            .collect::<Table>();

        Ok(table)
    }
}

impl Source for Query {
    fn fetch(&self, reference: &Reference, limit: Option<usize>) -> Result<Table> {
        let url = reference.query_url(limit);
        info!("query: fetching {url}");

        let body = source::get(&self.client, &url)?
            .text()
            .map_err(Error::Http)?;
        let table = Self::parse(&body, limit)?;

        debug!("query: read {} transcripts", table.len());
        Ok(table)
    }
}
