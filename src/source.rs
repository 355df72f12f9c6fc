//! Sources of transcript tables.
//!
//! Every way of obtaining a [`Table`] implements [`Source`], so nothing
//! downstream ever needs to know which one was used. For the same reference,
//! each source is expected to yield the same transcripts.

use std::io;

use reqwest::blocking::Client;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;

use crate::transcript::table;
use crate::transcript::Table;
use crate::Reference;

pub mod download;
pub mod file;
pub mod query;

pub use download::Download;
pub use file::File;
pub use query::Query;

/// The user agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to a [`Source`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An HTTP transport error.
    Http(reqwest::Error),

    /// The server answered with a non-success status.
    Status(String, reqwest::StatusCode),

    /// The contact email cannot be sent as a header.
    InvalidEmail(String),

    /// The response body was not valid JSON of the expected shape.
    Json(serde_json::Error),

    /// The query endpoint reported an error.
    Api(String),

    /// The response did not hold the requested table.
    MissingTable(String),

    /// The table could not be read.
    Table(table::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Http(err) => write!(f, "http error: {err}"),
            Error::Status(url, status) => write!(f, "request to {url} failed with status `{status}`"),
            Error::InvalidEmail(email) => write!(f, "invalid email: `{email}`"),
            Error::Json(err) => write!(f, "json error: {err}"),
            Error::Api(message) => write!(f, "api error: {message}"),
            Error::MissingTable(name) => write!(f, "response is missing the `{name}` table"),
            Error::Table(err) => write!(f, "table error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Source
////////////////////////////////////////////////////////////////////////////////////////

/// The capability to produce a transcript table for a reference.
pub trait Source {
    /// Fetches the transcript table for `reference`, keeping at most `limit`
    /// transcripts.
    fn fetch(&self, reference: &Reference, limit: Option<usize>) -> Result<Table>;
}

/// Builds the HTTP client shared by the remote sources.
///
/// When an email is provided, it is sent along as the `From` header so that
/// the server operators know who to contact.
fn client(email: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();

    if let Some(email) = email {
        let value =
            HeaderValue::from_str(email).map_err(|_| Error::InvalidEmail(email.to_string()))?;
        headers.insert(header::FROM, value);
    }

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .map_err(Error::Http)
}

/// Sends a `GET` request and fails on any non-success status.
fn get(client: &Client, url: &str) -> Result<reqwest::blocking::Response> {
    let response = client.get(url).send().map_err(Error::Http)?;

    if !response.status().is_success() {
        return Err(Error::Status(url.to_string(), response.status()));
    }

    Ok(response)
}
