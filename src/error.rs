// src/error.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fetch layer could not produce a document. Nothing downstream may parse a partial body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out: {url}")]
    Timeout { url: String },

    #[error("blocked by anti-bot protection (HTTP {status}) at {url}")]
    Blocked { url: String, status: u16 },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("empty response body from {url}")]
    Empty { url: String },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("document cache I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Which logical table a locator was looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Profile,
    Bouts,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Profile => f.write_str("profile"),
            TableKind::Bouts => f.write_str("bout history"),
        }
    }
}

/// Soft, per-table: recorded in `Extraction::missing`, never fatal on its own.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{0} table not found by any locator")]
pub struct TableNotFound(pub TableKind);

/// Hard extraction failures. Everything else degrades to partial data.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// Nothing to read at all (blank body).
    #[error("document is empty")]
    EmptyDocument,

    /// A document was present, but neither table could be located.
    #[error("neither the profile table nor the bout table could be located")]
    NoTables,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("no recognizable bout columns in header row: {0:?}")]
    NoKnownColumns(Vec<String>),

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(String),
}
