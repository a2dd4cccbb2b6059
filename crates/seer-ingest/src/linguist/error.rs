//! Error types for each stage of the catalog load

use std::time::Duration;
use thiserror::Error;

/// Fetching the remote catalog failed
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid catalog URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch catalog from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read catalog body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The catalog document, or one of its entries, could not be decoded
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Catalog is not a mapping of language names to definitions: {0}")]
    Document(#[source] serde_yaml::Error),

    #[error("Failed to decode catalog entry '{key}': {source}")]
    Entry {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A definition cannot be represented as a storage row
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Language '{language}' has unrecognized type '{category}' (expected data, programming, markup or prose)")]
    UnknownCategory { language: String, category: String },
}

/// Misuse of, or terminal failure inside, a bulk-copy row source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopySourceError {
    #[error("No current row: cursor is {state}")]
    InvalidPosition { state: &'static str },

    #[error("Row {index} was already yielded")]
    AlreadyTaken { index: usize },

    #[error("Row index {index} does not fit in a 32-bit row identifier")]
    IdentifierOverflow { index: usize },
}

/// The bulk copy into the target table failed
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Bulk copy into '{table}' failed: {source}")]
    Database {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Row source aborted the bulk copy at row {index}: {source}")]
    Source {
        index: usize,
        #[source]
        source: CopySourceError,
    },
}

/// Counting the rows already in the target table failed
#[derive(Error, Debug)]
#[error("Failed to count rows in '{table}': {source}")]
pub struct CountError {
    pub table: String,
    #[source]
    pub source: sqlx::Error,
}

/// Any failure of an ingestion run. All of them are terminal; nothing retries.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Count(#[from] CountError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Ingestion did not finish within {0:?}")]
    Timeout(Duration),
}
