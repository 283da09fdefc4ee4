//! Typed errors for each stage of the collector.
//!
//! The poll loop consumes [`PollError`] and never propagates it; export
//! failures surface as [`ExportError`] to whoever triggered the export.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to weather API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather API responded with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse weather API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather API response has no current-hour value for `{0}`")]
    MissingHourly(&'static str),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("reading {id} has an invalid {column}: {reason}")]
    InvalidValue {
        id: i64,
        column: &'static str,
        reason: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to load readings for export: {0}")]
    Store(#[from] StoreError),

    #[error("failed to write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one failed poll tick.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("failed to fetch weather: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to save reading: {0}")]
    Store(#[from] StoreError),
}
