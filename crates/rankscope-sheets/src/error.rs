//! Error types for the Sheets adapter.

use thiserror::Error;

/// Errors that can occur talking to the Google Sheets API.
#[derive(Error, Debug)]
pub enum SheetsError {
    /// Credentials loading or request signing error
    #[error("credentials error: {0}")]
    Credentials(String),

    /// API error with status code
    #[error("Sheets API error: status {status}, {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message body
        message: String,
    },

    /// Worksheet missing from the spreadsheet
    #[error("worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for Sheets operations.
pub type Result<T> = std::result::Result<T, SheetsError>;
