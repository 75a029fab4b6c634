//! Error types for taxon.

use thiserror::Error;

/// Result type alias using taxon's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for taxon operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Remote classification failed (service error, empty response)
    #[error("Classification error: {0}")]
    Classification(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Remote response was malformed (not JSON, not an array, bad element)
    #[error("Format error: {0}")]
    Format(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// History log read or write failed
    #[error("History error: {0}")]
    History(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Export rendering failed
    #[error("Export error: {0}")]
    Export(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::InvalidInput(format!("CSV parsing error: {}", e))
    }
}
