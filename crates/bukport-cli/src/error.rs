//! Error types for the bukport CLI
//!
//! Every failure is fatal for the run; these types exist so the message the
//! user sees says what went wrong and what to check.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// The Diigo API answered with an error payload
    #[error("Diigo API error: {0}. Check your application key and username.")]
    Api(String),

    /// HTTP request failed or returned a non-success status
    #[error("Network request failed: {0}. Check your internet connection and the API URL.")]
    Http(#[from] reqwest::Error),

    /// buku database operation failed
    #[error("buku database error: {0}. Check the database path and that buku is not holding the file open.")]
    Db(#[from] rusqlite::Error),

    /// A bookmark's created_at string could not be parsed
    #[error("Failed to parse bookmark timestamp: {0}")]
    TimestampParse(#[from] chrono::ParseError),

    /// JSON response body could not be decoded
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
