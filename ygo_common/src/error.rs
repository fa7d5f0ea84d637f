//! Error types for card lookups and list files

use std::path::PathBuf;

/// Errors raised by lookup sources and list file loaders.
///
/// The resolver never lets these escape: a failing source is logged and
/// counted as a non-match.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Failed to parse a JSON body or file
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Card database query failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Card database has none of the known name columns
    #[error("No card name column found in {}", .0.display())]
    MissingNameField(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid card id: {0:?}")]
    InvalidCardId(String),
}

impl LookupError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LookupError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;
