//! Error types for banlist_tools

use std::fmt;
use std::path::PathBuf;
use ygo_common::LookupError;

/// Unified error type for the maintenance commands
#[derive(Debug)]
pub enum ToolError {
    /// Reading or writing an input/output file failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Loading a conf list or mapping file failed
    Lookup(LookupError),
    /// Card database operation failed
    Database(rusqlite::Error),
    /// CSV export could not be read
    Csv(csv::Error),
    /// A required input file does not exist
    MissingInput(PathBuf),
    /// An input file exists but its content is unusable
    InvalidInput(String),
}

impl ToolError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            ToolError::Lookup(e) => write!(f, "{}", e),
            ToolError::Database(e) => write!(f, "Database error: {}", e),
            ToolError::Csv(e) => write!(f, "CSV error: {}", e),
            ToolError::MissingInput(path) => {
                write!(f, "Input file not found: {}", path.display())
            }
            ToolError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Io { source, .. } => Some(source),
            ToolError::Lookup(e) => Some(e),
            ToolError::Database(e) => Some(e),
            ToolError::Csv(e) => Some(e),
            ToolError::MissingInput(_) => None,
            ToolError::InvalidInput(_) => None,
        }
    }
}

impl From<LookupError> for ToolError {
    fn from(err: LookupError) -> Self {
        ToolError::Lookup(err)
    }
}

impl From<rusqlite::Error> for ToolError {
    fn from(err: rusqlite::Error) -> Self {
        ToolError::Database(err)
    }
}

impl From<csv::Error> for ToolError {
    fn from(err: csv::Error) -> Self {
        ToolError::Csv(err)
    }
}

/// Result alias for banlist_tools operations
pub type Result<T> = std::result::Result<T, ToolError>;
