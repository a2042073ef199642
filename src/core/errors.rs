//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cyclomap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Parsing errors
    #[error("parse error in {file}:{line}: {message}")]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Traversal consistency errors. A nested unit's subtree must be
    /// excluded from its parent's count exactly once; anything else means
    /// the tree shape is malformed and no partial score is reported.
    #[error("traversal inconsistency: {0}")]
    Traversal(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a parse error with location
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
