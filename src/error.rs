//! Error types and handling infrastructure for rlpager.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors should provide actionable feedback
//! - **Context preservation**: Include relevant information for debugging
//! - **Separation**: Fatal run errors live in [`PagerError`]; recoverable
//!   navigation mistakes live in [`NavigationError`]

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rlpager operations.
///
/// Covers configuration, discovery, indexing and page reading failures. None of
/// these are produced by user navigation input.
#[derive(Error, Debug)]
pub enum PagerError {
    /// File system related errors (open, stat, seek, read)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is neither a regular file nor a directory
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Invalid configuration or command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Filter pattern could not be compiled
    #[error("Invalid filter: {message}")]
    FilterError { message: String },

    /// The requested start page does not exist in the first catalog file
    #[error("Page number cannot be greater than {max} (requested {page})")]
    InitialPageOutOfRange { page: usize, max: usize },

    /// The indexing barrier could not collect every worker result
    #[error("Indexing failed: {message}")]
    IndexingFailed { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for rlpager operations.
pub type Result<T> = std::result::Result<T, PagerError>;

impl PagerError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a FilterError with a descriptive message
    pub fn filter(message: impl Into<String>) -> Self {
        Self::FilterError {
            message: message.into(),
        }
    }

    /// Create an IndexingFailed error with a descriptive message
    pub fn indexing(message: impl Into<String>) -> Self {
        Self::IndexingFailed {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to PagerError
impl From<std::io::Error> for PagerError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

/// Recoverable errors raised while interpreting a navigation command.
///
/// The navigation loop reports these and keeps its state unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("A valid page number or id,page pair is required")]
    InvalidCommand,

    #[error("Page number cannot be smaller than 1")]
    PageTooSmall,

    #[error("Page number cannot be greater than {max}")]
    PageTooLarge { max: usize },

    #[error("File id cannot be smaller than 1")]
    FileIdTooSmall,

    #[error("File id cannot be greater than {max}")]
    FileIdTooLarge { max: usize },

    /// The page could not be read back from disk
    #[error("Could not render page: {0}")]
    Render(String),
}
