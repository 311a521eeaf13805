//! Error types for statedocs.
//!
//! Library crates use [`StateDocsError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all statedocs operations.
#[derive(Debug, thiserror::Error)]
pub enum StateDocsError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching the directory or a detail page.
    #[error("network error: {0}")]
    Network(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (missing column, invalid value, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A tabular input file does not exist.
    #[error("could not find input file '{}'", path.display())]
    InputNotFound { path: PathBuf },

    /// CSV reading or writing error.
    #[error("csv error: {0}")]
    Csv(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StateDocsError>;

impl StateDocsError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = StateDocsError::config("base_url is not a valid URL");
        assert_eq!(err.to_string(), "config error: base_url is not a valid URL");

        let err = StateDocsError::validation("missing column 'state'");
        assert!(err.to_string().contains("missing column"));
    }

    #[test]
    fn input_not_found_names_the_file() {
        let err = StateDocsError::InputNotFound {
            path: PathBuf::from("state-boards-of-education.csv"),
        };
        assert_eq!(
            err.to_string(),
            "could not find input file 'state-boards-of-education.csv'"
        );
    }
}
