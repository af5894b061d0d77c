//! Error types for refbuilder.
//!
//! Library crates use [`RefBuilderError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all refbuilder operations.
#[derive(Debug, thiserror::Error)]
pub enum RefBuilderError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A line of the API list could not be classified.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Precondition on inputs or destination not met.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RefBuilderError>;

impl RefBuilderError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error for a 1-based input line number.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
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
        let err = RefBuilderError::config("bad toml");
        assert_eq!(err.to_string(), "config error: bad toml");

        let err = RefBuilderError::parse(7, "struct marker must end the line");
        assert_eq!(
            err.to_string(),
            "parse error on line 7: struct marker must end the line"
        );
    }

    #[test]
    fn io_error_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = RefBuilderError::io("api_classes.txt", source);
        let msg = err.to_string();
        assert!(msg.contains("api_classes.txt"));
        assert!(msg.contains("gone"));
    }
}
