//! Error types for validation runs.

use rowcheck_core::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop a run.
///
/// Rejected rows are not errors; they are routed to the rejected sink.
#[derive(Debug, Error)]
pub enum RunError {
    /// Rule configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Header column count disagrees with the selected rule set
    #[error("Number of fields in input does not match {rule_set} config. Got: {actual} Expected: {expected}")]
    ConfigMismatch {
        rule_set: String,
        expected: usize,
        actual: usize,
    },

    /// Input contained no header record
    #[error("Input has no header record")]
    MissingHeader,

    /// File could not be opened or flushed
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading, writing or flushing a record stream failed
    #[error("Record I/O failed: {0}")]
    Stream(#[from] std::io::Error),
}

impl RunError {
    /// Creates a new config mismatch error.
    pub fn config_mismatch(rule_set: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ConfigMismatch {
            rule_set: rule_set.into(),
            expected,
            actual,
        }
    }

    /// Creates a new I/O error for a named file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
