//! Error types for the BPE encoder.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the encoder crates.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// A merge-rule or vocabulary resource is malformed
    #[error("Load error: {0}")]
    Load(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// The merge engine produced a symbol the vocabulary does not know.
    ///
    /// The rank table and the vocabulary disagree with each other. Only the
    /// current call fails; the encoder stays usable.
    #[error("Vocabulary mismatch: symbol {symbol:?} is not in the vocabulary")]
    VocabularyMismatch { symbol: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenizerError {
    /// Wrap an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }

    /// Whether this error happened while building an encoder rather than
    /// while encoding a single input.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Load(_) | Self::Io { .. } | Self::InvalidConfig(_))
    }
}

/// Result type alias for encoder operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
