//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config generation or account record error.
    #[error(transparent)]
    Config(#[from] wgcf_config::ConfigError),

    /// The account file could not be read.
    #[error("cannot read account file {path}: {source}")]
    ReadAccount {
        /// Account file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP request could not be completed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The user declined a confirmation prompt.
    #[error("aborted by user")]
    Aborted,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
