use std::path::PathBuf;

use thiserror::Error;

use crate::providers::System;

pub type Result<T> = std::result::Result<T, AuditError>;

/// Everything that can abort an audit run. None of these are recovered
/// locally; they travel up to `main`, which prints them and exits non-zero.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Transport failure or non-2xx status. The reqwest message is kept as is.
    #[error("API request to {system} {endpoint} failed: {source}")]
    Request {
        system: System,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed response from {system} {endpoint}: {reason}")]
    MalformedResponse {
        system: System,
        endpoint: String,
        reason: String,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuditError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AuditError::Io {
            path: path.into(),
            source,
        }
    }
}
