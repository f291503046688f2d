// Error types shared by the import pipeline. Each variant matches one way
// a run can stop; the binary maps them to console output and exit codes.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop an import run.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Bad command line input (blank token, path that is not a directory).
    #[error("{0}")]
    InvalidInput(String),

    /// Nothing to work with, e.g. no file matched the daily note pattern.
    #[error("{0}")]
    EmptyResult(String),

    /// The graph listing call did not return 200. The run exits with
    /// `status` as its process exit code.
    #[error("Failed to list graphs: {status} {status_text}")]
    GraphListing { status: u16, status_text: String },

    /// An append call did not return 200. `payload` is the JSON body that
    /// was submitted, kept for diagnostics.
    #[error("Failed to append daily note {}: {status_text}", .file.display())]
    ImportFailure {
        file: PathBuf,
        status_text: String,
        payload: String,
    },

    /// A broken assumption inside the pipeline. Never expected in a
    /// correct run.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console output failed: {0}")]
    Console(#[source] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl ImportError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ImportError::GraphListing { status, .. } => i32::from(*status),
            _ => 1,
        }
    }
}

pub type Result<T, E = ImportError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_listing_exit_code_is_http_status() {
        let err = ImportError::GraphListing {
            status: 401,
            status_text: "Unauthorized".into(),
        };
        assert_eq!(err.exit_code(), 401);
        assert_eq!(err.to_string(), "Failed to list graphs: 401 Unauthorized");
    }

    #[test]
    fn other_errors_exit_with_one() {
        assert_eq!(ImportError::EmptyResult("none".into()).exit_code(), 1);
        assert_eq!(ImportError::Internal("bad".into()).exit_code(), 1);
    }
}
