//! Failure taxonomy for digest requests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Typed failure returned by the digest engine.
#[derive(Error, Debug)]
pub(crate) enum DigestError {
    /// Path does not exist.
    #[error("{} was not found", .path.display())]
    NotFound { path: PathBuf },

    /// Path exists but is a directory or some other non-regular entry.
    #[error("{} is not a regular file", .path.display())]
    NotAFile { path: PathBuf },

    /// Open, stat, or read failed for a reason other than absence.
    #[error("failed to read {}: {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Hashing primitive could not be set up.
    #[error("digest algorithm '{name}' is not available")]
    AlgorithmUnavailable { name: String },
}

impl DigestError {
    /// Stable machine-readable code for reports.
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::NotAFile { .. } => "not_a_file",
            Self::IoFailure { .. } => "io_failure",
            Self::AlgorithmUnavailable { .. } => "algorithm_unavailable",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }
}
