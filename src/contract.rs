//! Output contract applied to every reported digest.

use serde::{Serialize, Serializer};
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::error::DigestError;
use crate::hashing::Algorithm;

/// Separator between path and digest in text output.
pub(crate) const RESULT_SEPARATOR: &str = " → ";

/// One hashed file, ready for display.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Report {
    #[serde(serialize_with = "serialize_display_path")]
    pub(crate) path: PathBuf,
    pub(crate) algorithm: Algorithm,
    pub(crate) digest: String,
}

impl Report {
    /// Render the canonical `<absolute-path> → <hex-digest>` line.
    pub(crate) fn line(&self) -> String {
        result_line(&self.path, &self.digest)
    }
}

fn result_line(path: &Path, digest: &str) -> String {
    format!("{}{RESULT_SEPARATOR}{digest}", path.display())
}

// Non-UTF-8 bytes become U+FFFD, matching the text line.
fn serialize_display_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&path.display())
}

/// Failure report emitted on the notification channel.
#[derive(Serialize, Debug)]
pub(crate) struct ErrorReport {
    pub(crate) code: String,
    pub(crate) message: String,
    pub(crate) details: Vec<String>,
}

/// Build a failure report with the error's source chain as details.
pub(crate) fn error_report(err: &DigestError) -> ErrorReport {
    let mut details = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        details.push(cause.to_string());
        source = cause.source();
    }
    ErrorReport {
        code: err.code().to_string(),
        message: err.to_string(),
        details,
    }
}
