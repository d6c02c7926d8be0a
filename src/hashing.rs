//! Streaming digest engine for file checks.
//!
//! A request moves through validation, chunked streaming into a fresh
//! accumulator, finalization, and lowercase hex encoding. Nothing is shared
//! between requests, so calls for different files can run on any thread.

use md5::Md5;
use serde::Serialize;
use sha2::digest::Output;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::DigestError;
use crate::paths::validate_regular_file;

/// Bytes pulled from the stream per accumulator update.
pub(crate) const CHUNK_SIZE: usize = 64 * 1024;

/// Digest algorithms the engine can run.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Algorithm {
    #[default]
    Md5,
    Sha256,
}

impl Algorithm {
    /// Parse a user-supplied algorithm name (case-insensitive).
    pub(crate) fn from_name(name: &str) -> Result<Self, DigestError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            _ => Err(DigestError::AlgorithmUnavailable {
                name: name.to_string(),
            }),
        }
    }

    /// Lowercase name used in logs and JSON reports.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }

    /// Length of the hex encoding of one digest.
    pub(crate) fn hex_len(self) -> usize {
        match self {
            Self::Md5 => <Md5 as Digest>::output_size() * 2,
            Self::Sha256 => <Sha256 as Digest>::output_size() * 2,
        }
    }
}

/// Compute the MD5 of a file as a 32-character lowercase hex string.
pub(crate) fn compute_file_digest(path: &Path) -> Result<String, DigestError> {
    digest_file::<Md5>(path)
}

/// Compute a file digest with the given algorithm.
pub(crate) fn file_digest(path: &Path, algorithm: Algorithm) -> Result<String, DigestError> {
    let digest = match algorithm {
        Algorithm::Md5 => compute_file_digest(path)?,
        Algorithm::Sha256 => digest_file::<Sha256>(path)?,
    };
    debug_assert_eq!(digest.len(), algorithm.hex_len());
    Ok(digest)
}

// Validation runs before the file is opened: a missing path or a non-regular
// entry fails without acquiring a stream.
fn digest_file<D: Digest>(path: &Path) -> Result<String, DigestError> {
    validate_regular_file(path)?;
    let file = File::open(path).map_err(|err| DigestError::io(path, err))?;
    let digest = digest_reader::<D, _>(file, path)?;
    Ok(hex::encode(digest))
}

/// Stream a reader through a fresh accumulator and finalize it.
///
/// `path` is only used to label failures. A reader that errors mid-stream
/// (including one torn down by its owner) yields `IoFailure`.
pub(crate) fn digest_reader<D: Digest, R: Read>(
    reader: R,
    path: &Path,
) -> Result<Output<D>, DigestError> {
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, reader);
    let mut hasher = D::new();
    loop {
        let chunk = match reader.fill_buf() {
            Ok(chunk) => chunk,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(DigestError::io(path, err)),
        };
        if chunk.is_empty() {
            break;
        }
        hasher.update(chunk);
        let read = chunk.len();
        reader.consume(read);
    }
    Ok(hasher.finalize())
}
