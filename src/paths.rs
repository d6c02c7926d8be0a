//! Path validation helpers for digest requests.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{self, ErrorKind};
use std::os::unix::ffi::OsStringExt;
use std::path::{Path, PathBuf};

use crate::error::DigestError;

/// Check that a path names an existing regular file.
///
/// Symlinks are followed, so a link to a regular file is accepted.
pub(crate) fn validate_regular_file(path: &Path) -> Result<(), DigestError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(DigestError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(err) => return Err(DigestError::io(path, err)),
    };
    if !metadata.is_file() {
        return Err(DigestError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Keep only the startup paths that exist and are regular files.
pub(crate) fn accept_startup_paths<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths
        .into_iter()
        .map(Into::into)
        .filter(|path| validate_regular_file(path).is_ok())
        .collect()
}

/// Turn one raw stdin line (without its `\n`) into a dropped path.
///
/// Only a trailing `\r` is stripped; other bytes, including surrounding
/// spaces and non-UTF-8 sequences, stay part of the name. Empty lines yield
/// `None`.
pub(crate) fn dropped_path(mut line: Vec<u8>) -> Option<PathBuf> {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    if line.is_empty() {
        return None;
    }
    Some(PathBuf::from(OsString::from_vec(line)))
}

/// Join a relative path onto the current directory without touching symlinks.
pub(crate) fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(env::current_dir()?.join(path))
}
