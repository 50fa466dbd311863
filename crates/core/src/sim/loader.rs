//! Trace Loader.
//!
//! The whole log is read into memory before processing: store completions are
//! logged after their stores retire, so pairing them needs full-file visibility.

use std::fs;
use std::path::Path;

use crate::common::error::{ConvertError, Result};

/// Reads a trace file into memory.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the file cannot be read or is not UTF-8.
pub fn load_trace(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded trace");
    Ok(text)
}

/// Splits a loaded trace into lines, dropping `\n` and `\r\n` terminators.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
