//! Configuration system for the trace converter.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** The annotation format emitted by the traced core (separator, store markers).
//! 2. **Structures:** Hierarchical config for the input trace format and reconciliation policy.
//! 3. **Loading:** JSON deserialization with every field optional.
//!
//! The CLI uses `Config::default()` unless a JSON file is passed with `--config`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{ConvertError, Result};

/// Default configuration constants for the converter.
mod defaults {
    /// Character terminating the fetch sequence number on every annotated line.
    pub const SEPARATOR: char = ';';

    /// Width of the separator token (the `;` plus the following space).
    ///
    /// The emitted stage text starts this many bytes after the separator position.
    pub const SEPARATOR_WIDTH: usize = 2;

    /// Substring identifying a store-completion line.
    pub const STORE_COMPLETION_MARKER: &str = "store-comp";

    /// Mnemonic substrings identifying a store in the fetch line's disassembly.
    pub const STORE_MNEMONICS: &[&str] = &["sw ", "sd ", "sh ", "sb ", "amo"];

    /// Terminate still-pending instructions once the input is exhausted.
    pub const FLUSH_PENDING: bool = true;
}

/// Root configuration for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Config {
    /// Annotation format of the input log.
    #[serde(default)]
    pub trace: TraceFormatConfig,

    /// Reconciliation policy.
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

impl Config {
    /// Parses a configuration from a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Config`] if the document is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Io`] if the file cannot be read, or
    /// [`ConvertError::Config`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Format of the sequence-number annotations in the input log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraceFormatConfig {
    /// Character that ends the fetch sequence number prefix
    #[serde(default = "TraceFormatConfig::default_separator")]
    pub separator: char,

    /// Bytes skipped after the separator position before the emitted stage text begins
    #[serde(default = "TraceFormatConfig::default_separator_width")]
    pub separator_width: usize,

    /// Substring marking a store-completion line
    #[serde(default = "TraceFormatConfig::default_store_completion_marker")]
    pub store_completion_marker: String,

    /// Substrings of a fetch line that identify the instruction as a store
    #[serde(default = "TraceFormatConfig::default_store_mnemonics")]
    pub store_mnemonics: Vec<String>,
}

impl TraceFormatConfig {
    fn default_separator() -> char {
        defaults::SEPARATOR
    }

    fn default_separator_width() -> usize {
        defaults::SEPARATOR_WIDTH
    }

    fn default_store_completion_marker() -> String {
        defaults::STORE_COMPLETION_MARKER.to_string()
    }

    fn default_store_mnemonics() -> Vec<String> {
        defaults::STORE_MNEMONICS
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Returns true if `fetch_line` disassembles to a store or AMO.
    pub fn is_store(&self, fetch_line: &str) -> bool {
        self.store_mnemonics
            .iter()
            .any(|m| fetch_line.contains(m.as_str()))
    }
}

impl Default for TraceFormatConfig {
    fn default() -> Self {
        Self {
            separator: Self::default_separator(),
            separator_width: Self::default_separator_width(),
            store_completion_marker: Self::default_store_completion_marker(),
            store_mnemonics: Self::default_store_mnemonics(),
        }
    }
}

/// Policy knobs for the reconciliation engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReconcileConfig {
    /// Emit squashed records for instructions still in flight when the log ends.
    /// When false, trailing unretired instructions are dropped silently.
    #[serde(default = "ReconcileConfig::default_flush_pending")]
    pub flush_pending: bool,
}

impl ReconcileConfig {
    fn default_flush_pending() -> bool {
        defaults::FLUSH_PENDING
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            flush_pending: Self::default_flush_pending(),
        }
    }
}
