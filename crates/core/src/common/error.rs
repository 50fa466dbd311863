//! Conversion Error definitions.
//!
//! Every error in this module is fatal to a run: a malformed trace points at a
//! logging bug in the simulator that must be fixed upstream, so no recovery is
//! attempted. Expected steady-state outcomes (an instruction that never issued,
//! a squashed instruction) are not errors and are reported as zero placeholders
//! by the emitter instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::trace::event::Stage;

/// Fatal conditions raised while reconstructing a pipeline trace.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input contains no lines at all.
    #[error("input trace is empty")]
    EmptyInput,

    /// The first line carries no fetch sequence number separator.
    ///
    /// The separator position is detected once from line 1, so a missing
    /// separator there means the log was not produced with sequence-number
    /// annotations enabled.
    #[error("couldn't find fseq number separator {separator:?} in first line {line:?}; has the file been properly generated?")]
    MissingSeparator {
        /// Separator character that was searched for.
        separator: char,
        /// The offending first line.
        line: String,
    },

    /// A classified line does not start with a decimal fetch sequence number.
    #[error("line {line_no}: expected a fetch sequence number before the separator in {line:?}")]
    BadSequenceNumber {
        /// One-based line number in the input.
        line_no: usize,
        /// The offending line.
        line: String,
    },

    /// A retiring store does not own the next queued store-completion event.
    #[error("wrong store entry for retiring store {fseq}:\n  retire: {retire}\n  store:  {store}")]
    StoreMismatch {
        /// Fetch sequence number of the retiring store.
        fseq: u64,
        /// Raw retire line.
        retire: String,
        /// Raw store-completion line at the head of the queue.
        store: String,
    },

    /// A retiring store found no store-completion event left to pair with.
    #[error("no store-completion event left for retiring store {fseq}: {retire}")]
    MissingStoreCompletion {
        /// Fetch sequence number of the retiring store.
        fseq: u64,
        /// Raw retire line.
        retire: String,
    },

    /// An issue or complete event exists for an instruction that never decoded.
    #[error("found {stage} time stamp for instruction {fseq} with no corresponding decode")]
    DecodeSkip {
        /// Fetch sequence number of the instruction.
        fseq: u64,
        /// Out-of-order stage the stray event was logged by.
        stage: Stage,
    },

    /// A retiring instruction's decode event is not at the head of the decode queue.
    #[error("retiring instruction {fseq} has no decode event at the head of the decode queue (head: {decode:?})")]
    DecodeMismatch {
        /// Fetch sequence number of the retiring instruction.
        fseq: u64,
        /// Raw line at the head of the decode queue, if any.
        decode: Option<String>,
    },

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A trace, configuration, or output file could not be opened or read.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Writing the reconstructed trace failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Result type used throughout the converter.
pub type Result<T> = std::result::Result<T, ConvertError>;
