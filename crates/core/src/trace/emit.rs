//! Record Emitter.
//!
//! Writes reconstructed instruction records in the line schema read by gem5's
//! `o3-pipeview.py`. Matched stages are copied verbatim from the input, which
//! keeps the core's own timestamp token. Stages with no event are written as a
//! schema line carrying an explicit zero timestamp.

use std::io::{self, Write};

use crate::common::constants::{PIPEVIEW_PREFIX, SQUASHED_RETIRE, ZERO_TIMESTAMP};
use crate::trace::event::TraceEvent;

/// Rename is not reported separately by the traced core.
pub const RENAME: &str = "rename";

/// Dispatch is not reported separately by the traced core.
pub const DISPATCH: &str = "dispatch";

/// Writes `O3PipeView` records to an output stream.
#[derive(Debug)]
pub struct RecordEmitter<W: Write> {
    out: W,
    lines_written: u64,
}

impl<W: Write> RecordEmitter<W> {
    /// Wraps an output stream.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            lines_written: 0,
        }
    }

    /// Number of output lines written so far.
    pub const fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Writes a matched event's text after the sequence-number prefix, unchanged.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying writer.
    pub fn stage(&mut self, event: &TraceEvent<'_>) -> io::Result<()> {
        self.line(event.suffix)
    }

    /// Writes a zero-timestamp line for a stage with no matching event.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying writer.
    pub fn placeholder(&mut self, stage: &str) -> io::Result<()> {
        writeln!(self.out, "{PIPEVIEW_PREFIX}:{stage}: {ZERO_TIMESTAMP}")?;
        self.lines_written += 1;
        Ok(())
    }

    /// Writes a store's retire line with the store-completion timestamp spliced in.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying writer.
    pub fn store_retire(&mut self, retire: &TraceEvent<'_>, store_timestamp: &str) -> io::Result<()> {
        let spliced = splice_store_timestamp(retire.suffix, store_timestamp);
        self.line(&spliced)
    }

    /// Writes the terminal retire line of a squashed instruction.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying writer.
    pub fn squashed_retire(&mut self) -> io::Result<()> {
        self.line(SQUASHED_RETIRE)
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Consumes the emitter and returns the wrapped stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.lines_written += 1;
        Ok(())
    }
}

/// Replaces everything after the final `:` of a retire line with the store timestamp.
///
/// A retire line without any `:` is kept whole and the timestamp appended.
pub fn splice_store_timestamp(retire_suffix: &str, store_timestamp: &str) -> String {
    let keep = retire_suffix.rfind(':').map_or(retire_suffix, |end| &retire_suffix[..=end]);
    format!("{keep} {store_timestamp}")
}
