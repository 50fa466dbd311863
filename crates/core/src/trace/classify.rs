//! Line Classifier.
//!
//! Tags raw log lines with the pipeline stage they report. It performs:
//! 1. **Separator detection:** Locates the fetch sequence number separator in the
//!    first line and caches its position for the whole file.
//! 2. **Stage matching:** Substring search for the stage keywords, in fixed precedence.
//! 3. **Store pre-scan:** Collects every store-completion line up front, because a
//!    store completes after it retires and cannot be paired in forward order.

use crate::common::error::{ConvertError, Result};
use crate::config::TraceFormatConfig;
use crate::trace::buffers::{StoreCompletion, StoreQueue};
use crate::trace::event::{Stage, TraceEvent};

/// Stage keywords in match precedence. The first keyword found in a line wins.
const STAGE_KEYWORDS: [Stage; 5] = [
    Stage::Fetch,
    Stage::Decode,
    Stage::Issue,
    Stage::Complete,
    Stage::Retire,
];

/// Separates the timestamp from the stage name in a store-completion line.
const TIMESTAMP_DELIMITER: char = ':';

/// Classifies annotated log lines using a separator position detected from line 1.
#[derive(Debug, Clone)]
pub struct LineClassifier<'c> {
    format: &'c TraceFormatConfig,
    /// Byte offset of the separator, identical on every line of the file.
    separator_pos: usize,
}

impl<'c> LineClassifier<'c> {
    /// Detects the separator position from the first line of the log.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingSeparator`] if the first line carries no
    /// separator, which means the log was not generated with sequence numbers.
    pub fn detect(first_line: &str, format: &'c TraceFormatConfig) -> Result<Self> {
        let separator_pos =
            first_line
                .find(format.separator)
                .ok_or_else(|| ConvertError::MissingSeparator {
                    separator: format.separator,
                    line: first_line.to_string(),
                })?;
        Ok(Self {
            format,
            separator_pos,
        })
    }

    /// Returns the cached separator byte offset.
    pub const fn separator_pos(&self) -> usize {
        self.separator_pos
    }

    /// Returns the stage a line reports, or `None` for unannotated chatter.
    ///
    /// Store-completion lines only classify as [`Stage::StoreComp`] when no stage
    /// keyword matches; the forward pass ignores them either way.
    pub fn stage_of(&self, line: &str) -> Option<Stage> {
        STAGE_KEYWORDS
            .into_iter()
            .find(|stage| line.contains(stage.name()))
            .or_else(|| self.is_store_completion(line).then_some(Stage::StoreComp))
    }

    /// Returns true if the line reports a store completion.
    pub fn is_store_completion(&self, line: &str) -> bool {
        line.contains(self.format.store_completion_marker.as_str())
    }

    /// Parses the fetch sequence number in front of the separator.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::BadSequenceNumber`] if the prefix is not a
    /// non-negative decimal integer.
    pub fn fseq(&self, line_no: usize, line: &str) -> Result<u64> {
        line.get(..self.separator_pos)
            .and_then(|prefix| prefix.trim().parse().ok())
            .ok_or_else(|| ConvertError::BadSequenceNumber {
                line_no,
                line: line.to_string(),
            })
    }

    /// Strips the sequence number and separator token, leaving the text to emit.
    pub fn suffix<'a>(&self, line: &'a str) -> &'a str {
        self.separator_pos
            .checked_add(self.format.separator_width)
            .and_then(|start| line.get(start..))
            .unwrap_or("")
    }

    /// Classifies one line. Lines matching no stage return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::BadSequenceNumber`] if a line that names a stage
    /// has no parsable sequence number.
    pub fn classify<'a>(&self, line_no: usize, line: &'a str) -> Result<Option<TraceEvent<'a>>> {
        let Some(stage) = self.stage_of(line) else {
            return Ok(None);
        };
        Ok(Some(TraceEvent {
            fseq: self.fseq(line_no, line)?,
            stage,
            line_no,
            line,
            suffix: self.suffix(line),
        }))
    }

    /// Collects every store-completion line of the log, in log order.
    ///
    /// The timestamp delimiter position is taken from the first store-completion
    /// line and reused for the rest, like the separator.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::BadSequenceNumber`] if a store-completion line has
    /// no parsable sequence number.
    pub fn store_completions<'a>(&self, lines: &[&'a str]) -> Result<StoreQueue<'a>> {
        let mut queue = StoreQueue::default();
        let mut timestamp_pos: Option<Option<usize>> = None;

        for (idx, &line) in lines.iter().enumerate() {
            if !self.is_store_completion(line) {
                continue;
            }
            let line_no = idx + 1;
            let pos = *timestamp_pos.get_or_insert_with(|| line.find(TIMESTAMP_DELIMITER));
            let event = TraceEvent {
                fseq: self.fseq(line_no, line)?,
                stage: Stage::StoreComp,
                line_no,
                line,
                suffix: self.suffix(line),
            };
            let timestamp = pos
                .and_then(|p| line.get(p + TIMESTAMP_DELIMITER.len_utf8()..))
                .unwrap_or(event.suffix)
                .trim();
            queue.push(StoreCompletion { event, timestamp });
        }

        tracing::debug!(stores = queue.len(), "store-completion pre-scan finished");
        Ok(queue)
    }
}
