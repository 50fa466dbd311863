//! Conversion Driver.
//!
//! Runs one conversion end to end. It performs:
//! 1. **Detection:** Caches the sequence-number separator position from line 1.
//! 2. **Pre-scan:** Collects store completions from the whole log.
//! 3. **Forward pass:** Classifies each line and feeds it to the reconciliation engine.
//! 4. **Teardown:** Flushes in-flight instructions and returns the run statistics.

use std::io::Write;

use crate::common::error::{ConvertError, Result};
use crate::config::Config;
use crate::sim::loader::split_lines;
use crate::stats::ConvertStats;
use crate::trace::classify::LineClassifier;
use crate::trace::engine::Reconciler;

/// Converts interleaved core logs into `O3PipeView` traces.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: Config,
}

impl Converter {
    /// Creates a converter for the given configuration.
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Converts a whole in-memory log, writing the reconstructed trace to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::EmptyInput`] or [`ConvertError::MissingSeparator`]
    /// before any output is written, and any consistency error of the engine
    /// (store mismatch, decode skip) as soon as it is detected.
    pub fn run<W: Write>(&self, text: &str, out: W) -> Result<ConvertStats> {
        let lines = split_lines(text);
        let first = lines.first().ok_or(ConvertError::EmptyInput)?;
        let classifier = LineClassifier::detect(first, &self.config.trace)?;
        let stores = classifier.store_completions(&lines)?;
        tracing::debug!(
            lines = lines.len(),
            separator_pos = classifier.separator_pos(),
            "starting forward pass"
        );

        let mut engine = Reconciler::new(&self.config, stores, out);
        for (idx, &line) in lines.iter().enumerate() {
            if let Some(event) = classifier.classify(idx + 1, line)? {
                engine.observe(event)?;
            }
        }

        let (mut stats, _) = engine.finish()?;
        stats.lines_scanned = lines.len() as u64;
        tracing::info!(
            records = stats.records_emitted,
            retired = stats.retired,
            squashed = stats.squashed + stats.flushed,
            "conversion finished"
        );
        Ok(stats)
    }

    /// Converts a log into an in-memory string.
    ///
    /// # Errors
    ///
    /// See [`Converter::run`].
    pub fn run_to_string(&self, text: &str) -> Result<String> {
        let mut out = Vec::new();
        let _ = self.run(text, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
