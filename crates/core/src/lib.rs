//! `O3PipeView` trace reconstruction library.
//!
//! An out-of-order core annotates every pipeline-stage printout with the fetch
//! sequence number of the instruction it belongs to. The resulting log interleaves
//! committed and misspeculated instructions in whatever order the stages fired.
//! This crate rebuilds that log into the per-instruction, stage-ordered layout
//! expected by gem5's `o3-pipeview` visualizer. It provides:
//! 1. **Classification:** Tags each raw line with its stage and fetch sequence number.
//! 2. **Buffering:** In-order queues for fetch/decode, keyed pools for issue/complete.
//! 3. **Reconciliation:** Drains buffered events on every retire, terminating squashed instructions.
//! 4. **Emission:** Writes one contiguous record per instruction in program order.
//! 5. **Driver:** Configuration, input loading, and run statistics.

/// Common types and constants (error taxonomy, output schema literals).
pub mod common;
/// Converter configuration (trace format, reconciliation policy).
pub mod config;
/// Top-level run driver tying classifier, engine, and emitter together.
pub mod convert;
/// Input loading.
pub mod sim;
/// Per-run statistics collection and reporting.
pub mod stats;
/// Trace events, stage buffers, reconciliation engine, and record emitter.
pub mod trace;

/// Error type returned by every fallible conversion step.
pub use crate::common::error::{ConvertError, Result};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Run driver; construct with `Converter::new` and call `run`.
pub use crate::convert::Converter;
/// Counters collected over one conversion run.
pub use crate::stats::ConvertStats;
