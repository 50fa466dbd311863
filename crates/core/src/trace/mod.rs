//! Pipeline trace reconstruction.
//!
//! Raw log lines flow strictly forward through this module:
//! 1. **Classification:** [`classify`] tags each line with a [`Stage`] and fetch sequence number.
//! 2. **Buffering:** [`buffers`] holds events that have not yet been claimed by a retirement.
//! 3. **Reconciliation:** [`engine`] drains and correlates buffered events on every retire event.
//! 4. **Emission:** [`emit`] formats the reconstructed records in the `O3PipeView` schema.

/// Stage queues and keyed event pools.
pub mod buffers;

/// Line classifier and store-completion pre-scan.
pub mod classify;

/// Record emitter for the `O3PipeView` text schema.
pub mod emit;

/// Reconciliation engine driven by retire events.
pub mod engine;

/// Classified trace events and pipeline stage tags.
pub mod event;

pub use buffers::{EventPool, InOrderQueue, StoreCompletion, StoreQueue};
pub use classify::LineClassifier;
pub use emit::RecordEmitter;
pub use engine::Reconciler;
pub use event::{Stage, TraceEvent};
