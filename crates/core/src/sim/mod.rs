//! Input handling for a conversion run.

/// Trace file loader and line splitting.
pub mod loader;

pub use loader::{load_trace, split_lines};
