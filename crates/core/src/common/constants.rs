//! Output Schema Constants.
//!
//! Literals of the gem5 `O3PipeView` text format that the emitter writes when a
//! stage has no matching event in the input log.

/// Prefix of every line understood by the `o3-pipeview` visualizer.
pub const PIPEVIEW_PREFIX: &str = "O3PipeView";

/// Timestamp reported for a stage the traced core never reached or never logs.
pub const ZERO_TIMESTAMP: &str = "0";

/// Terminal retire line for an instruction that was squashed before commit.
pub const SQUASHED_RETIRE: &str = "O3PipeView:retire: 0:store: 0";
