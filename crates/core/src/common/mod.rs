//! Common utilities and types used throughout the converter.
//!
//! This module provides the building blocks shared by every stage of the
//! reconstruction. It includes:
//! 1. **Constants:** Output schema literals and placeholder values.
//! 2. **Error Handling:** The fatal error taxonomy of a conversion run.

/// Output schema constants.
pub mod constants;

/// Error types for conversion failures.
pub mod error;

pub use constants::{PIPEVIEW_PREFIX, SQUASHED_RETIRE, ZERO_TIMESTAMP};
pub use error::{ConvertError, Result};
