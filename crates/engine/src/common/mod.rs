//! Common types and constants used throughout the prefetch gate.
//!
//! This module provides the fundamental building blocks shared by every
//! component of the gate. It includes:
//! 1. **Constants:** The fixed perceptron geometry, counter bounds, and
//!    policy thresholds.
//! 2. **Error Handling:** The typed error taxonomy that replaces in-band
//!    sentinel return values.

/// Perceptron geometry and policy constants.
pub mod constants;

/// Error types for gate operations and region construction.
pub mod error;

pub use constants::{PERC_ENTRIES, PERC_FEATURES, TRAIN_INPUTS};
pub use error::GateError;
