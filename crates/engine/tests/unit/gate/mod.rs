//! # Predictor Unit Tests
//!
//! This module aggregates the suites that exercise the gate's public
//! operations directly over private heap regions.





/// The training rule: directions, dead zone, clamping, and reset.
pub mod train;
