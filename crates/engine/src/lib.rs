//! Shared-memory hashed-perceptron prefetch gate.
//!
//! This crate implements an online-learning gate that scores hardware
//! prefetch decisions, with the following:
//! 1. **Gate:** Score queries, outcome-driven training, table reset, and
//!    the caller-owned feature flags.
//! 2. **Region:** The fixed-layout weight-table page and its storage
//!    backends (process-private heap, `mmap`-shared).
//! 3. **Config:** JSON-supplied backend selection and tracing toggles.
//! 4. **Stats:** Operation counters with sectioned reporting.
//! 5. **Common:** Perceptron geometry constants and the error taxonomy.

/// Common types and constants (perceptron geometry, thresholds, errors).
pub mod common;
/// Gate configuration (defaults, backend selection).
pub mod config;
/// The predictor: queries, training, reset, flags, and decisions.
pub mod gate;
/// Weight-table page and storage backends.
pub mod region;
/// Operation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Error taxonomy for gate operations and region construction.
pub use crate::common::GateError;
/// Two-threshold grading of a query score.
pub use crate::gate::PrefetchDecision;
/// The gate itself; construct with `PrefetchGate::new`.
pub use crate::gate::PrefetchGate;
