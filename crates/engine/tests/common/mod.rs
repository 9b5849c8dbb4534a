//! Shared test infrastructure for the gate suite.
//!
//! Helpers here keep the unit tests focused on behaviour rather than setup.

use pfgate_core::{Config, PrefetchGate};

/// Builds a gate over a fresh process-private heap region.
pub fn heap_gate() -> PrefetchGate {
    PrefetchGate::new(&Config::default()).unwrap()
}

/// Applies `n` identical two-input training passes.
///
/// Useful for driving cells toward a saturation bound; `prior_sum` is
/// passed through unchanged on every pass.
pub fn train_repeated(
    gate: &PrefetchGate,
    in1: i32,
    in2: i32,
    correct: bool,
    prior_sum: i32,
    n: usize,
) {
    for _ in 0..n {
        gate.update(in1, in2, 2, correct, prior_sum).unwrap();
    }
}
