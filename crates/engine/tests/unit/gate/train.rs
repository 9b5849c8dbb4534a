//! Training Rule Tests.
//!
//! Verifies the outcome-driven update rule: wrong predictions are always
//! corrected, weak correct predictions are reinforced, confident correct
//! predictions are left alone, and every adjustment saturates at the cell
//! bounds.

use pretty_assertions::assert_eq;

use pfgate_core::common::constants::{
    NEG_UPDT_THRESHOLD, PERC_THRESHOLD_HI, POS_UPDT_THRESHOLD, TRAIN_INPUTS,
};
use pfgate_core::GateError;

use crate::common::{heap_gate, train_repeated};

// ══════════════════════════════════════════════════════════
// 1. Correction of wrong predictions
// ══════════════════════════════════════════════════════════

/// A zeroed table predicts "prefetch" (score 0 is above the boundary); a
/// wrong outcome steps both selected cells away from "prefetch".
#[test]
fn wrong_prefetch_prediction_steps_cells_down() {
    let gate = heap_gate();
    assert_eq!(gate.query(&[3, 5]).unwrap(), 0);

    gate.update(3, 5, 2, false, 0).unwrap();

    assert_eq!(gate.query(&[3, 5]).unwrap(), -2);
}

/// A wrong "no prefetch" prediction steps both selected cells up.
#[test]
fn wrong_deny_prediction_steps_cells_up() {
    let gate = heap_gate();
    gate.update(7, 9, 2, false, -10).unwrap();

    assert_eq!(gate.query(&[7, 9]).unwrap(), 2);
}

/// The predicted direction is judged at the decision boundary itself:
/// a score equal to it counts as "prefetch", one below does not.
#[test]
fn direction_boundary_is_inclusive() {
    let gate = heap_gate();
    gate.update(3, 5, 2, false, PERC_THRESHOLD_HI).unwrap();
    assert_eq!(gate.query(&[3, 5]).unwrap(), -2);

    let gate = heap_gate();
    gate.update(3, 5, 2, false, PERC_THRESHOLD_HI - 1).unwrap();
    assert_eq!(gate.query(&[3, 5]).unwrap(), 2);
}

/// Mistakes are corrected however confident the score was; the dead zone
/// applies only to correct predictions.
#[test]
fn corrections_ignore_the_dead_zone() {
    let gate = heap_gate();
    gate.update(3, 5, 2, false, 95).unwrap();
    assert_eq!(gate.query(&[3, 5]).unwrap(), -2);

    let gate = heap_gate();
    gate.update(3, 5, 2, false, -200).unwrap();
    assert_eq!(gate.query(&[3, 5]).unwrap(), 2);
}

// ══════════════════════════════════════════════════════════
// 2. Reinforcement of correct predictions
// ══════════════════════════════════════════════════════════

/// A weak correct "prefetch" prediction is pushed further toward
/// "prefetch".
#[test]
fn weak_correct_prefetch_is_reinforced() {
    let gate = heap_gate();
    gate.update(11, 13, 2, true, 0).unwrap();

    assert_eq!(gate.query(&[11, 13]).unwrap(), 2);
}

/// A weak correct "no prefetch" prediction is pushed further down.
#[test]
fn weak_correct_deny_is_reinforced() {
    let gate = heap_gate();
    gate.update(11, 13, 2, true, -10).unwrap();

    assert_eq!(gate.query(&[11, 13]).unwrap(), -2);
}

/// A correct prediction at or beyond either window bound is left alone.
#[test]
fn confident_correct_predictions_are_skipped() {
    for prior_sum in [
        POS_UPDT_THRESHOLD,
        POS_UPDT_THRESHOLD + 5,
        95,
        NEG_UPDT_THRESHOLD,
        NEG_UPDT_THRESHOLD - 20,
    ] {
        let gate = heap_gate();
        gate.update(3, 5, 2, true, prior_sum).unwrap();
        assert_eq!(gate.query(&[3, 5]).unwrap(), 0, "prior_sum {prior_sum}");
    }
}

/// One step inside the window still reinforces, in both directions.
#[test]
fn window_bounds_are_exclusive() {
    let gate = heap_gate();
    gate.update(3, 5, 2, true, POS_UPDT_THRESHOLD - 1).unwrap();
    assert_eq!(gate.query(&[3, 5]).unwrap(), 2);

    let gate = heap_gate();
    gate.update(3, 5, 2, true, NEG_UPDT_THRESHOLD + 1).unwrap();
    assert_eq!(gate.query(&[3, 5]).unwrap(), -2);
}

// ══════════════════════════════════════════════════════════
// 3. Input-count semantics
// ══════════════════════════════════════════════════════════

/// A one-input pass trains the first column only.
#[test]
fn single_input_trains_first_column_only() {
    let gate = heap_gate();
    gate.update(3, 23, 1, false, 0).unwrap();

    assert_eq!(gate.query(&[3]).unwrap(), -1);
    // Column 1 never saw input 23.
    assert_eq!(gate.query(&[0, 23]).unwrap(), 0);
}

/// A zero-input pass is accepted and trains nothing.
#[test]
fn zero_inputs_train_nothing() {
    let gate = heap_gate();
    gate.update(3, 5, 0, false, 0).unwrap();

    assert_eq!(gate.query(&[3, 5]).unwrap(), 0);
}

/// More inputs than the training pass accepts is a typed rejection that
/// leaves the table untouched.
#[test]
fn oversized_training_pass_is_rejected() {
    let gate = heap_gate();
    let err = gate.update(3, 5, 3, false, 0).unwrap_err();
    match err {
        GateError::TooManyFeatures { given, limit } => {
            assert_eq!(given, 3);
            assert_eq!(limit, TRAIN_INPUTS);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(gate.query(&[3, 5]).unwrap(), 0);
}

// ══════════════════════════════════════════════════════════
// 4. Saturation
// ══════════════════════════════════════════════════════════

/// Cells stop at the floor; further downward training is swallowed.
#[test]
fn cells_saturate_at_the_floor() {
    let gate = heap_gate();
    train_repeated(&gate, 3, 5, false, 0, 40);

    assert_eq!(gate.query(&[3, 5]).unwrap(), -32);
    gate.update(3, 5, 2, false, 0).unwrap();
    assert_eq!(gate.query(&[3, 5]).unwrap(), -32);
}

/// Cells stop at the ceiling; further upward training is swallowed.
#[test]
fn cells_saturate_at_the_ceiling() {
    let gate = heap_gate();
    train_repeated(&gate, 3, 5, false, -10, 40);

    assert_eq!(gate.query(&[3, 5]).unwrap(), 30);
    gate.update(3, 5, 2, false, -10).unwrap();
    assert_eq!(gate.query(&[3, 5]).unwrap(), 30);
}

// ══════════════════════════════════════════════════════════
// 5. Reset
// ══════════════════════════════════════════════════════════

/// Clearing zeroes every counter and nothing else; clearing again is a
/// no-op.
#[test]
fn clear_zeroes_the_whole_table() {
    let gate = heap_gate();
    train_repeated(&gate, 3, 5, false, 0, 10);
    gate.update(17, 19, 2, false, -10).unwrap();

    gate.clear();
    assert_eq!(gate.query(&[3, 5]).unwrap(), 0);
    assert_eq!(gate.query(&[17, 19]).unwrap(), 0);

    gate.clear();
    assert_eq!(gate.query(&[3, 5]).unwrap(), 0);
}

/// The feature-flag word survives a table clear.
#[test]
fn clear_spares_the_feature_flags() {
    let gate = heap_gate();
    let _ = gate.set_feature_flags(0xA).unwrap();
    train_repeated(&gate, 3, 5, false, 0, 4);

    gate.clear();

    assert_eq!(gate.feature_flags().unwrap(), 0xA);
    assert_eq!(gate.query(&[3, 5]).unwrap(), 0);
}
