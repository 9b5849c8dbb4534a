//! Weight-Table Page Layout.
//!
//! This module defines the fixed-layout page that holds the perceptron state.
//! It provides:
//! 1. **Layout:** A `repr(C)` page so that every process mapping the region
//!    agrees on cell offsets, with zero-fill as the valid initial state.
//! 2. **Cell Primitives:** Relaxed atomic loads, saturating bumps, and the
//!    whole-table reset.
//! 3. **Flag Word:** Raw access to the caller-owned feature-flag slot;
//!    validation lives in the gate, not here.

use std::sync::atomic::{AtomicI8, AtomicU64, Ordering};

use crate::common::constants::{PERC_COUNTER_MAX, PERC_COUNTER_MIN, PERC_ENTRIES, PERC_FEATURES};

/// The shared weight-table page.
///
/// One page holds the full predictor state: a fixed grid of saturating
/// counters (one bank of rows per feature column) followed by the
/// feature-flag word. A zero-filled page is a valid, freshly-initialized
/// table, which is exactly what `mmap` hands out.
///
/// # Concurrency contract
///
/// Every cell is individually atomic and accessed with `Ordering::Relaxed`
/// throughout. A reader never sees a torn cell, but there is no atomicity
/// across cells and no ordering between them: concurrent trainers can lose
/// increments, and a query can observe a half-applied training pass. The
/// predictor is self-correcting, so this staleness is accepted rather than
/// paid for with locks.
#[derive(Debug)]
#[repr(C)]
pub struct TablePage {
    counters: [[AtomicI8; PERC_FEATURES]; PERC_ENTRIES],
    flags: AtomicU64,
}

impl TablePage {
    /// Builds a zeroed page: all counters at zero, flag word clear.
    pub const fn zeroed() -> Self {
        Self {
            counters: [const { [const { AtomicI8::new(0) }; PERC_FEATURES] }; PERC_ENTRIES],
            flags: AtomicU64::new(0),
        }
    }

    /// Loads the counter at `row`/`col`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` lie outside the fixed table shape.
    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> i8 {
        self.counters[row][col].load(Ordering::Relaxed)
    }

    /// Raises the counter at `row`/`col` by one, saturating at the ceiling.
    ///
    /// Returns whether the cell moved. The sequence is load, bound-check,
    /// store: two trainers racing here can lose one of the increments, but
    /// the stored value is always derived from an in-range load, so a cell
    /// can never leave its bounds.
    pub(crate) fn bump_up(&self, row: usize, col: usize) -> bool {
        let cell = &self.counters[row][col];
        let v = cell.load(Ordering::Relaxed);
        if v < PERC_COUNTER_MAX {
            cell.store(v + 1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    /// Lowers the counter at `row`/`col` by one, saturating at the floor.
    ///
    /// Returns whether the cell moved; see [`TablePage::bump_up`] for the
    /// race behaviour.
    pub(crate) fn bump_down(&self, row: usize, col: usize) -> bool {
        let cell = &self.counters[row][col];
        let v = cell.load(Ordering::Relaxed);
        if v > PERC_COUNTER_MIN {
            cell.store(v - 1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    /// Zeroes every counter cell. The flag word is left untouched.
    ///
    /// Cells are cleared one at a time; a concurrent trainer can land an
    /// adjustment between two stores, and the table simply retrains from
    /// there.
    pub fn reset(&self) {
        for row in &self.counters {
            for cell in row {
                cell.store(0, Ordering::Relaxed);
            }
        }
    }

    /// Raw load of the feature-flag word, unvalidated.
    #[inline]
    pub fn load_flags(&self) -> u64 {
        self.flags.load(Ordering::Relaxed)
    }

    /// Raw store of the feature-flag word, unvalidated. Last writer wins.
    #[inline]
    pub fn store_flags(&self, value: u64) {
        self.flags.store(value, Ordering::Relaxed);
    }
}
