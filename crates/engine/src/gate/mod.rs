//! Hashed-Perceptron Prefetch Gate.
//!
//! This module implements the predictor itself. It provides:
//! 1. **Queries:** Summing the weights selected by a feature set into a
//!    prediction score.
//! 2. **Training:** The outcome-driven update rule: always correct
//!    mistakes, reinforce weak correct predictions, and leave confident
//!    ones alone.
//! 3. **Maintenance:** Whole-table reset and the validated feature-flag
//!    accessors.
//! 4. **Decisions:** A two-threshold grading of scores into prefetch
//!    confidence bands.
//!
//! The gate holds no history of its own: all state lives in the table
//! region, so two gates over the same shared region are two views of one
//! predictor.

/// Feature hashing for row selection.
pub mod hash;

use crate::common::constants::{
    FLAG_LIMIT, NEG_UPDT_THRESHOLD, PERC_FEATURES, PERC_THRESHOLD_HI, PERC_THRESHOLD_LO,
    POS_UPDT_THRESHOLD, TRAIN_INPUTS,
};
use crate::common::GateError;
use crate::config::Config;
use crate::region::{TablePage, TableRegion};
use crate::stats::GateStats;

/// Caller-side grading of a query score into a confidence band.
///
/// The score itself is the interface; this enum is the standard reading of
/// it, using the same boundary the training rule steers around plus a lower
/// band for speculative use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefetchDecision {
    /// Score at or above the decision boundary: issue the prefetch.
    Prefetch,
    /// Score in the low-confidence band: worth issuing only somewhere cheap,
    /// such as a lower cache level.
    PrefetchLow,
    /// Score below both thresholds: suppress the prefetch.
    Deny,
}

impl PrefetchDecision {
    /// Grades a query score against the two decision thresholds.
    #[must_use]
    pub const fn from_score(score: i32) -> Self {
        if score >= PERC_THRESHOLD_HI {
            Self::Prefetch
        } else if score >= PERC_THRESHOLD_LO {
            Self::PrefetchLow
        } else {
            Self::Deny
        }
    }

    /// Whether this decision issues a prefetch at any confidence.
    #[must_use]
    pub const fn issues(self) -> bool {
        !matches!(self, Self::Deny)
    }
}

/// The shared-memory hashed-perceptron prefetch gate.
///
/// One gate wraps one table region. Every operation takes `&self`: the
/// table is made of atomic cells, so concurrent queries and trainers are
/// safe under the relaxed contract described on [`TablePage`].
///
/// # Examples
///
/// ```
/// use pfgate_core::{Config, PrefetchGate};
///
/// let gate = PrefetchGate::new(&Config::default()).unwrap();
/// assert_eq!(gate.query(&[3, 5]).unwrap(), 0);
///
/// // The prediction was "prefetch" (0 is above the boundary) and it was
/// // wrong, so both selected cells step away from "prefetch".
/// gate.update(3, 5, 2, false, 0).unwrap();
/// assert_eq!(gate.query(&[3, 5]).unwrap(), -2);
/// ```
#[derive(Debug)]
pub struct PrefetchGate {
    region: TableRegion,
    stats: GateStats,
    trace_events: bool,
}

impl PrefetchGate {
    /// Builds a gate over the region selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Region`] when a shared region cannot be mapped.
    pub fn new(config: &Config) -> Result<Self, GateError> {
        Ok(Self {
            region: TableRegion::new(config)?,
            stats: GateStats::default(),
            trace_events: config.general.trace_events,
        })
    }

    /// Wraps an already-constructed region.
    ///
    /// For callers that build the region themselves (for example to reuse
    /// one mapping across several owners' setup steps).
    #[must_use]
    pub fn with_region(region: TableRegion) -> Self {
        Self {
            region,
            stats: GateStats::default(),
            trace_events: false,
        }
    }

    /// Returns the raw table handle.
    ///
    /// The page is the storage contract shared with other mappers of the
    /// region; going through it bypasses the validation and statistics this
    /// gate layers on top.
    #[must_use]
    pub fn page(&self) -> &TablePage {
        self.region.page()
    }

    /// Returns the operation counters for this gate.
    ///
    /// Counters are per-gate, not per-region: two gates over one shared
    /// region each count their own traffic.
    #[must_use]
    pub fn stats(&self) -> &GateStats {
        &self.stats
    }

    /// Sums the weights selected by `features` into a prediction score.
    ///
    /// Each feature value selects a row in its own column bank; the score is
    /// the plain sum of the selected counters, more positive meaning
    /// "prefetch" and more negative meaning "do not". Only individual cells
    /// saturate, the sum itself is never clamped. Querying never modifies
    /// the table, so repeating a query against an unchanged table repeats
    /// its score. Fewer features than columns is fine; the unused columns
    /// contribute nothing, and no features at all score zero.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::TooManyFeatures`] when more than one value per
    /// table column is supplied. The table is untouched.
    pub fn query(&self, features: &[i32]) -> Result<i32, GateError> {
        if features.len() > PERC_FEATURES {
            return Err(GateError::TooManyFeatures {
                given: features.len(),
                limit: PERC_FEATURES,
            });
        }
        self.stats.bump_queries();

        let page = self.region.page();
        let mut sum = 0_i32;
        for (col, &feature) in features.iter().enumerate() {
            sum += i32::from(page.weight(hash::row_index(feature), col));
        }
        Ok(sum)
    }

    /// Trains the table against an observed outcome.
    ///
    /// `in1` and `in2` must be the raw inputs whose rows produced the
    /// earlier prediction, `len` how many of them to use (the second is
    /// ignored when `len` is 1), and `prior_sum` the score the prediction
    /// was made from. The score is taken at face value, not recomputed, so
    /// the cells that moved the prediction are the ones held accountable
    /// even if the table has changed since. `correct` reports whether the
    /// prediction matched the observed outcome.
    ///
    /// The rule:
    /// - a wrong prediction always steps every selected cell one unit away
    ///   from the direction that was predicted;
    /// - a correct prediction is reinforced one unit toward that direction,
    ///   but only while `prior_sum` is still inside the open reinforcement
    ///   window; a confident score is left alone, which keeps cells off
    ///   their saturation rails and cheap to turn around later.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::TooManyFeatures`] when `len` exceeds the
    /// training-input count. The table is untouched.
    pub fn update(
        &self,
        in1: i32,
        in2: i32,
        len: usize,
        correct: bool,
        prior_sum: i32,
    ) -> Result<(), GateError> {
        if len > TRAIN_INPUTS {
            return Err(GateError::TooManyFeatures {
                given: len,
                limit: TRAIN_INPUTS,
            });
        }

        // The direction the table predicted, judged by the same boundary a
        // decision would have used.
        let toward_prefetch = prior_sum >= PERC_THRESHOLD_HI;
        let inputs = [in1, in2];
        let page = self.region.page();

        if correct {
            if prior_sum <= NEG_UPDT_THRESHOLD || prior_sum >= POS_UPDT_THRESHOLD {
                // Correct and confident: no adjustment.
                self.stats.bump_dead_zone_skips();
                self.stats.bump_updates();
                return Ok(());
            }
            for (col, &input) in inputs.iter().take(len).enumerate() {
                let row = hash::row_index(input);
                let moved = if toward_prefetch {
                    page.bump_up(row, col)
                } else {
                    page.bump_down(row, col)
                };
                if !moved {
                    self.stats.bump_clamp_hits();
                }
            }
            self.stats.bump_reinforcements();
        } else {
            // Mistakes are corrected unconditionally, however confident the
            // score was.
            for (col, &input) in inputs.iter().take(len).enumerate() {
                let row = hash::row_index(input);
                let moved = if toward_prefetch {
                    page.bump_down(row, col)
                } else {
                    page.bump_up(row, col)
                };
                if !moved {
                    self.stats.bump_clamp_hits();
                }
            }
            self.stats.bump_corrections();
        }

        if self.trace_events {
            tracing::trace!(in1, in2, len, correct, prior_sum, "training pass applied");
        }
        self.stats.bump_updates();
        Ok(())
    }

    /// Resets every weight cell to zero.
    ///
    /// The whole table is cleared at once (there is no selective reset) and
    /// the feature-flag word survives. Clearing an already-clear table is a
    /// no-op.
    pub fn clear(&self) {
        self.region.page().reset();
        self.stats.bump_clears();
        tracing::debug!("weight table cleared");
    }

    /// Reads the feature-flag word, validating the stored value.
    ///
    /// Validation runs against what is actually in the table: a foreign
    /// writer that corrupted a shared region surfaces here as a typed error
    /// instead of leaking garbage bits to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidFlagValue`] when the stored word is
    /// outside the 4-bit range.
    pub fn feature_flags(&self) -> Result<u8, GateError> {
        self.stats.bump_flag_reads();
        let value = self.region.page().load_flags();
        if value > FLAG_LIMIT {
            self.stats.bump_flag_rejects();
            tracing::warn!(value, "stored feature flags outside the 4-bit range");
            return Err(GateError::InvalidFlagValue { value });
        }
        Ok(value as u8)
    }

    /// Stores a new feature-flag word, validating it first.
    ///
    /// Returns the accepted value. A rejected word leaves the stored flags
    /// untouched. The flag bits carry no meaning to the gate itself; they
    /// belong to the callers coordinating through the region. Concurrent
    /// writers race as last-writer-wins, like every other cell.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidFlagValue`] when `value` is outside the
    /// 4-bit range.
    pub fn set_feature_flags(&self, value: u64) -> Result<u8, GateError> {
        if value > FLAG_LIMIT {
            self.stats.bump_flag_rejects();
            tracing::warn!(value, "rejected feature-flag write");
            return Err(GateError::InvalidFlagValue { value });
        }
        self.region.page().store_flags(value);
        self.stats.bump_flag_writes();
        Ok(value as u8)
    }
}
