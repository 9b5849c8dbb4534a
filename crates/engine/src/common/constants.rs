//! Global Predictor Constants.
//!
//! This module defines the fixed geometry and policy constants of the hashed
//! perceptron. It includes:
//! 1. **Table Geometry:** Row, column, and active-bank dimensions of the weight table.
//! 2. **Counter Bounds:** Saturation limits of the 5-bit signed weight cells.
//! 3. **Policy Thresholds:** Decision boundaries and the reinforcement window.
//! 4. **Region Constants:** Size and flag limits of the shared table region.

/// Number of rows allocated per feature column in the weight table.
pub const PERC_ENTRIES: usize = 64;

/// Number of feature columns in the weight table.
pub const PERC_FEATURES: usize = 4;

/// Number of rows the hash actually addresses; the remaining allocated rows
/// are headroom and stay zero.
pub const PERC_ACTIVE_ROWS: usize = 32;

/// Ceiling of a weight cell (5-bit signed saturating counter).
pub const PERC_COUNTER_MAX: i8 = 15;

/// Floor of a weight cell.
pub const PERC_COUNTER_MIN: i8 = -(PERC_COUNTER_MAX + 1);

/// Decision boundary: scores at or above it predict "prefetch".
pub const PERC_THRESHOLD_HI: i32 = -5;

/// Low-confidence boundary used when grading a score into a decision band.
pub const PERC_THRESHOLD_LO: i32 = -15;

/// Score at or above which a correct "prefetch" prediction is confident
/// enough that reinforcement stops.
pub const POS_UPDT_THRESHOLD: i32 = 90;

/// Score at or below which a correct "no prefetch" prediction is confident
/// enough that reinforcement stops.
pub const NEG_UPDT_THRESHOLD: i32 = -80;

/// Number of raw inputs a single training pass may hash.
pub const TRAIN_INPUTS: usize = 2;

/// Highest legal feature-flag word; bits above the low four are rejected.
pub const FLAG_LIMIT: u64 = 0xF;

/// Size in bytes of a mapped table region (one page).
pub const REGION_BYTES: usize = 4096;
