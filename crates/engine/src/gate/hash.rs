//! Feature Hashing.
//!
//! This module maps raw feature values onto weight-table rows. Each feature
//! column is an independent bank of rows; a value selects its row by
//! reducing its raw bit pattern modulo the bank height. There is no
//! collision resolution: values that collide share a counter, and training
//! absorbs the aliasing noise.

use crate::common::constants::PERC_ACTIVE_ROWS;

/// Maps a raw feature value to its weight-table row.
///
/// The value's bit pattern is reinterpreted as unsigned before the
/// reduction, so a negative feature indexes by its two's-complement image
/// rather than its numeric value: `-1` selects row 31, not row 1.
#[inline]
#[must_use]
pub const fn row_index(feature: i32) -> usize {
    // Bit-pattern reinterpretation, not value conversion: -3 hashes as
    // 0xFFFF_FFFD.
    let raw = feature as u32;
    (raw % PERC_ACTIVE_ROWS as u32) as usize
}
