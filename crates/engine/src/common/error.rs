//! Gate Error definitions.
//!
//! This module defines the error taxonomy for the prefetch gate. It provides:
//! 1. **Input Rejection:** Typed errors for oversized feature sets and
//!    out-of-range flag words, replacing in-band sentinel values.
//! 2. **Region Failures:** Propagation of mapping and file errors raised
//!    while constructing a shared table region.
//! 3. **Configuration Failures:** Propagation of JSON parse errors.

use thiserror::Error;

/// Errors surfaced by gate operations and region construction.
///
/// Every failure is local and recoverable: a rejected operation leaves the
/// weight table and the flag word exactly as they were.
#[derive(Debug, Error)]
pub enum GateError {
    /// More feature values than the operation accepts.
    ///
    /// Queries accept up to one value per table column; training passes
    /// accept up to the fixed training-input count.
    #[error("feature count {given} exceeds the supported {limit}")]
    TooManyFeatures {
        /// Number of feature values the caller supplied.
        given: usize,
        /// Largest feature count this operation accepts.
        limit: usize,
    },

    /// Feature-flag word outside the 4-bit range.
    ///
    /// Raised when a caller tries to store such a word, or when a read finds
    /// one already in the table (a foreign writer corrupted the region).
    #[error("feature-flag value {value:#x} outside the 4-bit range")]
    InvalidFlagValue {
        /// The offending flag word.
        value: u64,
    },

    /// A shared table region could not be opened, sized, or mapped.
    #[error("table region unavailable: {0}")]
    Region(#[from] std::io::Error),

    /// The configuration JSON failed to parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
