//! Gate statistics collection and reporting.
//!
//! This module tracks operation metrics for the prefetch gate. It provides:
//! 1. **Live counters:** Atomic per-gate counters bumped from the `&self`
//!    operation paths.
//! 2. **Snapshots:** A plain-value copy of every counter for inspection and
//!    reporting.
//! 3. **Sectioned output:** Selective printing of summary, training, and
//!    flag sections.

use std::sync::atomic::{AtomicU64, Ordering};

/// Bumps one counter; totals are advisory under concurrency, matching the
/// relaxed contract of the weight table itself.
fn bump(counter: &AtomicU64) {
    let _ = counter.fetch_add(1, Ordering::Relaxed);
}

/// Live operation counters for one gate.
///
/// Counters are atomic so the gate's `&self` operations can record traffic
/// without locking. They count this gate's calls only; a second gate over
/// the same shared region keeps its own tallies.
#[derive(Debug, Default)]
pub struct GateStats {
    queries: AtomicU64,
    updates: AtomicU64,
    corrections: AtomicU64,
    reinforcements: AtomicU64,
    dead_zone_skips: AtomicU64,
    clamp_hits: AtomicU64,
    clears: AtomicU64,
    flag_reads: AtomicU64,
    flag_writes: AtomicU64,
    flag_rejects: AtomicU64,
}

impl GateStats {
    pub(crate) fn bump_queries(&self) {
        bump(&self.queries);
    }

    pub(crate) fn bump_updates(&self) {
        bump(&self.updates);
    }

    pub(crate) fn bump_corrections(&self) {
        bump(&self.corrections);
    }

    pub(crate) fn bump_reinforcements(&self) {
        bump(&self.reinforcements);
    }

    pub(crate) fn bump_dead_zone_skips(&self) {
        bump(&self.dead_zone_skips);
    }

    pub(crate) fn bump_clamp_hits(&self) {
        bump(&self.clamp_hits);
    }

    pub(crate) fn bump_clears(&self) {
        bump(&self.clears);
    }

    pub(crate) fn bump_flag_reads(&self) {
        bump(&self.flag_reads);
    }

    pub(crate) fn bump_flag_writes(&self) {
        bump(&self.flag_writes);
    }

    pub(crate) fn bump_flag_rejects(&self) {
        bump(&self.flag_rejects);
    }

    /// Takes a point-in-time copy of every counter.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            corrections: self.corrections.load(Ordering::Relaxed),
            reinforcements: self.reinforcements.load(Ordering::Relaxed),
            dead_zone_skips: self.dead_zone_skips.load(Ordering::Relaxed),
            clamp_hits: self.clamp_hits.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            flag_reads: self.flag_reads.load(Ordering::Relaxed),
            flag_writes: self.flag_writes.load(Ordering::Relaxed),
            flag_rejects: self.flag_rejects.load(Ordering::Relaxed),
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"training"`, `"flags"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "training", "flags"];

/// A point-in-time copy of a gate's operation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Accepted score queries.
    pub queries: u64,
    /// Accepted training passes, including dead-zone skips.
    pub updates: u64,
    /// Training passes that corrected a wrong prediction.
    pub corrections: u64,
    /// Training passes that reinforced a weak correct prediction.
    pub reinforcements: u64,
    /// Training passes skipped because the prediction was correct and
    /// confident.
    pub dead_zone_skips: u64,
    /// Cell adjustments swallowed by a saturation bound.
    pub clamp_hits: u64,
    /// Whole-table resets.
    pub clears: u64,
    /// Feature-flag reads, accepted or rejected.
    pub flag_reads: u64,
    /// Accepted feature-flag writes.
    pub flag_writes: u64,
    /// Feature-flag reads and writes rejected by validation.
    pub flag_rejects: u64,
}

impl StatsSnapshot {
    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`,
    /// `"training"`, or `"flags"`. Pass an empty slice to print all
    /// sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let updates = if self.updates == 0 { 1 } else { self.updates };

        if want("summary") {
            println!("\n==========================================================");
            println!("PREFETCH GATE STATISTICS");
            println!("==========================================================");
            println!("gate.queries             {}", self.queries);
            println!("gate.updates             {}", self.updates);
            println!("gate.clears              {}", self.clears);
            println!("----------------------------------------------------------");
        }
        if want("training") {
            println!("TRAINING");
            println!(
                "  train.corrections      {} ({:.2}%)",
                self.corrections,
                (self.corrections as f64 / updates as f64) * 100.0
            );
            println!(
                "  train.reinforcements   {} ({:.2}%)",
                self.reinforcements,
                (self.reinforcements as f64 / updates as f64) * 100.0
            );
            println!(
                "  train.dead_zone_skips  {} ({:.2}%)",
                self.dead_zone_skips,
                (self.dead_zone_skips as f64 / updates as f64) * 100.0
            );
            println!("  train.clamp_hits       {}", self.clamp_hits);
            println!("----------------------------------------------------------");
        }
        if want("flags") {
            println!("FEATURE FLAGS");
            println!("  flags.reads            {}", self.flag_reads);
            println!("  flags.writes           {}", self.flag_writes);
            println!("  flags.rejects          {}", self.flag_rejects);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
