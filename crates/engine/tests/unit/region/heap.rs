//! Heap Region Tests.
//!
//! Verifies the process-private backend: fresh tables start zeroed and two
//! heap gates never share state.

use pfgate_core::common::constants::{PERC_ENTRIES, PERC_FEATURES};
use pfgate_core::region::{HeapRegion, TableRegion};
use pfgate_core::PrefetchGate;

use crate::common::heap_gate;

/// A fresh heap region hands out an all-zero table.
#[test]
fn fresh_heap_table_is_zeroed() {
    let gate = heap_gate();
    let page = gate.page();
    for row in 0..PERC_ENTRIES {
        for col in 0..PERC_FEATURES {
            assert_eq!(page.weight(row, col), 0);
        }
    }
    assert_eq!(page.load_flags(), 0);
}

/// Heap regions are private: training one gate leaves another untouched.
#[test]
fn heap_gates_do_not_share_state() {
    let trained = heap_gate();
    let untouched = heap_gate();

    trained.update(3, 5, 2, false, 0).unwrap();

    assert_eq!(trained.query(&[3, 5]).unwrap(), -2);
    assert_eq!(untouched.query(&[3, 5]).unwrap(), 0);
}

/// A caller-built region wraps into a working gate.
#[test]
fn externally_built_region_is_usable() {
    let gate = PrefetchGate::with_region(TableRegion::Heap(HeapRegion::new()));

    gate.update(7, 9, 2, false, 0).unwrap();
    assert_eq!(gate.query(&[7, 9]).unwrap(), -2);
}
