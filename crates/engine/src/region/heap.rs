//! Heap Region Backend.
//!
//! This module provides the process-private storage backend: the weight
//! table lives in a plain heap allocation owned by the gate. Nothing outside
//! the owning process can observe or train it.

use super::page::TablePage;

/// A weight table held on the process heap.
///
/// This is the backend for tests and for callers that do not split the
/// producer and reader across processes. Construction cannot fail.
#[derive(Debug)]
pub struct HeapRegion {
    page: Box<TablePage>,
}

impl HeapRegion {
    /// Allocates a zeroed table.
    pub fn new() -> Self {
        Self {
            page: Box::new(TablePage::zeroed()),
        }
    }

    /// Returns the table handle.
    #[inline]
    pub fn page(&self) -> &TablePage {
        &self.page
    }
}

impl Default for HeapRegion {
    fn default() -> Self {
        Self::new()
    }
}
