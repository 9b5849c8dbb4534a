//! Weight-Table Storage Backends.
//!
//! This module owns where the perceptron table lives. It provides:
//! 1. **Page:** The fixed-layout [`TablePage`] every backend hands out.
//! 2. **Backends:** Process-private heap storage and `mmap`-backed shared
//!    storage.
//! 3. **Selection:** [`TableRegion`], which picks a backend once at
//!    construction from the configuration; nothing downstream knows which
//!    storage is behind the page.

/// Process-private heap backend.
pub mod heap;

/// Fixed-layout table page shared by every backend.
pub mod page;

/// `mmap`-backed shared backend.
pub mod shared;

pub use heap::HeapRegion;
pub use page::TablePage;
pub use shared::SharedRegion;

use crate::common::GateError;
use crate::config::{Config, RegionBackend};

/// Region wrapper providing one table-access interface over every backend.
///
/// The backend is selected once, when the region is built; swapping storage
/// is a configuration change, not a code change.
#[derive(Debug)]
pub enum TableRegion {
    /// Process-private heap table.
    Heap(HeapRegion),
    /// `mmap`-backed shared table.
    Shared(SharedRegion),
}

impl TableRegion {
    /// Builds the region selected by `config.region`.
    ///
    /// A `Shared` backend with a configured path maps that file (creating it
    /// according to `create_missing`); without a path it maps anonymously.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Region`] when the shared mapping cannot be
    /// opened, sized, or mapped. The heap backend cannot fail.
    pub fn new(config: &Config) -> Result<Self, GateError> {
        let region = &config.region;
        let built = match region.backend {
            RegionBackend::Heap => Self::Heap(HeapRegion::new()),
            RegionBackend::Shared => match region.path.as_deref() {
                Some(path) => {
                    Self::Shared(SharedRegion::file_backed(path, region.create_missing)?)
                }
                None => Self::Shared(SharedRegion::anonymous()?),
            },
        };
        tracing::debug!(backend = ?region.backend, path = ?region.path, "table region ready");
        Ok(built)
    }

    /// Returns the table handle.
    #[inline]
    pub fn page(&self) -> &TablePage {
        match self {
            Self::Heap(region) => region.page(),
            Self::Shared(region) => region.page(),
        }
    }
}
