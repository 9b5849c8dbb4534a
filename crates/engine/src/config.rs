//! Configuration system for the prefetch gate.
//!
//! This module defines the configuration structures and enums used to
//! parameterize a gate. It provides:
//! 1. **Defaults:** Baseline values for region selection and tracing.
//! 2. **Structures:** Hierarchical config for general behaviour and the
//!    table region.
//! 3. **Enums:** The storage backend selector.
//!
//! Configuration is supplied via JSON (`Config::from_json`) or use
//! `Config::default()` for a process-private gate.

use std::path::PathBuf;

use serde::Deserialize;

use crate::common::GateError;

/// Default configuration constants for the gate.
///
/// These values define the baseline behaviour when not explicitly
/// overridden in the configuration JSON.
mod defaults {
    /// Per-adjustment trace events are off unless explicitly enabled.
    pub const TRACE_EVENTS: bool = false;

    /// File-backed regions are created and sized on first use.
    ///
    /// Consumers that must never create an empty region (a reader attaching
    /// to a producer's table) override this to `false`.
    pub const CREATE_MISSING: bool = true;
}

/// Storage backend types for the weight-table region.
///
/// Specifies where the table page lives and therefore who can see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum RegionBackend {
    /// Process-private table on the heap.
    ///
    /// Nothing outside the owning process can observe it. This is the
    /// backend for tests and single-process use.
    #[default]
    Heap,
    /// `mmap`-backed shared table.
    ///
    /// Anonymous when no path is configured (visible to forked children),
    /// file-backed otherwise (visible to any process mapping the same file).
    #[serde(alias = "Mmap")]
    Shared,
}

/// Root configuration structure containing all gate settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use pfgate_core::config::{Config, RegionBackend};
///
/// let config = Config::default();
/// assert_eq!(config.region.backend, RegionBackend::Heap);
/// assert!(!config.general.trace_events);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use pfgate_core::config::{Config, RegionBackend};
///
/// let json = r#"{
///     "general": {
///         "trace_events": true
///     },
///     "region": {
///         "backend": "Shared",
///         "path": "/dev/shm/pfgate.tbl",
///         "create_missing": true
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.region.backend, RegionBackend::Shared);
/// assert!(config.general.trace_events);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// General behaviour settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Weight-table region configuration
    #[serde(default)]
    pub region: RegionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            region: RegionConfig::default(),
        }
    }
}

impl Config {
    /// Parses a configuration from its JSON representation.
    ///
    /// Missing sections and fields fall back to their defaults, so `{}` is
    /// a valid configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Config`] when the text is not valid JSON or a
    /// field has the wrong shape.
    pub fn from_json(text: &str) -> Result<Self, GateError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// General gate behaviour settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit a trace event for every training pass (hot path; off by default)
    #[serde(default = "GeneralConfig::default_trace_events")]
    pub trace_events: bool,
}

impl GeneralConfig {
    /// Returns the default per-pass tracing toggle.
    fn default_trace_events() -> bool {
        defaults::TRACE_EVENTS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_events: defaults::TRACE_EVENTS,
        }
    }
}

/// Weight-table region configuration.
///
/// Selects the storage backend and, for file-backed sharing, the path both
/// sides map.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    /// Storage backend holding the weight table
    #[serde(default)]
    pub backend: RegionBackend,

    /// Backing file for a shared region; `None` maps anonymously
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Create and size the backing file if it does not exist yet
    #[serde(default = "RegionConfig::default_create_missing")]
    pub create_missing: bool,
}

impl RegionConfig {
    /// Returns the default create-on-open behaviour for backing files.
    fn default_create_missing() -> bool {
        defaults::CREATE_MISSING
    }
}

impl Default for RegionConfig {
    /// Creates a default region configuration.
    ///
    /// Uses the process-private heap backend with no backing file.
    fn default() -> Self {
        Self {
            backend: RegionBackend::default(),
            path: None,
            create_missing: defaults::CREATE_MISSING,
        }
    }
}
