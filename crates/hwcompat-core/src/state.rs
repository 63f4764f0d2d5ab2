//! Compatibility state threaded through the category evaluators.
//!
//! Each evaluator takes the state by value and hands back the updated
//! state, so no evaluator sees anything but what its predecessors returned.

use crate::config::EngineConfig;
use crate::verdict::{CompatibilityVerdict, VersionRange};

/// Bound value meaning "no version is supported".
pub const CLOSED: i32 = -1;

/// Running min/max bounds plus the unsupported-device log.
///
/// # Invariants
///
/// `min_version == max_version == CLOSED` means no version is supported.
/// Once an evaluator returns a closed state, later evaluators leave the
/// bounds alone. `unsupported_devices` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatState {
    min_version: i32,
    max_version: i32,
    unsupported_devices: Vec<String>,
}

impl CompatState {
    /// Fresh state spanning `[lowest_version, latest_version]`.
    pub fn new(config: &EngineConfig) -> Self {
        CompatState {
            min_version: config.lowest_version,
            max_version: config.latest_version,
            unsupported_devices: Vec::new(),
        }
    }

    pub fn min_version(&self) -> i32 {
        self.min_version
    }

    pub fn max_version(&self) -> i32 {
        self.max_version
    }

    pub fn unsupported_devices(&self) -> &[String] {
        &self.unsupported_devices
    }

    pub fn is_closed(&self) -> bool {
        self.min_version == CLOSED && self.max_version == CLOSED
    }

    /// No version is supported.
    pub fn close(&mut self) {
        self.min_version = CLOSED;
        self.max_version = CLOSED;
    }

    pub fn set_min(&mut self, version: i32) {
        self.min_version = version;
    }

    pub fn set_max(&mut self, version: i32) {
        self.max_version = version;
    }

    /// `min = max(version, min)`
    pub fn raise_min(&mut self, version: i32) {
        self.min_version = self.min_version.max(version);
    }

    /// `max = min(version, max)`
    pub fn lower_max(&mut self, version: i32) {
        self.max_version = self.max_version.min(version);
    }

    pub fn mark_unsupported(&mut self, description: impl Into<String>) {
        self.unsupported_devices.push(description.into());
    }

    pub fn into_verdict(self) -> CompatibilityVerdict {
        CompatibilityVerdict {
            macos_version: VersionRange {
                max_version: self.max_version,
                min_version: self.min_version,
            },
            unsupported_devices: self.unsupported_devices,
        }
    }
}
