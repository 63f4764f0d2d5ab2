//! The compatibility verdict and the annotated report.

use hwcompat_data::{releases_between, MacOsRelease};
use serde::{Deserialize, Serialize};

use crate::profile::HardwareProfile;
use crate::state::CLOSED;

/// Supported Darwin range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    #[serde(rename = "Max Version")]
    pub max_version: i32,
    #[serde(rename = "Min Version")]
    pub min_version: i32,
}

/// Final output of an evaluation, stored under the profile's
/// `Compatibility` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityVerdict {
    #[serde(rename = "macOS Version")]
    pub macos_version: VersionRange,
    /// In evaluation order: CPU, GPUs, then Audio, Biometric, Network,
    /// Storage and SD Controller.
    #[serde(rename = "Unsupported Devices")]
    pub unsupported_devices: Vec<String>,
}

impl CompatibilityVerdict {
    /// Whether at least one release is supported.
    pub fn is_supported(&self) -> bool {
        let range = self.macos_version;
        range.min_version != CLOSED && range.min_version <= range.max_version
    }

    /// Named releases within the supported range, oldest first.
    pub fn supported_releases(&self) -> Vec<&'static MacOsRelease> {
        if !self.is_supported() {
            return Vec::new();
        }
        releases_between(self.macos_version.min_version, self.macos_version.max_version).collect()
    }
}

/// Result of [`check_compatibility`](crate::check_compatibility).
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityReport {
    /// Input profile with filtered categories and the `Compatibility` key.
    pub profile: HardwareProfile,
    pub verdict: CompatibilityVerdict,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verdict(min: i32, max: i32) -> CompatibilityVerdict {
        CompatibilityVerdict {
            macos_version: VersionRange {
                max_version: max,
                min_version: min,
            },
            unsupported_devices: vec![],
        }
    }

    #[test]
    fn test_serialized_keys() {
        let mut v = verdict(18, 21);
        v.unsupported_devices.push("Audio: Creative".to_string());
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({
                "macOS Version": {"Max Version": 21, "Min Version": 18},
                "Unsupported Devices": ["Audio: Creative"]
            })
        );
    }

    #[test]
    fn test_supported_releases() {
        let names: Vec<&str> = verdict(20, 22)
            .supported_releases()
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["Big Sur", "Monterey", "Ventura"]);
    }

    #[test]
    fn test_closed_and_inverted_ranges_are_unsupported() {
        assert!(!verdict(-1, -1).is_supported());
        assert!(!verdict(19, 17).is_supported());
        assert!(verdict(19, 19).is_supported());
        assert!(verdict(-1, -1).supported_releases().is_empty());
    }
}
