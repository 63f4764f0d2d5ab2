//! Engine configuration.

use hwcompat_data::{LATEST_DARWIN_VERSION, LOWEST_DARWIN_VERSION};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Bounds an evaluation starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Newest Darwin major; the initial max bound and the target of
    /// "open to latest" rules.
    pub latest_version: i32,
    /// Initial min bound.
    pub lowest_version: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            latest_version: LATEST_DARWIN_VERSION,
            lowest_version: LOWEST_DARWIN_VERSION,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `HWCOMPAT_LATEST_VERSION` / `HWCOMPAT_LOWEST_VERSION`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        EngineConfig {
            latest_version: env_version("HWCOMPAT_LATEST_VERSION")
                .unwrap_or(defaults.latest_version),
            lowest_version: env_version("HWCOMPAT_LOWEST_VERSION")
                .unwrap_or(defaults.lowest_version),
        }
    }

    pub fn with_latest_version(mut self, version: i32) -> Self {
        self.latest_version = version;
        self
    }

    pub fn with_lowest_version(mut self, version: i32) -> Self {
        self.lowest_version = version;
        self
    }
}

fn env_version(key: &str) -> Option<i32> {
    parse_version(key, &std::env::var(key).ok()?)
}

fn parse_version(key: &str, raw: &str) -> Option<i32> {
    match raw.trim().parse() {
        Ok(version) => Some(version),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable version override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let config = EngineConfig::default();
        assert_eq!(config.latest_version, 24);
        assert_eq!(config.lowest_version, 17);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::default()
            .with_latest_version(25)
            .with_lowest_version(18);
        assert_eq!(config.latest_version, 25);
        assert_eq!(config.lowest_version, 18);
    }

    #[test]
    fn test_parse_version_ignores_garbage() {
        assert_eq!(parse_version("HWCOMPAT_LOWEST_VERSION", "not-a-number"), None);
        assert_eq!(parse_version("HWCOMPAT_LOWEST_VERSION", ""), None);
    }

    #[test]
    fn test_parse_version_trims() {
        assert_eq!(parse_version("HWCOMPAT_LATEST_VERSION", " 25\n"), Some(25));
        assert_eq!(parse_version("HWCOMPAT_LOWEST_VERSION", "-1"), Some(-1));
    }
}
