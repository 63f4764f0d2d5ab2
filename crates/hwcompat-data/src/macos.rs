//! Darwin kernel major versions and the macOS releases they ship with.
//!
//! Version bounds throughout hwcompat are Darwin majors: 17 is High Sierra,
//! 24 is Sequoia.

use serde::Serialize;

/// Oldest Darwin major hwcompat reasons about.
pub const LOWEST_DARWIN_VERSION: i32 = 17;

/// Newest Darwin major hwcompat reasons about.
pub const LATEST_DARWIN_VERSION: i32 = 24;

/// A macOS release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacOsRelease {
    pub darwin: i32,
    pub name: &'static str,
    pub version: &'static str,
}

impl std::fmt::Display for MacOsRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "macOS {} {} (Darwin {})", self.name, self.version, self.darwin)
    }
}

pub const MACOS_RELEASES: &[MacOsRelease] = &[
    MacOsRelease {
        darwin: 17,
        name: "High Sierra",
        version: "10.13",
    },
    MacOsRelease {
        darwin: 18,
        name: "Mojave",
        version: "10.14",
    },
    MacOsRelease {
        darwin: 19,
        name: "Catalina",
        version: "10.15",
    },
    MacOsRelease {
        darwin: 20,
        name: "Big Sur",
        version: "11",
    },
    MacOsRelease {
        darwin: 21,
        name: "Monterey",
        version: "12",
    },
    MacOsRelease {
        darwin: 22,
        name: "Ventura",
        version: "13",
    },
    MacOsRelease {
        darwin: 23,
        name: "Sonoma",
        version: "14",
    },
    MacOsRelease {
        darwin: 24,
        name: "Sequoia",
        version: "15",
    },
];

/// Release for a Darwin major.
pub fn release_for(darwin: i32) -> Option<&'static MacOsRelease> {
    MACOS_RELEASES.iter().find(|r| r.darwin == darwin)
}

/// Releases whose Darwin major lies in `[min, max]`, oldest first.
pub fn releases_between(min: i32, max: i32) -> impl Iterator<Item = &'static MacOsRelease> {
    MACOS_RELEASES
        .iter()
        .filter(move |r| r.darwin >= min && r.darwin <= max)
}
