//! hwcompat-data: Reference Datasets for hwcompat
//!
//! This crate is the read-only data layer of hwcompat. It owns the tables
//! the compatibility rules are evaluated against and exposes them through
//! the [`ReferenceData`] query trait.
//!
//! ## Layer 0 - Reference Data
//!
//! Focus: stable table ordering and exact membership semantics.

pub mod builtin;
pub mod codec;
pub mod error;
pub mod kext;
pub mod macos;
pub mod reference;

pub use codec::{codec_vendor, normalize_id, CodecCatalog};
pub use error::ReferenceError;
pub use kext::{DarwinVersion, KextCatalog, KextInfo};
pub use macos::{
    release_for, releases_between, MacOsRelease, LATEST_DARWIN_VERSION, LOWEST_DARWIN_VERSION,
    MACOS_RELEASES,
};
pub use reference::{PciIdList, ReferenceData, ReferenceTables};

/// Result type for reference data operations
pub type Result<T> = std::result::Result<T, ReferenceError>;
