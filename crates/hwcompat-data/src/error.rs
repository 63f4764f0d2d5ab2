//! Error types for hwcompat-data

use thiserror::Error;

/// Errors that can occur while loading or querying reference data
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A loaded table is structurally unusable
    #[error("Invalid reference table: {0}")]
    InvalidTable(String),

    /// Kext name not present in the catalog
    #[error("Unknown kext: {0}")]
    UnknownKext(String),

    /// Two resolved kexts claim the same conflict group
    #[error("Kexts {first} and {second} conflict (group {group})")]
    KextConflict {
        group: String,
        first: String,
        second: String,
    },
}
