//! hwcompat-core: Hardware Compatibility Rule Engine
//!
//! Decides which macOS releases a machine can run and which of its devices
//! have no driver, from a hardware profile produced by a hardware sniffer.
//!
//! ## Layer 1 - Rule Engine
//!
//! Focus: deterministic evaluation, one pure pass per category.
//!
//! ```ignore
//! use hwcompat_core::{check_compatibility, EngineConfig, HardwareProfile};
//! use hwcompat_data::ReferenceTables;
//!
//! let profile = HardwareProfile::from_json_str(&json)?;
//! let report = check_compatibility(&profile, &ReferenceTables::builtin(), &EngineConfig::default())?;
//! println!("{:?}", report.verdict.macos_version);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluators;
pub mod obs;
pub mod profile;
pub mod rules;
pub mod state;
pub mod telemetry;
pub mod verdict;

pub use config::EngineConfig;
pub use engine::{check_compatibility, CompatibilityChecker};
pub use error::{CompatError, Result};
pub use profile::{
    category, AudioDevice, CpuInfo, DeviceMap, GpuDevice, HardwareProfile, InstructionSet,
    NetworkDevice, SdController, StorageController,
};
pub use state::{CompatState, CLOSED};
pub use telemetry::init_tracing;
pub use verdict::{CompatibilityReport, CompatibilityVerdict, VersionRange};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
