//! Category evaluators.
//!
//! One module per device category. Every evaluator takes the
//! [`CompatState`](crate::state::CompatState) by value together with its
//! slice of the profile and returns the updated state plus the filtered
//! slice. None of them touch the profile directly; the orchestrator in
//! [`engine`](crate::engine) decides what to write back.

pub mod audio;
pub mod biometric;
pub mod cpu;
pub mod gpu;
pub mod network;
pub mod sd_controller;
pub mod storage;

/// Whether evaluation continues after an evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Remaining categories are skipped.
    Halt,
}
