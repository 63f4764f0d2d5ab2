//! Structured observability hooks for evaluation lifecycle events.
//!
//! This module provides:
//! - Evaluation-scoped tracing spans via `EvaluationSpan` RAII guard
//! - Emission functions for the lifecycle events: start, category skip, finish
//!
//! Events are emitted at `info!` level (filter with `HWCOMPAT_LOG` or `RUST_LOG`).

use tracing::info;

/// RAII guard that enters an evaluation-scoped span for one profile.
///
/// # Example
///
/// ```ignore
/// let _span = EvaluationSpan::enter(&profile.digest());
/// // every event below carries profile_digest
/// ```
pub struct EvaluationSpan {
    _span: tracing::span::EnteredSpan,
}

impl EvaluationSpan {
    /// Create and enter a span tagged with the profile digest.
    pub fn enter(profile_digest: &str) -> Self {
        let span = tracing::info_span!("hwcompat.evaluation", profile_digest = %profile_digest);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: evaluation started for a processor.
pub fn emit_evaluation_started(profile_digest: &str, processor: &str) {
    info!(
        event = "compat.started",
        profile_digest = %profile_digest,
        processor = %processor,
    );
}

/// Emit event: the remaining categories were not evaluated.
///
/// # Example
///
/// ```ignore
/// emit_categories_skipped("GPU", "no supported GPU");
/// // logs: event=compat.category_skipped after=GPU reason="no supported GPU"
/// ```
pub fn emit_categories_skipped(after: &str, reason: &str) {
    info!(event = "compat.category_skipped", after = %after, reason = %reason);
}

/// Emit event: evaluation finished with the final bounds.
pub fn emit_evaluation_finished(
    min_version: i32,
    max_version: i32,
    unsupported: usize,
    duration_ms: u64,
) {
    info!(
        event = "compat.finished",
        min_version = min_version,
        max_version = max_version,
        unsupported = unsupported,
        duration_ms = duration_ms,
    );
}
