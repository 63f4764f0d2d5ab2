//! Orchestrator.
//!
//! Runs the evaluators in a fixed order: CPU, then GPU, then Audio,
//! Biometric, Network, Storage and SD Controller. An unsupported CPU stops
//! evaluation before the GPU; a profile left without a supported GPU stops
//! it before Audio. Either way the verdict is written into the output
//! profile.

use std::sync::Arc;
use std::time::Instant;

use hwcompat_data::{ReferenceData, ReferenceTables};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::{CompatError, Result};
use crate::evaluators::biometric::BiometricOutcome;
use crate::evaluators::gpu::HostContext;
use crate::evaluators::{audio, biometric, cpu, gpu, network, sd_controller, storage, Flow};
use crate::obs::{
    emit_categories_skipped, emit_evaluation_finished, emit_evaluation_started, EvaluationSpan,
};
use crate::profile::{category, motherboard_chipset, CpuInfo, HardwareProfile};
use crate::state::CompatState;
use crate::verdict::CompatibilityReport;

/// Evaluate a profile against reference data.
///
/// The input is not modified. The report carries a copy of the profile with
/// unsupported devices filtered out of their categories, `Biometric`
/// removed when it listed anything, and the verdict under `Compatibility`.
pub fn check_compatibility(
    profile: &HardwareProfile,
    reference: &dyn ReferenceData,
    config: &EngineConfig,
) -> Result<CompatibilityReport> {
    let started = Instant::now();
    let digest = profile.digest();
    let _span = EvaluationSpan::enter(&digest);

    let cpu_info = CpuInfo::from_profile(profile)?;
    emit_evaluation_started(&digest, cpu_info.processor_name);

    let mut output = profile.clone();
    let (state, flow) = cpu::evaluate(CompatState::new(config), &cpu_info);
    let state = match flow {
        Flow::Halt => {
            emit_categories_skipped(category::CPU, "unsupported CPU");
            state
        }
        Flow::Continue => {
            evaluate_devices(state, &cpu_info, profile, &mut output, reference, config)?
        }
    };

    let verdict = state.into_verdict();
    output.insert(category::COMPATIBILITY, serde_json::to_value(&verdict)?);
    emit_evaluation_finished(
        verdict.macos_version.min_version,
        verdict.macos_version.max_version,
        verdict.unsupported_devices.len(),
        started.elapsed().as_millis() as u64,
    );

    Ok(CompatibilityReport {
        profile: output,
        verdict,
    })
}

/// GPU and everything after it. Reads from `input`, writes filtered
/// categories to `output`.
fn evaluate_devices(
    state: CompatState,
    cpu_info: &CpuInfo<'_>,
    input: &HardwareProfile,
    output: &mut HardwareProfile,
    reference: &dyn ReferenceData,
    config: &EngineConfig,
) -> Result<CompatState> {
    let host = HostContext {
        cpu: cpu_info,
        chipset: motherboard_chipset(input)?,
    };
    let gpus = input.category_map(category::GPU)?;
    let (state, gpus) = gpu::evaluate(state, host, gpus, reference, config)?;
    let no_gpu = gpus.is_empty();
    output.insert(category::GPU, Value::Object(gpus));
    if no_gpu {
        emit_categories_skipped(category::GPU, "no supported GPU");
        return Ok(state);
    }

    let (state, devices) =
        audio::evaluate(state, input.category_map(category::AUDIO)?, reference)?;
    output.insert(category::AUDIO, Value::Object(devices));

    let (state, outcome) = biometric::evaluate(state, input.get(category::BIOMETRIC))?;
    if outcome == BiometricOutcome::Remove {
        output.remove(category::BIOMETRIC);
    }

    let (state, devices) =
        network::evaluate(state, input.category_map(category::NETWORK)?, reference)?;
    output.insert(category::NETWORK, Value::Object(devices));

    let mut storage_payload = input.category_map(category::STORAGE)?.clone();
    let controllers = storage_payload
        .get(category::STORAGE_CONTROLLERS)
        .and_then(Value::as_object)
        .ok_or_else(|| CompatError::missing_category(category::STORAGE_CONTROLLERS))?;
    let (state, controllers) = storage::evaluate(state, controllers, reference)?;
    storage_payload.insert(
        category::STORAGE_CONTROLLERS.to_string(),
        Value::Object(controllers),
    );
    output.insert(category::STORAGE, Value::Object(storage_payload));

    let (state, replacement) =
        sd_controller::evaluate(state, input.get(category::SD_CONTROLLER), reference)?;
    if let Some(value) = replacement {
        output.insert(category::SD_CONTROLLER, value);
    }

    Ok(state)
}

/// Shares one set of reference data and configuration across evaluations.
///
/// Cheap to clone; clones share the reference tables, so independent
/// profiles can be checked from several threads at once.
#[derive(Clone)]
pub struct CompatibilityChecker {
    reference: Arc<dyn ReferenceData>,
    config: EngineConfig,
}

impl CompatibilityChecker {
    pub fn new(reference: Arc<dyn ReferenceData>, config: EngineConfig) -> Self {
        Self { reference, config }
    }

    /// Built-in reference tables with [`EngineConfig::from_env`].
    pub fn builtin() -> Self {
        Self::new(Arc::new(ReferenceTables::builtin()), EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn reference(&self) -> &dyn ReferenceData {
        self.reference.as_ref()
    }

    pub fn check(&self, profile: &HardwareProfile) -> Result<CompatibilityReport> {
        check_compatibility(profile, self.reference.as_ref(), &self.config)
    }
}

impl std::fmt::Debug for CompatibilityChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompatibilityChecker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
