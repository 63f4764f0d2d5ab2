//! Biometric evaluator.

use serde_json::Value;

use crate::error::{CompatError, Result};
use crate::profile::category;
use crate::state::CompatState;

/// What to do with the `Biometric` category afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiometricOutcome {
    Untouched,
    Remove,
}

/// No biometric device has a driver. Every device is reported and a
/// non-empty category is removed from the profile.
pub fn evaluate(
    mut state: CompatState,
    biometric: Option<&Value>,
) -> Result<(CompatState, BiometricOutcome)> {
    let devices = match biometric {
        None | Some(Value::Null) => return Ok((state, BiometricOutcome::Untouched)),
        Some(Value::Object(devices)) => devices,
        Some(_) => {
            return Err(CompatError::InvalidProfile(format!(
                "{} must be an object",
                category::BIOMETRIC
            )))
        }
    };
    if devices.is_empty() {
        return Ok((state, BiometricOutcome::Untouched));
    }

    for name in devices.keys() {
        state.mark_unsupported(format!("Biometric: {}", name));
    }
    Ok((state, BiometricOutcome::Remove))
}
