//! SD card reader evaluator.

use hwcompat_data::{PciIdList, ReferenceData};
use serde_json::{Map, Value};

use crate::error::{CompatError, Result};
use crate::profile::{category, SdController};
use crate::state::CompatState;

/// Only Realtek PCIe card readers have a driver.
///
/// Returns the replacement payload when the reader is unsupported: an
/// empty object, so the category stays present but reports nothing.
pub fn evaluate(
    mut state: CompatState,
    sd: Option<&Value>,
    reference: &dyn ReferenceData,
) -> Result<(CompatState, Option<Value>)> {
    let props = match sd {
        None | Some(Value::Null) => return Ok((state, None)),
        Some(Value::Object(props)) if props.is_empty() => return Ok((state, None)),
        Some(Value::Object(props)) => props,
        Some(_) => {
            return Err(CompatError::InvalidProfile(format!(
                "{} must be an object",
                category::SD_CONTROLLER
            )))
        }
    };

    let controller = SdController::from_props(props)?;
    if reference.contains_pci_id(PciIdList::RealtekCardReader, controller.device_id) {
        return Ok((state, None));
    }

    state.mark_unsupported(format!("SD Controller: {}", controller.description()?));
    Ok((state, Some(Value::Object(Map::new()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use hwcompat_data::ReferenceTables;
    use serde_json::json;

    fn run(sd: Option<Value>) -> Result<(CompatState, Option<Value>)> {
        evaluate(
            CompatState::new(&EngineConfig::default()),
            sd.as_ref(),
            &ReferenceTables::builtin(),
        )
    }

    #[test]
    fn test_realtek_reader_is_kept() {
        let (state, replacement) = run(Some(json!({
            "Device ID": "10EC-525A", "Device Description": "Realtek RTS525A"
        })))
        .unwrap();
        assert!(replacement.is_none());
        assert!(state.unsupported_devices().is_empty());
    }

    #[test]
    fn test_other_reader_is_emptied() {
        let (state, replacement) = run(Some(json!({
            "Device ID": "1217-8621", "Device Description": "O2 Micro SD Host"
        })))
        .unwrap();
        assert_eq!(replacement, Some(json!({})));
        assert_eq!(state.unsupported_devices(), ["SD Controller: O2 Micro SD Host"]);
    }

    #[test]
    fn test_absent_or_empty_is_untouched() {
        assert!(run(None).unwrap().1.is_none());
        assert!(run(Some(json!({}))).unwrap().1.is_none());
    }

    #[test]
    fn test_description_required_when_reported() {
        let err = run(Some(json!({"Device ID": "1217-8621"}))).unwrap_err();
        assert!(matches!(err, CompatError::MissingField { ref field, .. } if field == "Device Description"));
    }
}
