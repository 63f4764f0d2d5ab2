//! Audio evaluator.

use hwcompat_data::ReferenceData;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::profile::{category, device_props, AudioDevice, DeviceMap};
use crate::state::CompatState;

/// Codec vendors whose HDMI/DisplayPort audio works out of the box.
const NATIVE_CODEC_VENDORS: [&str; 2] = ["8086", "1002"];

/// Keep USB audio, Intel/AMD codecs and codecs with a known layout.
///
/// Codecs with a known layout are moved to the front of the result, most
/// recently encountered first; the rest keep their relative order.
/// Bounds are never changed.
pub fn evaluate(
    mut state: CompatState,
    devices: &DeviceMap,
    reference: &dyn ReferenceData,
) -> Result<(CompatState, DeviceMap)> {
    let mut prioritized: Vec<(&String, &Value)> = Vec::new();
    let mut others: Vec<(&String, &Value)> = Vec::new();

    for (name, value) in devices {
        let props = device_props(category::AUDIO, name, value)?;
        let device = AudioDevice::from_props(name, props)?;

        let has_layout = reference.is_supported_codec(device.codec_id);
        let native = NATIVE_CODEC_VENDORS
            .iter()
            .any(|vendor| device.codec_id.starts_with(vendor));

        if has_layout {
            prioritized.insert(0, (name, value));
        } else if device.bus_type.contains("USB") || native {
            others.push((name, value));
        } else {
            debug!(category = "Audio", device = %name, codec = device.codec_id, "no layout");
            state.mark_unsupported(describe(&device));
        }
    }

    let supported = prioritized
        .into_iter()
        .chain(others)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    Ok((state, supported))
}

fn describe(device: &AudioDevice<'_>) -> String {
    if device.endpoints.is_empty() {
        format!("Audio: {}", device.name)
    } else {
        format!("Audio: {} ({})", device.name, device.endpoints.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use hwcompat_data::ReferenceTables;
    use serde_json::json;

    fn run(devices: Value) -> (CompatState, DeviceMap) {
        let devices = devices.as_object().cloned().unwrap_or_default();
        evaluate(
            CompatState::new(&EngineConfig::default()),
            &devices,
            &ReferenceTables::builtin(),
        )
        .unwrap()
    }

    #[test]
    fn test_catalog_codecs_move_to_front_in_reverse_order() {
        let (state, kept) = run(json!({
            "USB Audio": {"Codec ID": "0D8C-0014", "Bus Type": "USB"},
            "Realtek ALC897": {"Codec ID": "10EC-0897", "Bus Type": "PCI"},
            "Intel HDMI": {"Codec ID": "8086-280B", "Bus Type": "PCI"},
            "Realtek ALC1220": {"Codec ID": "10EC-1220", "Bus Type": "PCI"}
        }));
        let order: Vec<&String> = kept.keys().collect();
        assert_eq!(
            order,
            ["Realtek ALC1220", "Realtek ALC897", "USB Audio", "Intel HDMI"]
        );
        assert!(state.unsupported_devices().is_empty());
    }

    #[test]
    fn test_unknown_codec_lists_endpoints() {
        let (state, kept) = run(json!({
            "Creative X-Fi": {
                "Codec ID": "1102-0099",
                "Bus Type": "PCI",
                "Audio Endpoints": ["Speakers", "Headphones"]
            },
            "Conexant": {"Codec ID": "14F1-FFFF", "Bus Type": "PCI"}
        }));
        assert!(kept.is_empty());
        assert_eq!(
            state.unsupported_devices(),
            [
                "Audio: Creative X-Fi (Speakers,Headphones)",
                "Audio: Conexant"
            ]
        );
    }

    #[test]
    fn test_bounds_untouched() {
        let (state, _) = run(json!({"Mystery": {"Codec ID": "FFFF-0000", "Bus Type": "PCI"}}));
        assert_eq!((state.min_version(), state.max_version()), (17, 24));
    }
}
