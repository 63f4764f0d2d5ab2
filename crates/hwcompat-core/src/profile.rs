//! Hardware profile model.
//!
//! A profile is the JSON report produced by the hardware sniffer: a map from
//! category name to category payload. The engine keeps the document as-is,
//! so categories and device properties it never reads survive evaluation
//! untouched, and reads typed views of the slices each rule needs.
//!
//! Views are built lazily. A missing field is only an error when the
//! category that needs it is actually evaluated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::{CompatError, Result};

/// Category keys of the profile document.
pub mod category {
    pub const CPU: &str = "CPU";
    pub const MOTHERBOARD: &str = "Motherboard";
    pub const GPU: &str = "GPU";
    pub const AUDIO: &str = "Audio";
    pub const BIOMETRIC: &str = "Biometric";
    pub const NETWORK: &str = "Network";
    pub const STORAGE: &str = "Storage";
    pub const STORAGE_CONTROLLERS: &str = "Storage Controllers";
    pub const SD_CONTROLLER: &str = "SD Controller";
    pub const COMPATIBILITY: &str = "Compatibility";
}

/// Ordered mapping of device name → device properties.
pub type DeviceMap = Map<String, Value>;

/// Snapshot of detected hardware, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HardwareProfile(Map<String, Value>);

impl HardwareProfile {
    pub fn new(categories: Map<String, Value>) -> Self {
        HardwareProfile(categories)
    }

    /// Wrap a JSON value; the top level must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(categories) => Ok(HardwareProfile(categories)),
            other => Err(CompatError::InvalidProfile(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn get(&self, category: &str) -> Option<&Value> {
        self.0.get(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    /// Replace a category in place, keeping its position when it exists.
    pub fn insert(&mut self, category: &str, value: Value) {
        self.0.insert(category.to_string(), value);
    }

    /// Remove a category, keeping the order of the remaining ones.
    pub fn remove(&mut self, category: &str) -> Option<Value> {
        self.0.shift_remove(category)
    }

    /// A required category whose payload is an object.
    pub fn category_map(&self, category: &str) -> Result<&Map<String, Value>> {
        self.0
            .get(category)
            .and_then(Value::as_object)
            .ok_or_else(|| CompatError::missing_category(category))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// SHA-256 of the compact JSON encoding, hex encoded.
    pub fn digest(&self) -> String {
        let encoded = Value::Object(self.0.clone()).to_string();
        let mut hasher = Sha256::new();
        hasher.update(encoded.as_bytes());
        hex::encode(hasher.finalize())
    }
}

// ---------------------------------------------------------------------------
// Field access
// ---------------------------------------------------------------------------

fn required_str<'a>(props: &'a Map<String, Value>, location: &str, field: &str) -> Result<&'a str> {
    props
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| CompatError::missing_field(location, field))
}

fn optional_str<'a>(props: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    props.get(field).and_then(Value::as_str)
}

/// Properties of one device entry, which must be an object.
pub(crate) fn device_props<'a>(
    category: &str,
    name: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        CompatError::InvalidProfile(format!(
            "{} device '{}' is {}, expected an object",
            category,
            name,
            json_kind(value)
        ))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// CPU / Motherboard
// ---------------------------------------------------------------------------

/// CPU feature flags, e.g. `x86-64, SSE4.1, SSE4.2, AVX2`.
///
/// Accepts either a comma-separated string or an array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionSet {
    flags: Vec<String>,
}

impl InstructionSet {
    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        InstructionSet {
            flags: flags
                .into_iter()
                .map(|f| f.as_ref().trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::new(s.split(','))),
            Value::Array(items) => items
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
                .map(Self::new),
            _ => None,
        }
    }

    /// Exact flag match.
    pub fn has(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Any SSE4 level (`SSE4`, `SSE4.1`, `SSE4.2`, `SSE4a`).
    pub fn has_sse4(&self) -> bool {
        self.flags.iter().any(|f| f.starts_with("SSE4"))
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }
}

/// The `CPU` category.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo<'a> {
    pub processor_name: &'a str,
    pub instruction_set: InstructionSet,
}

impl<'a> CpuInfo<'a> {
    pub fn from_profile(profile: &'a HardwareProfile) -> Result<Self> {
        let props = profile.category_map(category::CPU)?;
        let processor_name = required_str(props, category::CPU, "Processor Name")?;
        let instruction_set = props
            .get("Instruction Set")
            .and_then(InstructionSet::from_value)
            .ok_or_else(|| CompatError::missing_field(category::CPU, "Instruction Set"))?;
        Ok(CpuInfo {
            processor_name,
            instruction_set,
        })
    }

    /// Celeron and Pentium parts ship with cut-down integrated graphics.
    pub fn is_low_end(&self) -> bool {
        ["Celeron", "Pentium"]
            .iter()
            .any(|brand| self.processor_name.contains(brand))
    }
}

/// `Motherboard.Motherboard Chipset`.
pub fn motherboard_chipset(profile: &HardwareProfile) -> Result<&str> {
    let props = profile.category_map(category::MOTHERBOARD)?;
    required_str(props, category::MOTHERBOARD, "Motherboard Chipset")
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// One entry of the `GPU` category.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuDevice<'a> {
    pub name: &'a str,
    pub manufacturer: &'a str,
    pub device_type: &'a str,
    codename: Option<&'a str>,
    pub device_id: Option<&'a str>,
}

impl<'a> GpuDevice<'a> {
    pub fn from_props(name: &'a str, props: &'a Map<String, Value>) -> Result<Self> {
        let location = device_location(category::GPU, name);
        Ok(GpuDevice {
            name,
            manufacturer: required_str(props, &location, "Manufacturer")?,
            device_type: required_str(props, &location, "Device Type")?,
            codename: optional_str(props, "GPU Codename"),
            device_id: optional_str(props, "Device ID"),
        })
    }

    /// `GPU Codename`, required by every rule that classifies by architecture.
    pub fn codename(&self) -> Result<&'a str> {
        self.codename.ok_or_else(|| {
            CompatError::missing_field(device_location(category::GPU, self.name), "GPU Codename")
        })
    }

    pub fn is_integrated(&self) -> bool {
        self.device_type.contains("Integrated GPU")
    }

    pub fn is_discrete(&self) -> bool {
        self.device_type.contains("Discrete GPU")
    }
}

/// One entry of the `Audio` category.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioDevice<'a> {
    pub name: &'a str,
    pub codec_id: &'a str,
    pub bus_type: &'a str,
    pub endpoints: Vec<&'a str>,
}

impl<'a> AudioDevice<'a> {
    pub fn from_props(name: &'a str, props: &'a Map<String, Value>) -> Result<Self> {
        let location = device_location(category::AUDIO, name);
        let endpoints = props
            .get("Audio Endpoints")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        Ok(AudioDevice {
            name,
            codec_id: required_str(props, &location, "Codec ID")?,
            bus_type: required_str(props, &location, "Bus Type")?,
            endpoints,
        })
    }
}

/// One entry of the `Network` category.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDevice<'a> {
    pub name: &'a str,
    pub connection_name: &'a str,
    pub bus_type: &'a str,
    pub device_id: &'a str,
}

impl<'a> NetworkDevice<'a> {
    pub fn from_props(name: &'a str, props: &'a Map<String, Value>) -> Result<Self> {
        let location = device_location(category::NETWORK, name);
        Ok(NetworkDevice {
            name,
            connection_name: required_str(props, &location, "Connection Name")?,
            bus_type: required_str(props, &location, "Bus Type")?,
            device_id: required_str(props, &location, "Device ID")?,
        })
    }
}

/// One entry of `Storage.Storage Controllers`.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageController<'a> {
    pub name: &'a str,
    pub bus_type: &'a str,
    device_id: Option<&'a str>,
}

impl<'a> StorageController<'a> {
    pub fn from_props(name: &'a str, props: &'a Map<String, Value>) -> Result<Self> {
        let location = device_location(category::STORAGE_CONTROLLERS, name);
        Ok(StorageController {
            name,
            bus_type: required_str(props, &location, "Bus Type")?,
            device_id: optional_str(props, "Device ID"),
        })
    }

    pub fn is_pci(&self) -> bool {
        self.bus_type.contains("PCI")
    }

    /// `Device ID`, required for PCI controllers.
    pub fn device_id(&self) -> Result<&'a str> {
        self.device_id.ok_or_else(|| {
            CompatError::missing_field(
                device_location(category::STORAGE_CONTROLLERS, self.name),
                "Device ID",
            )
        })
    }
}

/// The `SD Controller` category: a single record, not a device map.
#[derive(Debug, Clone, PartialEq)]
pub struct SdController<'a> {
    pub device_id: &'a str,
    description: Option<&'a str>,
}

impl<'a> SdController<'a> {
    pub fn from_props(props: &'a Map<String, Value>) -> Result<Self> {
        Ok(SdController {
            device_id: required_str(props, category::SD_CONTROLLER, "Device ID")?,
            description: optional_str(props, "Device Description"),
        })
    }

    /// `Device Description`, required once the controller is reported.
    pub fn description(&self) -> Result<&'a str> {
        self.description
            .ok_or_else(|| CompatError::missing_field(category::SD_CONTROLLER, "Device Description"))
    }
}

fn device_location(category: &str, name: &str) -> String {
    format!("{} device '{}'", category, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(value: Value) -> HardwareProfile {
        HardwareProfile::from_value(value).unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = HardwareProfile::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, CompatError::InvalidProfile(_)));
    }

    #[test]
    fn test_instruction_set_from_string_and_array() {
        let p = profile(json!({
            "CPU": {"Processor Name": "Intel Core i7-8700", "Instruction Set": "x86-64, SSE4.1, SSE4.2, AVX2"}
        }));
        let cpu = CpuInfo::from_profile(&p).unwrap();
        assert!(cpu.instruction_set.has("AVX2"));
        assert!(cpu.instruction_set.has("SSE4.2"));
        assert!(!cpu.instruction_set.has("SSE4"));
        assert!(cpu.instruction_set.has_sse4());

        let p = profile(json!({
            "CPU": {"Processor Name": "AMD Ryzen 5 5600X", "Instruction Set": ["x86-64", "SSE4a"]}
        }));
        let cpu = CpuInfo::from_profile(&p).unwrap();
        assert_eq!(cpu.instruction_set.flags(), ["x86-64", "SSE4a"]);
        assert!(cpu.instruction_set.has_sse4());
    }

    #[test]
    fn test_cpu_missing_processor_name() {
        let p = profile(json!({"CPU": {"Instruction Set": "x86-64, SSE4.2"}}));
        let err = CpuInfo::from_profile(&p).unwrap_err();
        match err {
            CompatError::MissingField { field, location } => {
                assert_eq!(field, "Processor Name");
                assert_eq!(location, "CPU");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cpu_low_end_detection() {
        let p = profile(json!({
            "CPU": {"Processor Name": "Intel Celeron N4020", "Instruction Set": "x86-64, SSE4.2"}
        }));
        assert!(CpuInfo::from_profile(&p).unwrap().is_low_end());
    }

    #[test]
    fn test_gpu_codename_is_lazily_required() {
        let props = json!({"Manufacturer": "AMD", "Device Type": "Integrated GPU", "Device ID": "1002-1636"});
        let gpu = GpuDevice::from_props("Radeon Vega 7", props.as_object().unwrap()).unwrap();
        assert!(gpu.is_integrated());
        assert_eq!(gpu.device_id, Some("1002-1636"));
        let err = gpu.codename().unwrap_err();
        assert!(err.to_string().contains("GPU Codename"));
    }

    #[test]
    fn test_audio_endpoints_optional() {
        let props = json!({"Codec ID": "10EC-0897", "Bus Type": "PCI"});
        let audio = AudioDevice::from_props("Realtek ALC897", props.as_object().unwrap()).unwrap();
        assert!(audio.endpoints.is_empty());
    }

    #[test]
    fn test_digest_is_stable() {
        let p = profile(json!({"CPU": {"Processor Name": "x"}}));
        assert_eq!(p.digest(), p.clone().digest());
        assert_eq!(p.digest().len(), 64);
    }

    #[test]
    fn test_remove_keeps_order_of_remaining_categories() {
        let mut p = profile(json!({
            "CPU": {}, "GPU": {}, "Biometric": {"a": {}}, "Network": {}, "Storage": {}
        }));
        assert_eq!(p.remove("Biometric"), Some(json!({"a": {}})));
        assert_eq!(p.remove("Biometric"), None);
        let keys: Vec<&String> = p.as_map().keys().collect();
        assert_eq!(keys, ["CPU", "GPU", "Network", "Storage"]);
    }

    #[test]
    fn test_insert_keeps_category_position() {
        let mut p = profile(json!({"CPU": {}, "GPU": {"a": {}}, "Audio": {}}));
        p.insert("GPU", json!({}));
        let keys: Vec<&String> = p.as_map().keys().collect();
        assert_eq!(keys, ["CPU", "GPU", "Audio"]);
    }
}
