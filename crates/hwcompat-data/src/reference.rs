//! Reference data tables and the query interface the rule engine consumes.
//!
//! The engine never walks these tables itself. It asks three kinds of
//! question: "does this name match a table entry within index range R",
//! "is this id in list L" and "what is the description of this id in map M".

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;
use std::path::Path;
use tracing::debug;

use crate::builtin;
use crate::codec::{normalize_id, CodecCatalog};
use crate::error::ReferenceError;
use crate::Result;

/// PCI id allow/deny lists addressable by membership query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PciIdList {
    /// AMD APU graphics with a working framebuffer
    AmdIntegratedGpu,
    /// Ethernet and Wi-Fi controllers with an available driver
    Network,
    /// Realtek PCIe card readers
    RealtekCardReader,
    /// Intel Volume Management Device controllers
    IntelVmd,
}

/// Read-only reference data queried during an evaluation.
///
/// Implementations must be immutable for the duration of an evaluation so
/// that independent profiles can be checked concurrently against one table.
pub trait ReferenceData: Send + Sync {
    /// Whether `codename` contains any CPU generation name at table indices `range`.
    fn cpu_generation_in_range(&self, codename: &str, range: Range<usize>) -> bool;

    /// Whether `chipset` contains any chipset name at table indices `range`.
    fn chipset_in_range(&self, chipset: &str, range: Range<usize>) -> bool;

    /// Whether `id` is a member of `list`.
    fn contains_pci_id(&self, list: PciIdList, id: &str) -> bool;

    /// Description of an NVMe id known to be unsupported.
    fn unsupported_nvme_description(&self, id: &str) -> Option<&str>;

    /// Whether the audio codec has a known layout.
    fn is_supported_codec(&self, codec_id: &str) -> bool;
}

/// The concrete set of reference tables.
///
/// Serializes to the JSON document accepted by [`ReferenceTables::load`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    /// Intel CPU generation codenames, oldest first.
    pub cpu_generations: Vec<String>,
    /// Intel chipset names in table order.
    pub chipsets: Vec<String>,
    pub amd_integrated_gpu_ids: BTreeSet<String>,
    pub network_ids: BTreeSet<String>,
    pub realtek_card_reader_ids: BTreeSet<String>,
    pub intel_vmd_ids: BTreeSet<String>,
    /// NVMe id → human-readable drive description.
    pub unsupported_nvme_ids: BTreeMap<String, String>,
    /// Codec id → layout ids.
    #[serde(default)]
    pub codecs: CodecCatalog,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceTables {
    /// Tables bundled with the crate.
    pub fn builtin() -> Self {
        ReferenceTables {
            cpu_generations: to_vec(builtin::INTEL_CPU_GENERATIONS),
            chipsets: to_vec(builtin::INTEL_CHIPSETS),
            amd_integrated_gpu_ids: to_id_set(builtin::AMD_INTEGRATED_GPU_IDS),
            network_ids: to_id_set(builtin::NETWORK_IDS),
            realtek_card_reader_ids: to_id_set(builtin::REALTEK_CARD_READER_IDS),
            intel_vmd_ids: to_id_set(builtin::INTEL_VMD_IDS),
            unsupported_nvme_ids: builtin::UNSUPPORTED_NVME_IDS
                .iter()
                .map(|(id, desc)| (normalize_id(id), desc.to_string()))
                .collect(),
            codecs: CodecCatalog::builtin(),
        }
    }

    /// Load tables from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let tables = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            generations = tables.cpu_generations.len(),
            chipsets = tables.chipsets.len(),
            codecs = tables.codecs.len(),
            "loaded reference tables"
        );
        Ok(tables)
    }

    /// Parse tables from a JSON document, normalizing ids to uppercase.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tables: ReferenceTables = serde_json::from_str(json)?;
        let tables = tables.normalized();
        tables.validate()?;
        Ok(tables)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn normalized(self) -> Self {
        ReferenceTables {
            amd_integrated_gpu_ids: normalize_set(self.amd_integrated_gpu_ids),
            network_ids: normalize_set(self.network_ids),
            realtek_card_reader_ids: normalize_set(self.realtek_card_reader_ids),
            intel_vmd_ids: normalize_set(self.intel_vmd_ids),
            unsupported_nvme_ids: self
                .unsupported_nvme_ids
                .into_iter()
                .map(|(id, desc)| (normalize_id(&id), desc))
                .collect(),
            codecs: self.codecs.normalized(),
            ..self
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cpu_generations.is_empty() {
            return Err(ReferenceError::InvalidTable(
                "cpu_generations must not be empty".to_string(),
            ));
        }
        if self.chipsets.is_empty() {
            return Err(ReferenceError::InvalidTable(
                "chipsets must not be empty".to_string(),
            ));
        }
        if let Some(blank) = self
            .cpu_generations
            .iter()
            .chain(self.chipsets.iter())
            .find(|name| name.trim().is_empty())
        {
            return Err(ReferenceError::InvalidTable(format!(
                "blank table entry: {:?}",
                blank
            )));
        }
        Ok(())
    }

    fn pci_list(&self, list: PciIdList) -> &BTreeSet<String> {
        match list {
            PciIdList::AmdIntegratedGpu => &self.amd_integrated_gpu_ids,
            PciIdList::Network => &self.network_ids,
            PciIdList::RealtekCardReader => &self.realtek_card_reader_ids,
            PciIdList::IntelVmd => &self.intel_vmd_ids,
        }
    }
}

impl ReferenceData for ReferenceTables {
    fn cpu_generation_in_range(&self, codename: &str, range: Range<usize>) -> bool {
        contains_any(&self.cpu_generations, codename, range)
    }

    fn chipset_in_range(&self, chipset: &str, range: Range<usize>) -> bool {
        contains_any(&self.chipsets, chipset, range)
    }

    fn contains_pci_id(&self, list: PciIdList, id: &str) -> bool {
        self.pci_list(list).contains(&normalize_id(id))
    }

    fn unsupported_nvme_description(&self, id: &str) -> Option<&str> {
        self.unsupported_nvme_ids
            .get(&normalize_id(id))
            .map(String::as_str)
    }

    fn is_supported_codec(&self, codec_id: &str) -> bool {
        self.codecs.contains(codec_id)
    }
}

/// Whether `haystack` contains any table entry whose index falls in `range`.
///
/// Out-of-bounds ranges are clamped to the table.
fn contains_any(table: &[String], haystack: &str, range: Range<usize>) -> bool {
    let end = range.end.min(table.len());
    let start = range.start.min(end);
    table[start..end]
        .iter()
        .any(|entry| haystack.contains(entry.as_str()))
}

fn to_vec(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn to_id_set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| normalize_id(id)).collect()
}

fn normalize_set(ids: BTreeSet<String>) -> BTreeSet<String> {
    ids.into_iter().map(|id| normalize_id(&id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_range_matches_by_substring() {
        let tables = ReferenceTables::builtin();
        assert!(tables.cpu_generation_in_range("Kaby Lake-R", 0..12));
        assert!(tables.cpu_generation_in_range("Comet Lake", 0..12));
        assert!(!tables.cpu_generation_in_range("Tiger Lake", 0..12));
        assert!(tables.cpu_generation_in_range("Tiger Lake", 0..19));
    }

    #[test]
    fn test_chipset_range_covers_500_series_only() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.chipsets[110], "B560");
        assert_eq!(tables.chipsets[121], "WM590");
        assert!(tables.chipset_in_range("Intel Z590", 110..122));
        assert!(tables.chipset_in_range("H510", 110..122));
        assert!(!tables.chipset_in_range("Z490", 110..122));
        assert!(!tables.chipset_in_range("B660", 110..122));
    }

    #[test]
    fn test_range_is_clamped_to_table() {
        let tables = ReferenceTables::builtin();
        assert!(!tables.chipset_in_range("Z590", 500..900));
        assert!(tables.cpu_generation_in_range("Lunar Lake", 12..1000));
    }

    #[test]
    fn test_pci_membership_is_case_insensitive() {
        let tables = ReferenceTables::builtin();
        assert!(tables.contains_pci_id(PciIdList::Network, "8086-15b8"));
        assert!(tables.contains_pci_id(PciIdList::AmdIntegratedGpu, "1002-1636"));
        assert!(!tables.contains_pci_id(PciIdList::AmdIntegratedGpu, "1002-73BF"));
        assert!(tables.contains_pci_id(PciIdList::IntelVmd, " 8086-9a0b "));
    }

    #[test]
    fn test_unsupported_nvme_description() {
        let tables = ReferenceTables::builtin();
        assert_eq!(
            tables.unsupported_nvme_description("144d-a808"),
            Some("Samsung PM981/PM981a")
        );
        assert_eq!(tables.unsupported_nvme_description("144D-A809"), None);
    }

    #[test]
    fn test_json_round_trip_preserves_queries() {
        let tables = ReferenceTables::builtin();
        let json = tables.to_json_string().unwrap();
        let parsed = ReferenceTables::from_json_str(&json).unwrap();
        assert_eq!(parsed, tables);
    }

    #[test]
    fn test_from_json_normalizes_ids() {
        let json = r#"{
            "cpu_generations": ["Sandy Bridge"],
            "chipsets": ["Z68"],
            "amd_integrated_gpu_ids": [],
            "network_ids": ["10ec-8168"],
            "realtek_card_reader_ids": [],
            "intel_vmd_ids": [],
            "unsupported_nvme_ids": {"144d-a808": "Samsung PM981"}
        }"#;
        let tables = ReferenceTables::from_json_str(json).unwrap();
        assert!(tables.contains_pci_id(PciIdList::Network, "10EC-8168"));
        assert_eq!(
            tables.unsupported_nvme_description("144D-A808"),
            Some("Samsung PM981")
        );
        assert!(tables.codecs.is_empty());
    }

    #[test]
    fn test_from_json_rejects_empty_generation_table() {
        let json = r#"{
            "cpu_generations": [],
            "chipsets": ["Z68"],
            "amd_integrated_gpu_ids": [],
            "network_ids": [],
            "realtek_card_reader_ids": [],
            "intel_vmd_ids": [],
            "unsupported_nvme_ids": {}
        }"#;
        let err = ReferenceTables::from_json_str(json).unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidTable(_)));
    }
}
