//! Loading reference tables from disk.

use hwcompat_data::{PciIdList, ReferenceData, ReferenceError, ReferenceTables};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_round_trips_builtin_tables() {
    let builtin = ReferenceTables::builtin();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(builtin.to_json_string().unwrap().as_bytes())
        .unwrap();

    let loaded = ReferenceTables::load(file.path()).unwrap();
    assert_eq!(loaded, builtin);
    assert!(loaded.is_supported_codec("10EC-0269"));
    assert!(loaded.chipset_in_range("Z590", 110..122));
}

#[test]
fn test_load_custom_tables_replaces_builtin_lists() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "cpu_generations": ["Sandy Bridge", "Ivy Bridge"],
            "chipsets": ["Z77"],
            "amd_integrated_gpu_ids": ["1002-aaaa"],
            "network_ids": [],
            "realtek_card_reader_ids": [],
            "intel_vmd_ids": [],
            "unsupported_nvme_ids": {{}},
            "codecs": {{"10ec-0887": [2, 1, 1]}}
        }}"#
    )
    .unwrap();

    let tables = ReferenceTables::load(file.path()).unwrap();
    assert!(tables.contains_pci_id(PciIdList::AmdIntegratedGpu, "1002-AAAA"));
    assert!(!tables.contains_pci_id(PciIdList::Network, "8086-15B8"));
    assert_eq!(tables.codecs.layout_ids("10EC-0887"), Some(&[1, 2][..]));
    assert!(!tables.cpu_generation_in_range("Haswell", 0..12));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReferenceTables::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ReferenceError::Io(_)));
}

#[test]
fn test_load_malformed_json_is_json_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();
    let err = ReferenceTables::load(file.path()).unwrap_err();
    assert!(matches!(err, ReferenceError::Json(_)));
}
