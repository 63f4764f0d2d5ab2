//! Kext catalog
//!
//! Every kernel extension the configuration stage may install, with the
//! Darwin range it loads on, the kexts it pulls in and the group of kexts
//! it cannot coexist with.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

use crate::error::ReferenceError;
use crate::macos::{LATEST_DARWIN_VERSION, LOWEST_DARWIN_VERSION};
use crate::Result;

/// `(major, minor, patch)` Darwin kernel version.
pub type DarwinVersion = (u8, u8, u8);

/// A kernel extension and its constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KextInfo {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Always installed.
    pub required: bool,
    pub min_darwin: DarwinVersion,
    pub max_darwin: DarwinVersion,
    /// Kexts that must be installed alongside this one.
    pub requires: Vec<String>,
    /// At most one kext of a group may be installed.
    pub conflict_group: Option<String>,
}

impl KextInfo {
    /// Whether this kext loads on any Darwin major within `[min, max]`.
    pub fn supports_range(&self, min: i32, max: i32) -> bool {
        if min < 0 || min > max {
            return false;
        }
        i32::from(self.min_darwin.0) <= max && i32::from(self.max_darwin.0) >= min
    }
}

/// Ordered collection of [`KextInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KextCatalog {
    kexts: Vec<KextInfo>,
}

impl KextCatalog {
    pub fn new(kexts: Vec<KextInfo>) -> Self {
        KextCatalog { kexts }
    }

    /// Catalog bundled with the crate.
    pub fn builtin() -> Self {
        KextCatalog {
            kexts: BUILTIN_KEXTS.iter().map(KextSpec::to_info).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &KextInfo> {
        self.kexts.iter()
    }

    pub fn get(&self, name: &str) -> Option<&KextInfo> {
        self.kexts.iter().find(|k| k.name == name)
    }

    /// Kexts installed unconditionally.
    pub fn required(&self) -> impl Iterator<Item = &KextInfo> {
        self.kexts.iter().filter(|k| k.required)
    }

    /// Kexts that load on at least one Darwin major within `[min, max]`.
    ///
    /// Empty for the `-1` sentinel range.
    pub fn available_for(&self, min: i32, max: i32) -> Vec<&KextInfo> {
        self.kexts
            .iter()
            .filter(|k| k.supports_range(min, max))
            .collect()
    }

    /// Expand a selection into the full install set for `[min, max]`.
    ///
    /// Adds every required kext and follows `requires` transitively. Kexts
    /// that do not load anywhere in the range are left out, wherever they
    /// came from. The result is in catalog order.
    pub fn resolve(&self, selection: &[&str], min: i32, max: i32) -> Result<Vec<&KextInfo>> {
        let mut queue: VecDeque<&KextInfo> = self.required().collect();
        for name in selection {
            let kext = self
                .get(name)
                .ok_or_else(|| ReferenceError::UnknownKext(name.to_string()))?;
            queue.push_back(kext);
        }

        let mut resolved: BTreeSet<&str> = BTreeSet::new();
        while let Some(kext) = queue.pop_front() {
            if resolved.contains(kext.name.as_str()) {
                continue;
            }
            if !kext.supports_range(min, max) {
                debug!(kext = %kext.name, min, max, "kext unavailable for range, skipped");
                continue;
            }
            resolved.insert(kext.name.as_str());
            for dep in &kext.requires {
                let dep = self
                    .get(dep)
                    .ok_or_else(|| ReferenceError::UnknownKext(dep.clone()))?;
                queue.push_back(dep);
            }
        }

        let install: Vec<&KextInfo> = self
            .kexts
            .iter()
            .filter(|k| resolved.contains(k.name.as_str()))
            .collect();
        check_conflicts(&install)?;
        Ok(install)
    }
}

fn check_conflicts(install: &[&KextInfo]) -> Result<()> {
    let mut seen: Vec<(&str, &str)> = Vec::new();
    for kext in install {
        let Some(group) = kext.conflict_group.as_deref() else {
            continue;
        };
        if let Some((_, first)) = seen.iter().find(|(g, _)| *g == group) {
            return Err(ReferenceError::KextConflict {
                group: group.to_string(),
                first: first.to_string(),
                second: kext.name.clone(),
            });
        }
        seen.push((group, kext.name.as_str()));
    }
    Ok(())
}

struct KextSpec {
    name: &'static str,
    description: &'static str,
    category: &'static str,
    required: bool,
    min_darwin: Option<DarwinVersion>,
    max_darwin: Option<DarwinVersion>,
    requires: &'static [&'static str],
    conflict_group: Option<&'static str>,
}

impl KextSpec {
    fn to_info(&self) -> KextInfo {
        KextInfo {
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: self.category.to_string(),
            required: self.required,
            min_darwin: self
                .min_darwin
                .unwrap_or((LOWEST_DARWIN_VERSION as u8, 0, 0)),
            max_darwin: self
                .max_darwin
                .unwrap_or((LATEST_DARWIN_VERSION as u8, 99, 99)),
            requires: self.requires.iter().map(|r| r.to_string()).collect(),
            conflict_group: self.conflict_group.map(str::to_string),
        }
    }
}

const BUILTIN_KEXTS: &[KextSpec] = &[
    KextSpec {
        name: "Lilu",
        description: "For arbitrary kext, library, and program patching",
        category: "Required",
        required: true,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "VirtualSMC",
        description: "Advanced Apple SMC emulator in the kernel",
        category: "Required",
        required: true,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "SMCBatteryManager",
        description: "Manages, monitors, and reports on battery status",
        category: "VirtualSMC Plugins",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VirtualSMC"],
        conflict_group: None,
    },
    KextSpec {
        name: "SMCDellSensors",
        description: "Enables fan monitoring and control on Dell computers",
        category: "VirtualSMC Plugins",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VirtualSMC"],
        conflict_group: None,
    },
    KextSpec {
        name: "SMCLightSensor",
        description: "Allows system utilize ambient light sensor device",
        category: "VirtualSMC Plugins",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VirtualSMC"],
        conflict_group: None,
    },
    KextSpec {
        name: "SMCProcessor",
        description: "Manages Intel CPU temperature sensors",
        category: "VirtualSMC Plugins",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VirtualSMC"],
        conflict_group: None,
    },
    KextSpec {
        name: "SMCRadeonSensors",
        description: "Provides temperature readings for AMD GPUs",
        category: "VirtualSMC Plugins",
        required: false,
        min_darwin: Some((18, 0, 0)),
        max_darwin: None,
        requires: &["VirtualSMC"],
        conflict_group: None,
    },
    KextSpec {
        name: "SMCSuperIO",
        description: "Monitoring hardware sensors and controlling fan speeds",
        category: "VirtualSMC Plugins",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VirtualSMC"],
        conflict_group: None,
    },
    KextSpec {
        name: "NootRX",
        description: "The rDNA 2 dGPU support patch kext",
        category: "Graphics",
        required: false,
        min_darwin: Some((20, 5, 0)),
        max_darwin: None,
        requires: &[],
        conflict_group: Some("GPU"),
    },
    KextSpec {
        name: "NootedRed",
        description: "The AMD Vega iGPU support kext",
        category: "Graphics",
        required: false,
        min_darwin: Some((19, 0, 0)),
        max_darwin: None,
        requires: &[],
        conflict_group: Some("GPU"),
    },
    KextSpec {
        name: "WhateverGreen",
        description: "Various patches necessary for GPUs are pre-supported",
        category: "Graphics",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: Some("GPU"),
    },
    KextSpec {
        name: "AppleALC",
        description: "Native macOS HD audio for not officially supported codecs",
        category: "Audio",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "AirportBrcmFixup",
        description: "Patches required for non-native Broadcom Wi-Fi cards",
        category: "Wi-Fi",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "AirportItlwm",
        description: "Intel Wi-Fi drivers support the native macOS Wi-Fi interface",
        category: "Wi-Fi",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: Some("IntelWiFi"),
    },
    KextSpec {
        name: "IO80211FamilyLegacy",
        description: "Enable legacy native Apple Wireless adapters",
        category: "Wi-Fi",
        required: false,
        min_darwin: Some((23, 0, 0)),
        max_darwin: None,
        requires: &["IOSkywalkFamily"],
        conflict_group: None,
    },
    KextSpec {
        name: "IOSkywalkFamily",
        description: "Enable legacy native Apple Wireless adapters",
        category: "Wi-Fi",
        required: false,
        min_darwin: Some((23, 0, 0)),
        max_darwin: None,
        requires: &["IO80211FamilyLegacy"],
        conflict_group: None,
    },
    KextSpec {
        name: "itlwm",
        description: "Intel Wi-Fi drivers. Spoofs as Ethernet and connects to Wi-Fi via Heliport",
        category: "Wi-Fi",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: Some("IntelWiFi"),
    },
    KextSpec {
        name: "BlueToolFixup",
        description: "Patches Bluetooth stack to support third-party cards",
        category: "Bluetooth",
        required: false,
        min_darwin: Some((21, 0, 0)),
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "BrcmBluetoothInjector",
        description: "Enables the Broadcom Bluetooth on/off switch on older versions",
        category: "Bluetooth",
        required: false,
        min_darwin: None,
        max_darwin: Some((20, 99, 99)),
        requires: &["BrcmBluetoothInjector", "BrcmFirmwareData", "BrcmPatchRAM2", "BrcmPatchRAM3"],
        conflict_group: None,
    },
    KextSpec {
        name: "BrcmFirmwareData",
        description: "Applies PatchRAM updates for Broadcom RAMUSB based devices",
        category: "Bluetooth",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["BlueToolFixup", "BrcmBluetoothInjector", "BrcmPatchRAM2", "BrcmPatchRAM3"],
        conflict_group: None,
    },
    KextSpec {
        name: "BrcmPatchRAM2",
        description: "Applies PatchRAM updates for Broadcom RAMUSB based devices",
        category: "Bluetooth",
        required: false,
        min_darwin: None,
        max_darwin: Some((18, 99, 99)),
        requires: &["BlueToolFixup", "BrcmBluetoothInjector", "BrcmFirmwareData", "BrcmPatchRAM3"],
        conflict_group: None,
    },
    KextSpec {
        name: "BrcmPatchRAM3",
        description: "Applies PatchRAM updates for Broadcom RAMUSB based devices",
        category: "Bluetooth",
        required: false,
        min_darwin: Some((19, 0, 0)),
        max_darwin: None,
        requires: &["BlueToolFixup", "BrcmBluetoothInjector", "BrcmFirmwareData", "BrcmPatchRAM2"],
        conflict_group: None,
    },
    KextSpec {
        name: "IntelBluetoothFirmware",
        description: "Uploads firmware to enable Intel Bluetooth support",
        category: "Bluetooth",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["BlueToolFixup", "IntelBTPatcher", "IntelBluetoothInjector"],
        conflict_group: None,
    },
    KextSpec {
        name: "IntelBTPatcher",
        description: "Fixes Intel Bluetooth bugs for better connectivity",
        category: "Bluetooth",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["BlueToolFixup", "IntelBluetoothFirmware", "IntelBluetoothInjector"],
        conflict_group: None,
    },
    KextSpec {
        name: "IntelBluetoothInjector",
        description: "Enables the Intel Bluetooth on/off switch on older versions",
        category: "Bluetooth",
        required: false,
        min_darwin: None,
        max_darwin: Some((20, 99, 99)),
        requires: &["BlueToolFixup", "IntelBluetoothFirmware", "IntelBTPatcher"],
        conflict_group: None,
    },
    KextSpec {
        name: "AppleIGB",
        description: "Provides support for Intel's IGB Ethernet controllers",
        category: "Ethernet",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "AppleIGC",
        description: "Provides support for Intel 2.5G Ethernet(i225/i226)",
        category: "Ethernet",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "AtherosE2200Ethernet",
        description: "Provides support for Atheros E2200 family",
        category: "Ethernet",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "IntelMausi",
        description: "Intel Ethernet LAN driver for macOS",
        category: "Ethernet",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "LucyRTL8125Ethernet",
        description: "Provides support for Realtek RTL8125 family",
        category: "Ethernet",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "NullEthernet",
        description: "Creates a Null Ethernet when no supported network hardware is present",
        category: "Ethernet",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "RealtekRTL8100",
        description: "Provides support for Realtek RTL8100 family",
        category: "Ethernet",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "RealtekRTL8111",
        description: "Provides support for Realtek RTL8111/8168 family",
        category: "Ethernet",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "GenericUSBXHCI",
        description: "Fixes USB 3.0 issues found on some Ryzen APU-based",
        category: "USB",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "XHCI-unsupported",
        description: "Enables USB 3.0 support for unsupported xHCI controllers",
        category: "USB",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "AlpsHID",
        description: "Brings native multitouch support to the Alps I2C touchpad",
        category: "Input",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VoodooI2C"],
        conflict_group: None,
    },
    KextSpec {
        name: "VoodooPS2",
        description: "Provides support for PS/2 keyboards, trackpads, and mouse",
        category: "Input",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "VoodooRMI",
        description: "Synaptic Trackpad kext over SMBus/I2C",
        category: "Input",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "VoodooSMBus",
        description: "i2c-i801 + ELAN SMBus Touchpad kext",
        category: "Input",
        required: false,
        min_darwin: Some((18, 0, 0)),
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "VoodooI2C",
        description: "Intel I2C controller and slave device drivers",
        category: "Input",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "VoodooI2CAtmelMXT",
        description: "A satellite kext for Atmel MXT I2C touchscreen",
        category: "Input",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VoodooI2C"],
        conflict_group: None,
    },
    KextSpec {
        name: "VoodooI2CELAN",
        description: "A satellite kext for ELAN I2C touchpads",
        category: "Input",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VoodooI2C"],
        conflict_group: None,
    },
    KextSpec {
        name: "VoodooI2CFTE",
        description: "A satellite kext for FTE based touchpads",
        category: "Input",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VoodooI2C"],
        conflict_group: None,
    },
    KextSpec {
        name: "VoodooI2CHID",
        description: "A satellite kext for HID I2C or ELAN1200+ input devices",
        category: "Input",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VoodooI2C"],
        conflict_group: None,
    },
    KextSpec {
        name: "VoodooI2CSynaptics",
        description: "A satellite kext for Synaptics I2C touchpads",
        category: "Input",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &["VoodooI2C"],
        conflict_group: None,
    },
    KextSpec {
        name: "AsusSMC",
        description: "Supports ALS, keyboard backlight, and Fn keys on ASUS laptops",
        category: "Brand Specific",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "BigSurface",
        description: "A fully intergrated kext for all Surface related hardwares",
        category: "Brand Specific",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "CtlnaAHCIPort",
        description: "Improves support for certain SATA controllers",
        category: "Storage",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "NVMeFix",
        description: "Addresses compatibility and performance issues with NVMe SSDs",
        category: "Storage",
        required: false,
        min_darwin: Some((18, 0, 0)),
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "RealtekCardReader",
        description: "Realtek PCIe/USB-based SD card reader driver",
        category: "SD Controller",
        required: false,
        min_darwin: Some((18, 0, 0)),
        max_darwin: None,
        requires: &["RealtekCardReaderFriend"],
        conflict_group: None,
    },
    KextSpec {
        name: "RealtekCardReaderFriend",
        description: "Makes System Information recognize your Realtek card reader",
        category: "SD Controller",
        required: false,
        min_darwin: Some((18, 0, 0)),
        max_darwin: Some((22, 99, 99)),
        requires: &["RealtekCardReader"],
        conflict_group: None,
    },
    KextSpec {
        name: "AMFIPass",
        description: "A replacement for amfi=0x80 boot argument",
        category: "Extras",
        required: false,
        min_darwin: Some((20, 0, 0)),
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "AppleMCEReporterDisabler",
        description: "Disables AppleMCEReporter.kext to prevent kernel panics",
        category: "Extras",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "BrightnessKeys",
        description: "Handler for brightness keys without DSDT patches",
        category: "Extras",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "CpuTopologyRebuild",
        description: "Optimizes the core configuration of Intel Alder Lake CPUs+",
        category: "Extras",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "CryptexFixup",
        description: "Various patches to install Rosetta cryptex",
        category: "Extras",
        required: false,
        min_darwin: Some((22, 0, 0)),
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "ECEnabler",
        description: "Allows reading Embedded Controller fields over 1 byte long",
        category: "Extras",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "ForgedInvariant",
        description: "The plug & play kext for syncing the TSC on AMD & Intel",
        category: "Extras",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "HibernationFixup",
        description: "Fixes hibernation compatibility issues",
        category: "Extras",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "RestrictEvents",
        description: "Blocking unwanted processes and unlocking features",
        category: "Extras",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
    KextSpec {
        name: "RTCMemoryFixup",
        description: "Emulate some offsets in your CMOS (RTC) memory",
        category: "Extras",
        required: false,
        min_darwin: None,
        max_darwin: None,
        requires: &[],
        conflict_group: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn names(kexts: &[&KextInfo]) -> Vec<String> {
        kexts.iter().map(|k| k.name.clone()).collect()
    }

    #[test]
    fn test_builtin_defaults_fill_darwin_bounds() {
        let catalog = KextCatalog::builtin();
        let lilu = catalog.get("Lilu").unwrap();
        assert!(lilu.required);
        assert_eq!(lilu.min_darwin, (17, 0, 0));
        assert_eq!(lilu.max_darwin, (24, 99, 99));

        let friend = catalog.get("RealtekCardReaderFriend").unwrap();
        assert_eq!(friend.min_darwin, (18, 0, 0));
        assert_eq!(friend.max_darwin, (22, 99, 99));
    }

    #[test]
    fn test_every_dependency_is_in_catalog() {
        let catalog = KextCatalog::builtin();
        for kext in catalog.iter() {
            for dep in &kext.requires {
                assert!(catalog.get(dep).is_some(), "{} -> {}", kext.name, dep);
            }
        }
    }

    #[test]
    fn test_available_for_filters_by_overlap() {
        let catalog = KextCatalog::builtin();
        let old = names(&catalog.available_for(17, 18));
        assert!(old.contains(&"BrcmPatchRAM2".to_string()));
        assert!(!old.contains(&"CryptexFixup".to_string()));

        let new = names(&catalog.available_for(23, 24));
        assert!(new.contains(&"IOSkywalkFamily".to_string()));
        assert!(!new.contains(&"BrcmPatchRAM2".to_string()));

        assert!(catalog.available_for(-1, -1).is_empty());
    }

    #[test]
    fn test_resolve_pulls_required_and_dependencies() {
        let catalog = KextCatalog::builtin();
        let install = catalog.resolve(&["VoodooI2CHID"], 17, 24).unwrap();
        assert_eq!(
            names(&install),
            vec!["Lilu", "VirtualSMC", "VoodooI2C", "VoodooI2CHID"]
        );
    }

    #[test]
    fn test_resolve_skips_dependencies_outside_range() {
        let catalog = KextCatalog::builtin();
        let install = names(&catalog.resolve(&["BrcmPatchRAM3"], 21, 24).unwrap());
        assert!(install.contains(&"BlueToolFixup".to_string()));
        assert!(install.contains(&"BrcmFirmwareData".to_string()));
        assert!(!install.contains(&"BrcmPatchRAM2".to_string()));
        assert!(!install.contains(&"BrcmBluetoothInjector".to_string()));
    }

    #[test]
    fn test_resolve_detects_conflict_group() {
        let catalog = KextCatalog::builtin();
        let err = catalog
            .resolve(&["AirportItlwm", "itlwm"], 17, 24)
            .unwrap_err();
        match err {
            ReferenceError::KextConflict { group, .. } => assert_eq!(group, "IntelWiFi"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_unknown_kext() {
        let catalog = KextCatalog::builtin();
        let err = catalog.resolve(&["FakeSMC"], 17, 24).unwrap_err();
        assert!(matches!(err, ReferenceError::UnknownKext(name) if name == "FakeSMC"));
    }
}
