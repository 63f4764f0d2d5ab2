//! Network evaluator.

use hwcompat_data::{normalize_id, PciIdList, ReferenceData};
use tracing::debug;

use crate::error::Result;
use crate::profile::{category, device_props, DeviceMap, NetworkDevice};
use crate::rules::CATALINA;
use crate::state::CompatState;

/// PCI network controllers whose driver needs Catalina or newer
/// (Intel I225-V/I225-LM/I225-IT and Wi-Fi 6 AX201).
pub const CATALINA_ONLY_IDS: [&str; 4] = ["8086-125B", "8086-125C", "8086-125D", "8086-3102"];

/// Keep controllers with a driver.
///
/// A handful of PCI controllers force the minimum to Catalina, whether or
/// not they have a driver, unless no version is supported already.
pub fn evaluate(
    mut state: CompatState,
    devices: &DeviceMap,
    reference: &dyn ReferenceData,
) -> Result<(CompatState, DeviceMap)> {
    let mut supported = DeviceMap::new();

    for (name, value) in devices {
        let props = device_props(category::NETWORK, name, value)?;
        let device = NetworkDevice::from_props(name, props)?;

        let id = normalize_id(device.device_id);
        if device.bus_type.starts_with("PCI")
            && CATALINA_ONLY_IDS.contains(&id.as_str())
            && !state.is_closed()
        {
            state.set_min(CATALINA);
        }

        if reference.contains_pci_id(PciIdList::Network, device.device_id) {
            supported.insert(name.clone(), value.clone());
        } else {
            debug!(category = "Network", device = %name, id = device.device_id, "no driver");
            state.mark_unsupported(format!("{}: {}", device.connection_name, name));
        }
    }

    Ok((state, supported))
}
