//! Storage controller evaluator.

use hwcompat_data::{PciIdList, ReferenceData};
use tracing::debug;

use crate::error::Result;
use crate::profile::{category, device_props, DeviceMap, StorageController};
use crate::state::CompatState;

/// Drop Intel VMD controllers and NVMe drives known to misbehave.
///
/// Only PCI controllers are inspected; SATA, USB and the like pass
/// through unchanged.
pub fn evaluate(
    mut state: CompatState,
    controllers: &DeviceMap,
    reference: &dyn ReferenceData,
) -> Result<(CompatState, DeviceMap)> {
    let mut supported = DeviceMap::new();

    for (name, value) in controllers {
        let props = device_props(category::STORAGE_CONTROLLERS, name, value)?;
        let controller = StorageController::from_props(name, props)?;

        if controller.is_pci() {
            let id = controller.device_id()?;
            let nvme = reference.unsupported_nvme_description(id);
            if nvme.is_some() || reference.contains_pci_id(PciIdList::IntelVmd, id) {
                debug!(category = "Storage", device = %name, id, "unsupported controller");
                state.mark_unsupported(format!("Storage: {}", nvme.unwrap_or(name)));
                continue;
            }
        }
        supported.insert(name.clone(), value.clone());
    }

    Ok((state, supported))
}
