//! GPU evaluator.
//!
//! Walks the GPUs in profile order, routes each one through its decision
//! table in [`rules`](crate::rules) and keeps the devices the table does not
//! drop. The "supported discrete GPU seen so far" flag carries across
//! devices, so an integrated GPU listed after a discrete one is judged
//! differently from one listed before it.

use std::ops::Range;

use hwcompat_data::{PciIdList, ReferenceData};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::profile::{category, device_props, CpuInfo, DeviceMap, GpuDevice};
use crate::rules::{apply_effects, table_for, Disposition, GpuCandidate};
use crate::state::CompatState;

/// CPU generation indices whose integrated graphics have a driver
/// (Sandy Bridge through Cannon Lake).
pub const SUPPORTED_IGPU_GENERATIONS: Range<usize> = 0..12;

/// Chipset indices Comet Lake graphics cannot drive (the 500-series).
pub const COMET_LAKE_EXCLUDED_CHIPSETS: Range<usize> = 110..122;

/// Host facts the GPU rules depend on.
#[derive(Debug, Clone, Copy)]
pub struct HostContext<'a> {
    pub cpu: &'a CpuInfo<'a>,
    pub chipset: &'a str,
}

pub fn evaluate(
    mut state: CompatState,
    host: HostContext<'_>,
    devices: &DeviceMap,
    reference: &dyn ReferenceData,
    config: &EngineConfig,
) -> Result<(CompatState, DeviceMap)> {
    let low_end_cpu = host.cpu.is_low_end();
    let cpu_has_avx2 = host.cpu.instruction_set.has("AVX2");
    let comet_lake_excluded_chipset =
        reference.chipset_in_range(host.chipset, COMET_LAKE_EXCLUDED_CHIPSETS);

    let mut supported = DeviceMap::new();
    let mut discrete_found = false;

    for (name, value) in devices {
        let props = device_props(category::GPU, name, value)?;
        let device = GpuDevice::from_props(name, props)?;
        let table = table_for(&device);

        let codename = if table.needs_codename {
            device.codename()?
        } else {
            ""
        };
        if table.marks_discrete {
            discrete_found = true;
        }

        let candidate = GpuCandidate {
            name,
            codename,
            discrete_found,
            low_end_cpu,
            cpu_has_avx2,
            known_intel_generation: reference
                .cpu_generation_in_range(codename, SUPPORTED_IGPU_GENERATIONS),
            comet_lake_excluded_chipset,
            amd_igpu_listed: device
                .device_id
                .is_some_and(|id| reference.contains_pci_id(PciIdList::AmdIntegratedGpu, id)),
        };

        let disposition = match table.first_match(&candidate) {
            Some(rule) => {
                let disposition = apply_effects(
                    rule.effects,
                    &mut state,
                    &mut discrete_found,
                    config.latest_version,
                );
                debug!(
                    category = "GPU",
                    device = %name,
                    table = table.name,
                    rule = rule.label,
                    min = state.min_version(),
                    max = state.max_version(),
                    "rule applied"
                );
                disposition
            }
            None => Disposition::Drop,
        };

        match disposition {
            Disposition::Keep => {
                supported.insert(name.clone(), value.clone());
            }
            Disposition::Drop => {
                state.mark_unsupported(format!("{}: {}", device.device_type, name));
            }
        }
    }

    Ok((state, supported))
}
