//! GPU decision tables.
//!
//! Each GPU is routed to one [`GpuRuleTable`] by device type and vendor. The
//! first [`GpuRule`] whose predicate holds decides the device: its effects
//! are applied to the state in order, and any dropping effect marks the
//! device unsupported. Every table ends with a catch-all row.

use crate::profile::GpuDevice;
use crate::state::{CompatState, CLOSED};

/// Darwin majors named in the rules.
pub const HIGH_SIERRA: i32 = 17;
pub const MOJAVE: i32 = 18;
pub const CATALINA: i32 = 19;
pub const BIG_SUR: i32 = 20;
pub const MONTEREY: i32 = 21;
pub const VENTURA: i32 = 22;

/// A single adjustment to the compatibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// `min = max(v, min)`
    RaiseMin(i32),
    /// `max = min(v, max)`
    LowerMax(i32),
    /// `max = v`
    SetMax(i32),
    /// `min = max = v`
    Pin(i32),
    /// `max = latest`
    ToLatest,
    /// `max = max(v, max if a discrete GPU is supported else -1)`
    CapUnlessDiscrete(i32),
    /// `min = max(v, min if a discrete GPU is supported else -1)`
    FloorUnlessDiscrete(i32),
    /// No version is supported; the device itself is kept.
    Close,
    /// No version is supported, the device is unsupported and no longer
    /// counts as a supported discrete GPU.
    Reject,
    /// The device is unsupported; bounds are untouched.
    Drop,
    /// The device is unsupported; without a supported discrete GPU to fall
    /// back on, no version is supported either.
    DropOrClose,
}

/// Whether a device stays in the filtered mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Keep,
    Drop,
}

impl Effect {
    pub fn apply(
        self,
        state: &mut CompatState,
        discrete_found: &mut bool,
        latest: i32,
    ) -> Disposition {
        match self {
            Effect::RaiseMin(v) => state.raise_min(v),
            Effect::LowerMax(v) => state.lower_max(v),
            Effect::SetMax(v) => state.set_max(v),
            Effect::Pin(v) => {
                state.set_min(v);
                state.set_max(v);
            }
            Effect::ToLatest => state.set_max(latest),
            Effect::CapUnlessDiscrete(v) => {
                let base = if *discrete_found {
                    state.max_version()
                } else {
                    CLOSED
                };
                state.set_max(v.max(base));
            }
            Effect::FloorUnlessDiscrete(v) => {
                let base = if *discrete_found {
                    state.min_version()
                } else {
                    CLOSED
                };
                state.set_min(v.max(base));
            }
            Effect::Close => state.close(),
            Effect::Reject => {
                state.close();
                *discrete_found = false;
                return Disposition::Drop;
            }
            Effect::Drop => return Disposition::Drop,
            Effect::DropOrClose => {
                if !*discrete_found {
                    state.close();
                }
                return Disposition::Drop;
            }
        }
        Disposition::Keep
    }
}

/// Apply a rule's effects in order. Any dropping effect drops the device.
pub fn apply_effects(
    effects: &[Effect],
    state: &mut CompatState,
    discrete_found: &mut bool,
    latest: i32,
) -> Disposition {
    effects
        .iter()
        .fold(Disposition::Keep, |disposition, effect| {
            match effect.apply(state, discrete_found, latest) {
                Disposition::Drop => Disposition::Drop,
                Disposition::Keep => disposition,
            }
        })
}

/// Everything a GPU predicate may look at.
///
/// Reference-table answers are resolved up front so predicates stay pure.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuCandidate<'a> {
    pub name: &'a str,
    /// Empty for tables that do not classify by codename.
    pub codename: &'a str,
    pub discrete_found: bool,
    pub low_end_cpu: bool,
    pub cpu_has_avx2: bool,
    /// Codename matches an Intel generation with a supported iGPU.
    pub known_intel_generation: bool,
    /// The board's chipset is one Comet Lake iGPUs cannot drive.
    pub comet_lake_excluded_chipset: bool,
    /// Device id is on the AMD APU allow-list.
    pub amd_igpu_listed: bool,
}

impl GpuCandidate<'_> {
    fn intel_igpu_eligible(&self) -> bool {
        self.known_intel_generation
            && !self.low_end_cpu
            && !self.name.contains("2000")
            && !self.name.contains("2500")
    }

    fn is_navi2(&self) -> bool {
        self.codename.contains("Navi 2")
    }

    fn codename_has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.codename.contains(n))
    }

    fn codename_starts_with_any(&self, prefixes: &[&str]) -> bool {
        prefixes.iter().any(|p| self.codename.starts_with(p))
    }
}

/// Predicate → effects.
pub struct GpuRule {
    pub label: &'static str,
    pub when: fn(&GpuCandidate<'_>) -> bool,
    pub effects: &'static [Effect],
}

/// Ordered rules for one device type / vendor combination.
pub struct GpuRuleTable {
    pub name: &'static str,
    /// Rules read `GPU Codename`, so the field is required.
    pub needs_codename: bool,
    /// Devices routed here count as a supported discrete GPU before their
    /// rules run.
    pub marks_discrete: bool,
    pub rules: &'static [GpuRule],
}

impl GpuRuleTable {
    /// First rule whose predicate holds.
    pub fn first_match(&self, candidate: &GpuCandidate<'_>) -> Option<&'static GpuRule> {
        self.rules.iter().find(|rule| (rule.when)(candidate))
    }
}

pub static INTEL_INTEGRATED: GpuRuleTable = GpuRuleTable {
    name: "Intel integrated",
    needs_codename: true,
    marks_discrete: false,
    rules: &[
        GpuRule {
            label: "unrecognized generation or low-end part",
            when: |c| !c.intel_igpu_eligible(),
            effects: &[Effect::DropOrClose],
        },
        GpuRule {
            label: "Sandy Bridge",
            when: |c| c.codename.contains("Sandy Bridge"),
            effects: &[
                Effect::RaiseMin(HIGH_SIERRA),
                Effect::CapUnlessDiscrete(HIGH_SIERRA),
            ],
        },
        GpuRule {
            label: "Ivy Bridge",
            when: |c| c.codename.contains("Ivy Bridge"),
            effects: &[
                Effect::RaiseMin(HIGH_SIERRA),
                Effect::CapUnlessDiscrete(BIG_SUR),
            ],
        },
        GpuRule {
            label: "Haswell / Broadwell",
            when: |c| c.codename_has_any(&["Haswell", "Broadwell"]),
            effects: &[
                Effect::RaiseMin(HIGH_SIERRA),
                Effect::CapUnlessDiscrete(MONTEREY),
            ],
        },
        GpuRule {
            label: "Skylake / Kaby Lake",
            when: |c| {
                c.codename.contains("Skylake")
                    || (c.codename.contains("Kaby Lake")
                        && !c.codename.to_lowercase().contains("-r"))
            },
            effects: &[
                Effect::RaiseMin(HIGH_SIERRA),
                Effect::CapUnlessDiscrete(VENTURA),
            ],
        },
        GpuRule {
            label: "Amber Lake / Whiskey Lake",
            when: |c| c.codename_has_any(&["Amber Lake", "Whiskey Lake"]),
            effects: &[
                Effect::RaiseMin(HIGH_SIERRA),
                Effect::FloorUnlessDiscrete(HIGH_SIERRA),
                Effect::ToLatest,
            ],
        },
        GpuRule {
            label: "Comet Lake on an excluded chipset",
            when: |c| {
                !c.discrete_found
                    && c.codename.contains("Comet Lake")
                    && c.comet_lake_excluded_chipset
            },
            effects: &[Effect::RaiseMin(HIGH_SIERRA), Effect::Close],
        },
        GpuRule {
            label: "Ice Lake",
            when: |c| c.codename.contains("Ice Lake"),
            effects: &[
                Effect::RaiseMin(HIGH_SIERRA),
                Effect::RaiseMin(CATALINA),
                Effect::ToLatest,
            ],
        },
        GpuRule {
            label: "other supported generation",
            when: |_| true,
            effects: &[Effect::RaiseMin(HIGH_SIERRA), Effect::ToLatest],
        },
    ],
};

pub static AMD_INTEGRATED: GpuRuleTable = GpuRuleTable {
    name: "AMD integrated",
    needs_codename: false,
    marks_discrete: false,
    rules: &[
        GpuRule {
            label: "listed APU",
            when: |c| c.amd_igpu_listed,
            effects: &[Effect::ToLatest, Effect::RaiseMin(CATALINA)],
        },
        GpuRule {
            label: "unlisted APU",
            when: |_| true,
            effects: &[Effect::Drop],
        },
    ],
};

pub static AMD_DISCRETE: GpuRuleTable = GpuRuleTable {
    name: "AMD discrete",
    needs_codename: true,
    marks_discrete: true,
    rules: &[
        GpuRule {
            label: "Navi 2x without AVX2",
            when: |c| c.is_navi2() && !c.cpu_has_avx2,
            effects: &[Effect::LowerMax(MONTEREY)],
        },
        GpuRule {
            label: "Navi 22 / Navi 23",
            when: |c| c.codename_has_any(&["Navi 23", "Navi 22"]),
            effects: &[Effect::RaiseMin(MONTEREY)],
        },
        GpuRule {
            label: "Navi 21",
            when: |c| c.codename.contains("Navi 21"),
            effects: &[Effect::RaiseMin(BIG_SUR)],
        },
        GpuRule {
            label: "other Navi 2x",
            when: |c| c.is_navi2(),
            effects: &[Effect::Reject],
        },
        GpuRule {
            label: "Navi 10",
            when: |c| c.codename.contains("Navi 10"),
            effects: &[Effect::RaiseMin(CATALINA)],
        },
        GpuRule {
            label: "Vega 20",
            when: |c| c.codename.contains("Vega 20"),
            effects: &[Effect::RaiseMin(HIGH_SIERRA)],
        },
        GpuRule {
            label: "Vega 10 / Polaris / RX 550",
            when: |c| c.codename_has_any(&["Vega 10", "Polaris"]) || c.name.contains("550"),
            effects: &[Effect::RaiseMin(HIGH_SIERRA)],
        },
        GpuRule {
            label: "unsupported architecture",
            when: |_| true,
            effects: &[Effect::Reject],
        },
    ],
};

pub static NVIDIA_DISCRETE: GpuRuleTable = GpuRuleTable {
    name: "NVIDIA discrete",
    needs_codename: true,
    marks_discrete: true,
    rules: &[
        GpuRule {
            label: "Kepler",
            when: |c| c.codename.starts_with("GK"),
            effects: &[Effect::SetMax(BIG_SUR)],
        },
        GpuRule {
            label: "Pascal / Maxwell / Fermi / Tesla",
            when: |c| c.codename_starts_with_any(&["GP", "GM", "GF", "GT", "C"]),
            effects: &[Effect::Pin(HIGH_SIERRA)],
        },
        GpuRule {
            label: "unsupported architecture",
            when: |_| true,
            effects: &[Effect::Reject],
        },
    ],
};

pub static UNCLASSIFIED: GpuRuleTable = GpuRuleTable {
    name: "unclassified",
    needs_codename: false,
    marks_discrete: false,
    rules: &[GpuRule {
        label: "unknown vendor or device type",
        when: |_| true,
        effects: &[Effect::Drop],
    }],
};

/// Route a GPU to its table by device type and manufacturer.
pub fn table_for(device: &GpuDevice<'_>) -> &'static GpuRuleTable {
    let vendor = device.manufacturer;
    if device.is_integrated() {
        if vendor.contains("Intel") {
            &INTEL_INTEGRATED
        } else if vendor.contains("AMD") {
            &AMD_INTEGRATED
        } else {
            &UNCLASSIFIED
        }
    } else if device.is_discrete() {
        if vendor.contains("AMD") {
            &AMD_DISCRETE
        } else if vendor.contains("NVIDIA") {
            &NVIDIA_DISCRETE
        } else {
            &UNCLASSIFIED
        }
    } else {
        &UNCLASSIFIED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn candidate(codename: &'static str) -> GpuCandidate<'static> {
        GpuCandidate {
            name: "GPU",
            codename,
            discrete_found: false,
            low_end_cpu: false,
            cpu_has_avx2: true,
            known_intel_generation: true,
            comet_lake_excluded_chipset: false,
            amd_igpu_listed: false,
        }
    }

    fn state() -> CompatState {
        CompatState::new(&EngineConfig::default())
    }

    #[test]
    fn test_every_table_ends_with_catch_all() {
        let odd = GpuCandidate {
            name: "",
            codename: "",
            discrete_found: true,
            low_end_cpu: false,
            cpu_has_avx2: false,
            known_intel_generation: true,
            comet_lake_excluded_chipset: false,
            amd_igpu_listed: false,
        };
        let tables: [&GpuRuleTable; 5] = [
            &INTEL_INTEGRATED,
            &AMD_INTEGRATED,
            &AMD_DISCRETE,
            &NVIDIA_DISCRETE,
            &UNCLASSIFIED,
        ];
        for table in tables {
            let last = table.rules.last().unwrap();
            assert!((last.when)(&odd), "{} has no catch-all", table.name);
        }
    }

    #[test]
    fn test_first_match_wins() {
        let rule = AMD_DISCRETE.first_match(&candidate("Navi 23")).unwrap();
        assert_eq!(rule.label, "Navi 22 / Navi 23");

        let mut no_avx2 = candidate("Navi 23");
        no_avx2.cpu_has_avx2 = false;
        let rule = AMD_DISCRETE.first_match(&no_avx2).unwrap();
        assert_eq!(rule.label, "Navi 2x without AVX2");
    }

    #[test]
    fn test_kaby_lake_r_is_not_capped() {
        let rule = INTEL_INTEGRATED
            .first_match(&candidate("Kaby Lake-R"))
            .unwrap();
        assert_eq!(rule.label, "other supported generation");
    }

    #[test]
    fn test_cap_unless_discrete_resets_without_discrete() {
        let mut s = state();
        let mut discrete = false;
        Effect::CapUnlessDiscrete(HIGH_SIERRA).apply(&mut s, &mut discrete, 24);
        assert_eq!(s.max_version(), 17);

        let mut s = state();
        let mut discrete = true;
        Effect::CapUnlessDiscrete(HIGH_SIERRA).apply(&mut s, &mut discrete, 24);
        assert_eq!(s.max_version(), 24);
    }

    #[test]
    fn test_floor_unless_discrete_can_lower_min() {
        let mut s = state();
        s.set_min(MOJAVE);
        let mut discrete = false;
        Effect::FloorUnlessDiscrete(HIGH_SIERRA).apply(&mut s, &mut discrete, 24);
        assert_eq!(s.min_version(), HIGH_SIERRA);
    }

    #[test]
    fn test_reject_clears_discrete_flag() {
        let mut s = state();
        let mut discrete = true;
        let disposition = apply_effects(&[Effect::Reject], &mut s, &mut discrete, 24);
        assert_eq!(disposition, Disposition::Drop);
        assert!(!discrete);
        assert!(s.is_closed());
    }

    #[test]
    fn test_drop_or_close_spares_bounds_with_discrete() {
        let mut s = state();
        let mut discrete = true;
        let disposition = apply_effects(&[Effect::DropOrClose], &mut s, &mut discrete, 24);
        assert_eq!(disposition, Disposition::Drop);
        assert!(!s.is_closed());
    }

    #[test]
    fn test_close_keeps_device() {
        let mut s = state();
        let mut discrete = false;
        let disposition = apply_effects(
            &[Effect::RaiseMin(HIGH_SIERRA), Effect::Close],
            &mut s,
            &mut discrete,
            24,
        );
        assert_eq!(disposition, Disposition::Keep);
        assert!(s.is_closed());
    }
}
