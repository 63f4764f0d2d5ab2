//! CPU evaluator.

use tracing::debug;

use super::Flow;
use crate::profile::CpuInfo;
use crate::rules::{MOJAVE, MONTEREY};
use crate::state::CompatState;

/// Gate on x86-64 and SSE4.
///
/// Without both, nothing is supported and the remaining categories are
/// skipped. A CPU without SSE4.2 needs Mojave or newer; one that also
/// reports SSE4.1 tops out at Monterey.
pub fn evaluate(mut state: CompatState, cpu: &CpuInfo<'_>) -> (CompatState, Flow) {
    let flags = &cpu.instruction_set;

    if !flags.has("x86-64") || !flags.has_sse4() {
        debug!(category = "CPU", device = cpu.processor_name, "missing x86-64 or SSE4");
        state.close();
        state.mark_unsupported(format!("CPU: {}", cpu.processor_name));
        return (state, Flow::Halt);
    }

    if !flags.has("SSE4.2") {
        state.set_min(MOJAVE);
        if flags.has("SSE4.1") {
            state.set_max(MONTEREY);
        }
        debug!(
            category = "CPU",
            device = cpu.processor_name,
            min = state.min_version(),
            max = state.max_version(),
            "no SSE4.2"
        );
    }

    (state, Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::profile::InstructionSet;

    fn run(flags: &str) -> (CompatState, Flow) {
        let cpu = CpuInfo {
            processor_name: "Test CPU",
            instruction_set: InstructionSet::new(flags.split(',')),
        };
        evaluate(CompatState::new(&EngineConfig::default()), &cpu)
    }

    #[test]
    fn test_missing_x86_64_halts() {
        let (state, flow) = run("SSE4.1, SSE4.2");
        assert_eq!(flow, Flow::Halt);
        assert!(state.is_closed());
        assert_eq!(state.unsupported_devices(), ["CPU: Test CPU"]);
    }

    #[test]
    fn test_missing_sse4_halts() {
        let (state, flow) = run("x86-64, SSE3, SSSE3");
        assert_eq!(flow, Flow::Halt);
        assert!(state.is_closed());
    }

    #[test]
    fn test_sse41_without_sse42() {
        let (state, flow) = run("x86-64, SSE4, SSE4.1");
        assert_eq!(flow, Flow::Continue);
        assert_eq!((state.min_version(), state.max_version()), (18, 21));
    }

    #[test]
    fn test_sse4a_only_raises_min() {
        let (state, _) = run("x86-64, SSE4a");
        assert_eq!((state.min_version(), state.max_version()), (18, 24));
    }

    #[test]
    fn test_full_sse4_leaves_bounds() {
        let (state, _) = run("x86-64, SSE4.1, SSE4.2, AVX2");
        assert_eq!((state.min_version(), state.max_version()), (17, 24));
        assert!(state.unsupported_devices().is_empty());
    }
}
