//! Structured tracing emitted during an evaluation.

use hwcompat_core::obs::{emit_categories_skipped, EvaluationSpan};
use hwcompat_core::{check_compatibility, EngineConfig, HardwareProfile};
use hwcompat_data::ReferenceTables;
use serde_json::json;
use tracing_test::traced_test;

fn evaluate(profile: serde_json::Value) {
    let profile = HardwareProfile::from_value(profile).unwrap();
    check_compatibility(
        &profile,
        &ReferenceTables::builtin(),
        &EngineConfig::default(),
    )
    .unwrap();
}

#[traced_test]
#[test]
fn test_evaluation_emits_started_and_finished() {
    evaluate(json!({
        "CPU": {"Processor Name": "Intel Core i5-8400", "Instruction Set": "x86-64, SSE4.1, SSE4.2, AVX2"},
        "Motherboard": {"Motherboard Chipset": "B360"},
        "GPU": {"Intel UHD Graphics 630": {
            "Manufacturer": "Intel", "Device Type": "Integrated GPU", "GPU Codename": "Coffee Lake"
        }},
        "Audio": {},
        "Network": {},
        "Storage": {"Storage Controllers": {}}
    }));

    assert!(logs_contain("compat.started"));
    assert!(logs_contain("Intel Core i5-8400"));
    assert!(logs_contain("compat.finished"));
    assert!(logs_contain("hwcompat.evaluation"));
    assert!(!logs_contain("compat.category_skipped"));
}

#[traced_test]
#[test]
fn test_unsupported_cpu_logs_skip() {
    evaluate(json!({
        "CPU": {"Processor Name": "Intel Pentium 4", "Instruction Set": "SSE2, SSE3"}
    }));

    assert!(logs_contain("compat.category_skipped"));
    assert!(logs_contain("unsupported CPU"));
}

#[traced_test]
#[test]
fn test_gpu_rule_is_logged_at_debug() {
    evaluate(json!({
        "CPU": {"Processor Name": "Intel Core i7-4770", "Instruction Set": "x86-64, SSE4.1, SSE4.2, AVX2"},
        "Motherboard": {"Motherboard Chipset": "Z87"},
        "GPU": {"GeForce GTX 780": {
            "Manufacturer": "NVIDIA", "Device Type": "Discrete GPU", "GPU Codename": "GK110"
        }},
        "Audio": {},
        "Network": {},
        "Storage": {"Storage Controllers": {}}
    }));

    assert!(logs_contain("Kepler"));
    assert!(logs_contain("NVIDIA discrete"));
}

#[traced_test]
#[test]
fn test_evaluation_span_enter() {
    let span = EvaluationSpan::enter("deadbeef");
    emit_categories_skipped("GPU", "no supported GPU");
    drop(span);

    assert!(logs_contain("no supported GPU"));
}
