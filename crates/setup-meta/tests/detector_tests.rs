//! Tests for tool detection against fake home directories and search paths.

use pretty_assertions::assert_eq;
use setup_meta::{Environment, TargetRegistry, detect_installed_targets};
use setup_test_utils::{FakeMachine, fake_binary};

fn environment(machine: &FakeMachine) -> Environment {
    Environment::new(Some(machine.home().to_path_buf()), machine.project())
        .with_search_path(vec![machine.bin().to_path_buf()])
}

fn installed_ids(env: &Environment) -> Vec<&'static str> {
    detect_installed_targets(&TargetRegistry::builtin(), env)
        .into_iter()
        .filter(|d| d.installed)
        .map(|d| d.id())
        .collect()
}

#[test]
fn empty_machine_detects_nothing() {
    let machine = FakeMachine::new();
    assert!(installed_ids(&environment(&machine)).is_empty());
}

#[test]
fn home_directory_evidence_detects_target() {
    let machine = FakeMachine::new();
    machine.home_dir(".codex");
    machine.home_dir(".cursor");

    assert_eq!(installed_ids(&environment(&machine)), vec!["cursor", "codex"]);
}

#[test]
fn binary_on_search_path_detects_target() {
    let machine = FakeMachine::new();
    fake_binary(machine.bin(), "claude");

    let detected = detect_installed_targets(&TargetRegistry::builtin(), &environment(&machine));
    let claude = detected.iter().find(|d| d.id() == "claude-code").unwrap();

    assert!(claude.installed);
    assert_eq!(
        claude.evidence_path.as_deref(),
        Some(machine.bin().join(if cfg!(windows) { "claude.exe" } else { "claude" }).as_path())
    );
}

#[test]
fn detection_reports_every_target_in_registry_order() {
    let machine = FakeMachine::new();
    let registry = TargetRegistry::builtin();
    let detected = detect_installed_targets(&registry, &environment(&machine));

    let detected_ids: Vec<_> = detected.iter().map(|d| d.id()).collect();
    let registry_ids: Vec<_> = registry.list_targets().iter().map(|t| t.id).collect();
    assert_eq!(detected_ids, registry_ids);
}

#[test]
fn detection_without_home_still_checks_binaries() {
    let machine = FakeMachine::new();
    fake_binary(machine.bin(), "gemini");

    let env = Environment::new(None, machine.project())
        .with_search_path(vec![machine.bin().to_path_buf()]);
    assert_eq!(installed_ids(&env), vec!["gemini-cli"]);
}

#[test]
fn detected_target_serializes_summary() {
    let machine = FakeMachine::new();
    machine.home_dir(".codex");

    let detected = detect_installed_targets(&TargetRegistry::builtin(), &environment(&machine));
    let codex = detected.iter().find(|d| d.id() == "codex").unwrap();
    let json = serde_json::to_value(codex).unwrap();

    assert_eq!(json["id"], "codex");
    assert_eq!(json["display_name"], "Codex CLI");
    assert_eq!(json["installed"], true);
    assert_eq!(json["scopes"], serde_json::json!(["user"]));
}
