//! Batch installer tests: ordering, isolation and validation gating.

use pretty_assertions::assert_eq;
use setup_meta::{Environment, Scope, TargetDescriptor, TargetRegistry};
use setup_test_utils::{FakeMachine, block_directory};
use setup_tools::{BatchSummary, Credentials, Installer, run_batch, validate};

fn environment(machine: &FakeMachine) -> Environment {
    Environment::new(Some(machine.home().to_path_buf()), machine.project())
}

fn targets(ids: &[&str]) -> Vec<TargetDescriptor> {
    let registry = TargetRegistry::builtin();
    ids.iter().map(|id| registry.get(id).unwrap().clone()).collect()
}

fn creds() -> Credentials {
    Credentials::new("https://jira.example.com", "bob", "x")
}

#[test]
fn failure_in_the_middle_does_not_stop_the_batch() {
    let machine = FakeMachine::new();
    block_directory(&machine.project().join(".gemini"));
    let installer = Installer::new(environment(&machine));

    let results = run_batch(
        &installer,
        &targets(&["cursor", "gemini-cli", "vscode"]),
        Scope::Project,
        &creds(),
    );

    let ids: Vec<&str> = results.iter().map(|r| r.target_id.as_str()).collect();
    assert_eq!(ids, vec!["cursor", "gemini-cli", "vscode"]);

    assert!(results[0].success, "{:?}", results[0]);
    assert!(!results[1].success);
    assert!(!results[1].message.as_deref().unwrap_or_default().is_empty());
    assert!(results[2].success, "{:?}", results[2]);

    assert!(machine.project().join(".cursor/mcp.json").exists());
    assert!(machine.project().join(".vscode/mcp.json").exists());
    assert_eq!(
        BatchSummary::from_results(&results),
        BatchSummary {
            succeeded: 2,
            failed: 1
        }
    );
}

#[test]
fn unsupported_targets_are_flagged_then_fail_fast() {
    let machine = FakeMachine::new();
    let env = environment(&machine);
    let selection = targets(&["claude-code", "codex"]);

    let validation = validate(&selection, Scope::Project, &env);
    assert!(validation[0].scope_supported);
    assert!(!validation[1].scope_supported);

    let results = run_batch(&Installer::new(env), &selection, Scope::Project, &creds());
    assert!(results[0].success);
    assert!(!results[1].success);
    assert!(results[1].message.as_deref().unwrap().contains("project"));
    assert!(!machine.home().join(".codex").exists());
}

#[test]
fn two_targets_sharing_a_file_both_land() {
    let machine = FakeMachine::new();
    let installer = Installer::new(environment(&machine));

    // Same target twice resolves to the same path; sequential processing
    // means the second run simply sees the first one's entry
    let results = run_batch(
        &installer,
        &targets(&["cursor", "cursor"]),
        Scope::User,
        &creds(),
    );

    assert!(results.iter().all(|r| r.success));
    let summary = BatchSummary::from_results(&results);
    assert!(summary.all_succeeded());
    assert_eq!(summary.total(), 2);
}

#[test]
fn empty_batch_yields_no_results() {
    let machine = FakeMachine::new();
    let installer = Installer::new(environment(&machine));
    assert!(run_batch(&installer, &[], Scope::User, &creds()).is_empty());
}
