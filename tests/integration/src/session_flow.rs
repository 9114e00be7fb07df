//! End-to-end tests driving the installer session the way the terminal loop
//! does: detect, feed key events, run the requested batch, report back.

use std::fs;

use pretty_assertions::assert_eq;
use serde_json::Value;
use setup_cli::app::{Command, Input, Key, Session, View};
use setup_meta::{Environment, TargetRegistry, detect_installed_targets};
use setup_test_utils::{FakeMachine, block_directory, fake_binary};
use setup_tools::{EntryAction, Installer, run_batch};

fn environment(machine: &FakeMachine) -> Environment {
    Environment::new(Some(machine.home().to_path_buf()), machine.project())
        .with_search_path(vec![machine.bin().to_path_buf()])
}

/// Start a session over the installed targets, as the binary does without
/// `--all`.
fn start_session(machine: &FakeMachine) -> Session {
    let env = environment(machine);
    let detected = detect_installed_targets(&TargetRegistry::builtin(), &env);
    let installed = detected.into_iter().filter(|d| d.installed).collect();
    Session::new(installed, env, None)
}

fn keys(session: &mut Session, keys: &[Key]) -> Command {
    let mut last = Command::None;
    for &key in keys {
        last = session.handle(Input::Key(key));
    }
    last
}

fn fill_credentials(session: &mut Session) {
    session.handle(Input::Paste("https://jira.example.com\n".to_string()));
    session.handle(Input::Key(Key::Tab));
    session.handle(Input::Paste("bob".to_string()));
    session.handle(Input::Key(Key::Tab));
    session.handle(Input::Paste("x".to_string()));
}

/// Confirm and execute the batch the session requests.
fn install(session: &mut Session, machine: &FakeMachine) {
    let Command::RunBatch(request) = session.handle(Input::Key(Key::Char('y'))) else {
        panic!("confirm did not request a batch");
    };
    assert_eq!(session.view(), View::Installing);
    let installer = Installer::new(environment(machine));
    let results = run_batch(&installer, &request.targets, request.scope, &request.credentials);
    session.finish_batch(results);
}

fn read_json(path: &std::path::Path) -> Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Invalid JSON in {}: {}", path.display(), e))
}

#[test]
fn test_single_target_project_install() {
    let machine = FakeMachine::new();
    fake_binary(machine.bin(), "claude");

    let mut session = start_session(&machine);
    assert_eq!(session.targets().len(), 1);

    // Menu row 1 is the first target
    keys(&mut session, &[Key::Down, Key::Enter]);
    assert_eq!(session.view(), View::Credentials);
    fill_credentials(&mut session);
    keys(&mut session, &[Key::Enter]);
    assert_eq!(session.view(), View::Confirm);

    install(&mut session, &machine);
    assert_eq!(session.view(), View::Success);

    let config = read_json(&machine.project().join(".mcp.json"));
    let servers = config["mcpServers"].as_object().unwrap();
    assert_eq!(servers.len(), 1);
    let jira = &servers["jira"];
    assert_eq!(jira["type"], "stdio");
    assert_eq!(jira["command"], "npx");
    assert_eq!(
        jira["env"],
        serde_json::json!({
            "JIRA_BASE_URL": "https://jira.example.com",
            "JIRA_USERNAME": "bob",
            "JIRA_PASSWORD": "x",
        })
    );

    assert_eq!(keys(&mut session, &[Key::Enter]), Command::Quit);
}

#[test]
fn test_multi_target_install_with_partial_failure() {
    let machine = FakeMachine::new();
    fake_binary(machine.bin(), "cursor");
    fake_binary(machine.bin(), "gemini");
    machine.home_dir(".codex");
    machine.project_file(".cursor/mcp.json", r#"{"mcpServers":{"github":{"command":"gh"}}}"#);
    block_directory(&machine.project().join(".gemini"));

    let mut session = start_session(&machine);
    let ids: Vec<&str> = session.targets().iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec!["cursor", "gemini-cli", "codex"]);

    // Multi-select starts with every detected target; keep project scope
    keys(&mut session, &[Key::Enter, Key::Enter, Key::Enter]);
    assert_eq!(session.view(), View::Credentials);
    let flagged: Vec<&str> = session
        .validation()
        .unwrap()
        .iter()
        .filter(|v| !v.is_eligible())
        .map(|v| v.target_id.as_str())
        .collect();
    assert_eq!(flagged, vec!["codex"]);

    fill_credentials(&mut session);
    keys(&mut session, &[Key::Enter]);
    install(&mut session, &machine);
    assert_eq!(session.view(), View::Results);

    let outcomes: Vec<(&str, bool)> = session
        .results()
        .iter()
        .map(|r| (r.target_id.as_str(), r.success))
        .collect();
    assert_eq!(
        outcomes,
        vec![("cursor", true), ("gemini-cli", false), ("codex", false)]
    );

    let cursor = read_json(&machine.project().join(".cursor/mcp.json"));
    assert_eq!(cursor["mcpServers"]["github"]["command"], "gh");
    assert_eq!(cursor["mcpServers"]["jira"]["args"], serde_json::json!(["-y", "jira-mcp-server"]));
    assert!(session.results()[0].backup_name.is_some());
}

#[test]
fn test_user_scope_batch_is_idempotent() {
    let machine = FakeMachine::new();
    machine.home_dir(".codex");
    machine.home_file(".codex/config.toml", "# my settings\nmodel = \"o3\"\n");
    machine.home_dir(".codeium/windsurf");

    for run in 0..2 {
        let mut session = start_session(&machine);
        keys(&mut session, &[Key::Enter, Key::Enter, Key::Down, Key::Enter]);
        assert_eq!(session.scope(), setup_meta::Scope::User);
        fill_credentials(&mut session);
        keys(&mut session, &[Key::Enter]);
        install(&mut session, &machine);

        assert!(session.results().iter().all(|r| r.success), "run {run}: {:?}", session.results());
        let expected = if run == 0 { EntryAction::Added } else { EntryAction::Unchanged };
        assert!(session.results().iter().all(|r| r.action == Some(expected)));
    }

    let codex = fs::read_to_string(machine.home().join(".codex/config.toml")).unwrap();
    assert!(codex.starts_with("# my settings\n"));
    let parsed: toml::Table = codex.parse().unwrap();
    assert_eq!(parsed["model"].as_str(), Some("o3"));
    assert_eq!(parsed["mcp_servers"]["jira"]["command"].as_str(), Some("npx"));

    let windsurf = read_json(&machine.home().join(".codeium/windsurf/mcp_config.json"));
    assert_eq!(windsurf["mcpServers"].as_object().unwrap().len(), 1);
}

#[test]
fn test_quitting_before_confirm_writes_nothing() {
    let machine = FakeMachine::new();
    fake_binary(machine.bin(), "claude");

    let mut session = start_session(&machine);
    keys(&mut session, &[Key::Down, Key::Enter]);
    fill_credentials(&mut session);
    keys(&mut session, &[Key::Enter]);
    keys(&mut session, &[Key::Char('n'), Key::Esc]);
    assert_eq!(session.view(), View::Menu);
    assert_eq!(keys(&mut session, &[Key::Char('q')]), Command::Quit);

    assert!(!machine.project().join(".mcp.json").exists());
    assert!(session.results().is_empty());
}
