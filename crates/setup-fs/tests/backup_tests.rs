//! Tests for backup creation and restore

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use setup_fs::{create_backup, restore_backup};
use std::fs;
use tempfile::TempDir;

#[test]
fn backup_is_byte_for_byte_copy() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    fs::write(&path, "{\n  \"keep\": true\n}\n").unwrap();

    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let backup = create_backup(&path, at).unwrap();

    assert_eq!(
        backup.file_name().unwrap().to_string_lossy(),
        "settings.json.20260102T030405Z.bak"
    );
    assert_eq!(fs::read(&backup).unwrap(), fs::read(&path).unwrap());
}

#[test]
fn same_second_backups_do_not_collide() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "a = 1\n").unwrap();

    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let first = create_backup(&path, at).unwrap();
    fs::write(&path, "a = 2\n").unwrap();
    let second = create_backup(&path, at).unwrap();

    assert_ne!(first, second);
    assert_eq!(fs::read_to_string(&first).unwrap(), "a = 1\n");
    assert_eq!(fs::read_to_string(&second).unwrap(), "a = 2\n");
}

#[test]
fn restore_overwrites_target() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mcp.json");
    fs::write(&path, "original").unwrap();

    let backup = create_backup(&path, Utc::now()).unwrap();
    fs::write(&path, "clobbered").unwrap();
    restore_backup(&backup, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
}

#[test]
fn backup_of_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let result = create_backup(&temp.path().join("missing.json"), Utc::now());
    assert!(result.is_err());
}
