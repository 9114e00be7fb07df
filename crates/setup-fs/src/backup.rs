//! Sibling backups for config files
//!
//! A backup is a byte-for-byte copy placed next to the original as
//! `<file name>.<UTC timestamp>.bak`. Keeping it in the same directory means
//! restoring is a plain copy on the same filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{Error, Result};

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Build the backup file name for `original` taken at `at`.
///
/// `attempt` disambiguates backups taken within the same second; the first
/// attempt carries no counter.
pub fn backup_file_name(original: &str, at: DateTime<Utc>, attempt: u32) -> String {
    let stamp = at.format(TIMESTAMP_FORMAT);
    if attempt == 0 {
        format!("{original}.{stamp}.bak")
    } else {
        format!("{original}.{stamp}.{attempt}.bak")
    }
}

/// Copy `path` to a fresh sibling backup and return the backup's path.
///
/// Never overwrites an earlier backup.
pub fn create_backup(path: &Path, at: DateTime<Utc>) -> Result<PathBuf> {
    let original = path
        .file_name()
        .ok_or_else(|| Error::NoFileName {
            path: path.to_path_buf(),
        })?
        .to_string_lossy()
        .into_owned();

    let mut attempt = 0;
    let backup_path = loop {
        let candidate = path.with_file_name(backup_file_name(&original, at, attempt));
        if !candidate.exists() {
            break candidate;
        }
        attempt += 1;
    };

    fs::copy(path, &backup_path).map_err(|e| Error::io(&backup_path, e))?;
    tracing::debug!(
        original = %path.display(),
        backup = %backup_path.display(),
        "Created backup"
    );
    Ok(backup_path)
}

/// Copy a backup over the file it was taken from.
pub fn restore_backup(backup: &Path, target: &Path) -> Result<()> {
    fs::copy(backup, target).map_err(|e| Error::io(target, e))?;
    tracing::info!(
        target = %target.display(),
        backup = %backup.display(),
        "Restored config from backup"
    );
    Ok(())
}
