//! The config injection engine.
//!
//! [`Installer::inject`] performs one read-merge-write cycle for one target:
//!
//! 1. Resolve the target's [`ConfigLocation`] for the scope.
//! 2. Read and parse the existing file, refusing to touch files that do not
//!    parse.
//! 3. Upsert the Jira entry under the wrapper map.
//! 4. Back up the previous file, write atomically, then re-read and verify.
//!    A failed verification restores the backup.
//!
//! Every failure is folded into the returned [`InjectionResult`]; nothing is
//! propagated to the caller, so one target can never abort a batch.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use setup_meta::{ConfigLocation, Environment, Scope, TargetDescriptor, resolve_for};

use crate::credentials::Credentials;
use crate::document::ConfigDocument;
use crate::entry::ServiceEntry;
use crate::error::{Error, Result};
use crate::family;

/// What happened to the entry in a successful injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryAction {
    /// No entry existed; one was added.
    Added,
    /// An existing entry was overwritten.
    Replaced,
    /// The existing entry already matched; nothing was written.
    Unchanged,
}

/// Outcome of injecting into one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectionResult {
    pub target_id: String,
    pub success: bool,
    /// Resolved config path, when the scope was supported.
    pub path: Option<PathBuf>,
    pub action: Option<EntryAction>,
    /// File name of the backup, present only when an existing file was
    /// preserved before modification.
    pub backup_name: Option<String>,
    /// Error detail on failure.
    pub message: Option<String>,
}

impl InjectionResult {
    fn succeeded(target_id: &str, path: PathBuf, outcome: Outcome) -> Self {
        Self {
            target_id: target_id.to_string(),
            success: true,
            path: Some(path),
            action: Some(outcome.action),
            backup_name: outcome.backup_name,
            message: None,
        }
    }

    fn failed(target_id: &str, path: Option<PathBuf>, message: String) -> Self {
        Self {
            target_id: target_id.to_string(),
            success: false,
            path,
            action: None,
            backup_name: None,
            message: Some(message),
        }
    }
}

struct Outcome {
    action: EntryAction,
    backup_name: Option<String>,
}

/// Injects the Jira entry into target config files.
///
/// Holds no state besides the environment used for path resolution; every
/// call re-reads the file system.
#[derive(Debug, Clone)]
pub struct Installer {
    env: Environment,
}

impl Installer {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Inject the entry for `credentials` into `target`'s config at `scope`.
    pub fn inject(
        &self,
        target: &TargetDescriptor,
        scope: Scope,
        credentials: &Credentials,
    ) -> InjectionResult {
        self.inject_with(target, scope, credentials, verify_written)
    }

    /// [`Installer::inject`] with the post-write check supplied by the caller.
    fn inject_with<V>(
        &self,
        target: &TargetDescriptor,
        scope: Scope,
        credentials: &Credentials,
        verify: V,
    ) -> InjectionResult
    where
        V: Fn(&ConfigLocation, &ServiceEntry) -> Result<()>,
    {
        let resolved = resolve_for(target, scope, &self.env)
            .map_err(Error::from)
            .and_then(follow_symlinks);
        let location = match resolved {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(
                    target_id = target.id,
                    %scope,
                    error = %e,
                    "Cannot resolve config location"
                );
                return InjectionResult::failed(target.id, None, e.to_string());
            }
        };

        let entry = ServiceEntry::for_credentials(credentials);
        match inject_at(&location, &entry, verify) {
            Ok(outcome) => {
                tracing::info!(
                    target_id = target.id,
                    path = %location.path.display(),
                    action = ?outcome.action,
                    backup = ?outcome.backup_name,
                    "Injected Jira entry"
                );
                InjectionResult::succeeded(target.id, location.path, outcome)
            }
            Err(e) => {
                tracing::warn!(
                    target_id = target.id,
                    path = %location.path.display(),
                    error = %e,
                    "Injection failed"
                );
                InjectionResult::failed(target.id, Some(location.path), e.to_string())
            }
        }
    }
}

/// Point `location` at the file behind any symlink, so the link survives the
/// write and the backup sits next to the real file.
fn follow_symlinks(location: ConfigLocation) -> Result<ConfigLocation> {
    let path = setup_fs::resolve_symlinks(&location.path)?;
    if path != location.path {
        tracing::debug!(
            link = %location.path.display(),
            target = %path.display(),
            "Config path is a symlink, writing its target"
        );
    }
    Ok(ConfigLocation { path, ..location })
}

fn inject_at<V>(location: &ConfigLocation, entry: &ServiceEntry, verify: V) -> Result<Outcome>
where
    V: Fn(&ConfigLocation, &ServiceEntry) -> Result<()>,
{
    let format = location.family.format();
    let original = setup_fs::read_optional(&location.path)?;
    let mut doc = match &original {
        Some(source) => ConfigDocument::parse(format, &location.path, source)?,
        None => ConfigDocument::empty(format, &location.path),
    };

    let native = family::to_native(entry, location.family);
    let action = match doc.entry(location.wrapper_key, location.entry_key)? {
        Some(existing) if existing == native => {
            return Ok(Outcome {
                action: EntryAction::Unchanged,
                backup_name: None,
            });
        }
        Some(_) => EntryAction::Replaced,
        None => EntryAction::Added,
    };

    doc.upsert(location.wrapper_key, location.entry_key, &native)?;
    let rendered = doc.render()?;

    let backup = match &original {
        Some(source) if !source.trim().is_empty() => {
            Some(setup_fs::create_backup(&location.path, Utc::now())?)
        }
        _ => None,
    };

    if let Err(e) = setup_fs::write_atomic(&location.path, rendered.as_bytes()) {
        // The rename never happened, so the original is intact
        if let Some(backup) = &backup {
            discard_backup(backup);
        }
        return Err(e.into());
    }

    if let Err(e) = verify(location, entry) {
        rollback(location, backup.as_deref(), original.as_deref());
        return Err(e);
    }

    Ok(Outcome {
        action,
        backup_name: backup
            .as_ref()
            .and_then(|b| b.file_name())
            .map(|n| n.to_string_lossy().into_owned()),
    })
}

/// Re-read the written file and check the entry reads back as `expected`.
fn verify_written(location: &ConfigLocation, expected: &ServiceEntry) -> Result<()> {
    let verification_error = |message: &str| Error::Verification {
        path: location.path.clone(),
        message: message.to_string(),
    };

    let source = setup_fs::read_optional(&location.path)?
        .ok_or_else(|| verification_error("file missing after write"))?;
    let doc = ConfigDocument::parse(location.family.format(), &location.path, &source)?;
    let written = doc
        .entry(location.wrapper_key, location.entry_key)?
        .ok_or_else(|| verification_error("entry missing after write"))?;

    match family::from_native(&written, location.family) {
        Some(ref actual) if actual == expected => Ok(()),
        _ => Err(verification_error("entry does not match what was written")),
    }
}

/// Put the file back the way it was before the write: from the backup, from
/// the blank original (which is never backed up), or by removing a file that
/// did not exist.
fn rollback(location: &ConfigLocation, backup: Option<&std::path::Path>, original: Option<&str>) {
    let restored = match (backup, original) {
        (Some(backup), _) => setup_fs::restore_backup(backup, &location.path).map_err(Error::from),
        (None, Some(blank)) => {
            setup_fs::write_atomic(&location.path, blank.as_bytes()).map_err(Error::from)
        }
        (None, None) => std::fs::remove_file(&location.path)
            .map_err(|e| setup_fs::Error::io(&location.path, e).into()),
    };
    if let Err(e) = restored {
        tracing::error!(path = %location.path.display(), error = %e, "Rollback failed");
    }
}

fn discard_backup(backup: &std::path::Path) {
    if let Err(e) = std::fs::remove_file(backup) {
        tracing::warn!(backup = %backup.display(), error = %e, "Failed to remove unused backup");
    }
}
