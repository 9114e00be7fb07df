//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions, Permissions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Read a file as UTF-8 text, returning `None` when it does not exist or a
/// parent component is not a directory.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if is_missing(&e) => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Not found, or a parent component is not a directory.
fn is_missing(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

/// Limit on symlink hops, matching the usual kernel limit.
const MAX_SYMLINK_HOPS: usize = 40;

/// Follow `path` through any symlinks to the file that actually holds the
/// content.
///
/// Unlike [`fs::canonicalize`], a dangling link resolves to its (missing)
/// target, so a write through it creates the target rather than replacing the
/// link. Paths that do not exist are returned unchanged.
pub fn resolve_symlinks(path: &Path) -> Result<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        let metadata = match fs::symlink_metadata(&current) {
            Ok(metadata) => metadata,
            Err(e) if is_missing(&e) => return Ok(current),
            Err(e) => return Err(Error::io(&current, e)),
        };
        if !metadata.file_type().is_symlink() {
            return Ok(current);
        }

        let link = fs::read_link(&current).map_err(|e| Error::io(&current, e))?;
        current = match current.parent() {
            Some(parent) if link.is_relative() => parent.join(link),
            _ => link,
        };
    }
    Err(Error::SymlinkLoop {
        path: path.to_path_buf(),
    })
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers only ever observe the old or the
/// new content. Parent directories are created first; a failure there is
/// reported as [`Error::CreateDir`] so callers can tell it apart from a write
/// failure.
///
/// A symlinked `path` is written through: the link target is replaced and the
/// link stays in place. The replacement keeps the permissions of the file it
/// replaces; a new file is created readable by the owner only (on unix).
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let resolved = resolve_symlinks(path)?;
    let path = resolved.as_path();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file_name = path.file_name().ok_or_else(|| Error::NoFileName {
        path: path.to_path_buf(),
    })?;

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if is_missing(&e) => None,
        Err(e) => return Err(Error::io(path, e)),
    };

    let result = write_temp(&temp_path, path, content, permissions)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            tracing::warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file");
        }
    }

    result
}

fn write_temp(
    temp_path: &Path,
    target: &Path,
    content: &[u8],
    permissions: Option<Permissions>,
) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut temp_file = options
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    // A stale temp file keeps its old mode, so set it explicitly
    if let Some(permissions) = permissions.or_else(owner_only) {
        temp_file
            .set_permissions(permissions)
            .map_err(|e| Error::io(temp_path, e))?;
    }

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: target.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    Ok(())
}

#[cfg(unix)]
fn owner_only() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn owner_only() -> Option<Permissions> {
    None
}
