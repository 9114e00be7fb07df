//! Fake machine fixtures.
//!
//! A [`FakeMachine`] owns a temporary directory laid out as:
//!
//! ```text
//! <tmp>/home      stands in for $HOME
//! <tmp>/project   stands in for the working directory
//! <tmp>/bin       the only directory on the search path
//! ```
//!
//! Everything is removed when the fixture is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct FakeMachine {
    _root: TempDir,
    home: PathBuf,
    project: PathBuf,
    bin: PathBuf,
}

impl FakeMachine {
    /// # Panics
    /// Panics if the temporary directories cannot be created.
    pub fn new() -> Self {
        let root = TempDir::new().unwrap_or_else(|e| panic!("FakeMachine: tempdir failed: {e}"));
        let home = root.path().join("home");
        let project = root.path().join("project");
        let bin = root.path().join("bin");
        for dir in [&home, &project, &bin] {
            fs::create_dir_all(dir)
                .unwrap_or_else(|e| panic!("FakeMachine: failed to create {}: {e}", dir.display()));
        }
        Self {
            _root: root,
            home,
            project,
            bin,
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// Create a directory under the fake home, returning its path.
    pub fn home_dir(&self, rel: &str) -> PathBuf {
        let path = self.home.join(rel);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("home_dir: failed to create {}: {e}", path.display()));
        path
    }

    /// Write a file under the fake home, creating parents, returning its path.
    pub fn home_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.home.join(rel), content)
    }

    /// Write a file under the fake project, creating parents, returning its path.
    pub fn project_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.project.join(rel), content)
    }
}

impl Default for FakeMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an empty executable named `name` in `dir`.
///
/// On Windows the file gets an `.exe` suffix so search-path probing finds it.
pub fn fake_binary(dir: &Path, name: &str) -> PathBuf {
    let file_name = if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    };
    let path = write_file(&dir.join(file_name), "");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .unwrap_or_else(|e| panic!("fake_binary: chmod failed: {e}"));
    }

    path
}

/// Occupy `dir` with a regular file so nothing can be created beneath it.
///
/// Simulates a directory that cannot be created without relying on
/// permission bits, which root ignores.
pub fn block_directory(dir: &Path) {
    if let Some(parent) = dir.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("block_directory: failed to create parent: {e}"));
    }
    fs::write(dir, "blocked")
        .unwrap_or_else(|e| panic!("block_directory: failed to write {}: {e}", dir.display()));
}

fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("write_file: failed to create parent: {e}"));
    }
    fs::write(path, content)
        .unwrap_or_else(|e| panic!("write_file: failed to write {}: {e}", path.display()));
    path.to_path_buf()
}
