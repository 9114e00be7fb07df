//! Runtime facts needed to resolve config paths and probe for tools.

use std::path::{Path, PathBuf};

/// Snapshot of the process environment taken at session start.
///
/// Everything path-dependent reads from this value rather than from the
/// process globals, so tests can point it at temporary directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    home: Option<PathBuf>,
    cwd: PathBuf,
    search_path: Vec<PathBuf>,
}

impl Environment {
    pub fn new(home: Option<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            home,
            cwd: cwd.into(),
            search_path: Vec::new(),
        }
    }

    /// Capture home directory, working directory and `PATH` from the process.
    pub fn from_process() -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let search_path = std::env::var_os("PATH")
            .map(|p| std::env::split_paths(&p).collect())
            .unwrap_or_default();
        Ok(Self {
            home: dirs::home_dir(),
            cwd,
            search_path,
        })
    }

    pub fn with_search_path(mut self, search_path: Vec<PathBuf>) -> Self {
        self.search_path = search_path;
        self
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Find the full path of a binary on the search path (cross-platform).
    pub fn find_binary(&self, binary: &str) -> Option<PathBuf> {
        let exts: &[&str] = if cfg!(windows) {
            &[".exe", ".cmd", ".bat", ""]
        } else {
            &[""]
        };

        for dir in &self.search_path {
            for ext in exts {
                let candidate = dir.join(format!("{binary}{ext}"));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}
