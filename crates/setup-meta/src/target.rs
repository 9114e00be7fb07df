//! Target descriptors: compile-time descriptions of each tool's config file.
//!
//! Each supported tool stores MCP server definitions differently: different
//! file paths per scope, different top-level keys, and different entry
//! shapes. These types describe those differences as plain data so the
//! injection engine can stay free of per-tool conditionals.

use std::path::{Path, PathBuf};

use crate::scope::Scope;

/// Complete description of one supported tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Stable identifier, e.g. `"claude-code"`.
    pub id: &'static str,

    /// Human-readable label shown in menus.
    pub display_name: &'static str,

    /// Shape of the config document and of the server entry inside it.
    pub family: ConfigFamily,

    /// Supported scopes and where each one's config file lives.
    /// A scope missing from this list is unsupported.
    pub scopes: &'static [ScopePath],

    /// Cheap probes that indicate the tool is installed.
    pub evidence: &'static [Evidence],
}

impl TargetDescriptor {
    /// The path spec for `scope`, or `None` if the scope is unsupported.
    pub fn scope_path(&self, scope: Scope) -> Option<&PathSpec> {
        self.scopes
            .iter()
            .find(|sp| sp.scope == scope)
            .map(|sp| &sp.path)
    }

    pub fn supports(&self, scope: Scope) -> bool {
        self.scope_path(scope).is_some()
    }

    /// Scope used when this target is installed on its own: project when
    /// supported, otherwise the first listed scope.
    pub fn preferred_scope(&self) -> Scope {
        if self.supports(Scope::Project) {
            Scope::Project
        } else {
            self.scopes.first().map_or(Scope::User, |sp| sp.scope)
        }
    }
}

/// A supported scope paired with its config file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePath {
    pub scope: Scope,
    pub path: PathSpec,
}

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

/// Where a scope's config file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// Relative to the current working directory.
    Project(&'static str),
    /// Relative to the user's home directory.
    Home(HomePath),
}

/// A path relative to `$HOME`, optionally differing per operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomePath {
    Relative(&'static str),
    OsSpecific {
        macos: &'static str,
        linux: &'static str,
        windows: &'static str,
    },
}

impl HomePath {
    /// The home-relative path for the current platform.
    pub fn relative(&self) -> &'static str {
        match self {
            HomePath::Relative(p) => *p,
            HomePath::OsSpecific {
                macos,
                linux,
                windows,
            } => {
                if cfg!(target_os = "macos") {
                    *macos
                } else if cfg!(target_os = "windows") {
                    *windows
                } else {
                    *linux
                }
            }
        }
    }

    pub fn resolve(&self, home: &Path) -> PathBuf {
        home.join(self.relative())
    }
}

// ---------------------------------------------------------------------------
// Detection evidence
// ---------------------------------------------------------------------------

/// A side-effect-free probe indicating a tool is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    /// An executable with this name on the search path.
    Binary(&'static str),
    /// A file or directory under the home directory.
    HomeDir(HomePath),
}

// ---------------------------------------------------------------------------
// Config families
// ---------------------------------------------------------------------------

/// Serialization format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigFormat::Json => "JSON",
            ConfigFormat::Toml => "TOML",
        }
    }
}

/// How a tool nests server entries and shapes each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFamily {
    /// JSON object map of `{ command, args, env }` entries.
    ///
    /// `type_field` is emitted as `"type"` when the tool requires an explicit
    /// transport discriminator (Claude Code and VS Code use `"stdio"`).
    JsonMap {
        wrapper_key: &'static str,
        type_field: Option<&'static str>,
    },

    /// JSON object map where `command` is a list of tokens and the
    /// environment lives under `environment` (opencode).
    JsonCommandTokens { wrapper_key: &'static str },

    /// TOML table of `[wrapper.entry]` sub-tables (Codex CLI).
    TomlTable { wrapper_key: &'static str },
}

impl ConfigFamily {
    /// Top-level key under which all server entries live.
    pub fn wrapper_key(self) -> &'static str {
        match self {
            ConfigFamily::JsonMap { wrapper_key, .. }
            | ConfigFamily::JsonCommandTokens { wrapper_key }
            | ConfigFamily::TomlTable { wrapper_key } => wrapper_key,
        }
    }

    pub fn format(self) -> ConfigFormat {
        match self {
            ConfigFamily::JsonMap { .. } | ConfigFamily::JsonCommandTokens { .. } => {
                ConfigFormat::Json
            }
            ConfigFamily::TomlTable { .. } => ConfigFormat::Toml,
        }
    }
}
