//! Target registry: the single source of truth for where each tool keeps
//! its MCP server definitions.
//!
//! # Adding a new target
//!
//! Append a [`TargetDescriptor`] to [`BUILTIN_TARGETS`]. Nothing else changes:
//! detection, validation and injection all read from the descriptor.

use std::path::PathBuf;

use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::target::{
    ConfigFamily, Evidence, HomePath, PathSpec, ScopePath, TargetDescriptor,
};

/// Key of this service's entry inside every target's wrapper map.
pub const ENTRY_KEY: &str = "jira";

/// Resolved file location and shape for one (target, scope) pair.
///
/// Computed on demand; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub target_id: &'static str,
    pub scope: Scope,
    pub path: PathBuf,
    pub wrapper_key: &'static str,
    pub entry_key: &'static str,
    pub family: ConfigFamily,
}

/// Immutable catalog of supported targets.
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Vec<TargetDescriptor>,
}

impl TargetRegistry {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            targets: BUILTIN_TARGETS.to_vec(),
        }
    }

    /// All targets, in menu order.
    pub fn list_targets(&self) -> &[TargetDescriptor] {
        &self.targets
    }

    pub fn get(&self, id: &str) -> Option<&TargetDescriptor> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Resolve the config location for `target_id` at `scope`.
    pub fn resolve_config_location(
        &self,
        target_id: &str,
        scope: Scope,
        env: &Environment,
    ) -> Result<ConfigLocation> {
        let target = self.get(target_id).ok_or_else(|| Error::UnknownTarget {
            id: target_id.to_string(),
        })?;
        resolve_for(target, scope, env)
    }
}

/// Resolve the config location for a descriptor at `scope`.
pub fn resolve_for(
    target: &TargetDescriptor,
    scope: Scope,
    env: &Environment,
) -> Result<ConfigLocation> {
    let spec = target
        .scope_path(scope)
        .ok_or_else(|| Error::ScopeNotSupported {
            target: target.display_name.to_string(),
            scope: scope.to_string(),
        })?;

    let path = match spec {
        PathSpec::Project(rel) => env.cwd().join(rel),
        PathSpec::Home(home_path) => {
            let home = env.home().ok_or(Error::HomeDirNotFound)?;
            home_path.resolve(home)
        }
    };

    tracing::debug!(
        target_id = target.id,
        %scope,
        path = %path.display(),
        "Resolved config location"
    );

    Ok(ConfigLocation {
        target_id: target.id,
        scope,
        path,
        wrapper_key: target.family.wrapper_key(),
        entry_key: ENTRY_KEY,
        family: target.family,
    })
}

// ===========================================================================
// Built-in targets
// ===========================================================================

const MCP_SERVERS: ConfigFamily = ConfigFamily::JsonMap {
    wrapper_key: "mcpServers",
    type_field: None,
};

/// All built-in targets, in menu order.
pub const BUILTIN_TARGETS: &[TargetDescriptor] = &[
    TargetDescriptor {
        id: "claude-code",
        display_name: "Claude Code",
        family: ConfigFamily::JsonMap {
            wrapper_key: "mcpServers",
            type_field: Some("stdio"),
        },
        scopes: &[
            ScopePath {
                scope: Scope::User,
                path: PathSpec::Home(HomePath::Relative(".claude.json")),
            },
            ScopePath {
                scope: Scope::Project,
                path: PathSpec::Project(".mcp.json"),
            },
        ],
        evidence: &[
            Evidence::Binary("claude"),
            Evidence::HomeDir(HomePath::Relative(".claude")),
        ],
    },
    TargetDescriptor {
        id: "claude-desktop",
        display_name: "Claude Desktop",
        family: MCP_SERVERS,
        // Desktop app has no project-level config
        scopes: &[ScopePath {
            scope: Scope::User,
            path: PathSpec::Home(HomePath::OsSpecific {
                macos: "Library/Application Support/Claude/claude_desktop_config.json",
                linux: ".config/Claude/claude_desktop_config.json",
                windows: "AppData/Roaming/Claude/claude_desktop_config.json",
            }),
        }],
        evidence: &[Evidence::HomeDir(HomePath::OsSpecific {
            macos: "Library/Application Support/Claude",
            linux: ".config/Claude",
            windows: "AppData/Roaming/Claude",
        })],
    },
    TargetDescriptor {
        id: "cursor",
        display_name: "Cursor",
        family: MCP_SERVERS,
        scopes: &[
            ScopePath {
                scope: Scope::User,
                path: PathSpec::Home(HomePath::Relative(".cursor/mcp.json")),
            },
            ScopePath {
                scope: Scope::Project,
                path: PathSpec::Project(".cursor/mcp.json"),
            },
        ],
        evidence: &[
            Evidence::Binary("cursor"),
            Evidence::HomeDir(HomePath::Relative(".cursor")),
        ],
    },
    TargetDescriptor {
        id: "vscode",
        display_name: "VS Code",
        // VS Code uses "servers", not "mcpServers"
        family: ConfigFamily::JsonMap {
            wrapper_key: "servers",
            type_field: Some("stdio"),
        },
        scopes: &[
            ScopePath {
                scope: Scope::User,
                path: PathSpec::Home(HomePath::OsSpecific {
                    macos: "Library/Application Support/Code/User/mcp.json",
                    linux: ".config/Code/User/mcp.json",
                    windows: "AppData/Roaming/Code/User/mcp.json",
                }),
            },
            ScopePath {
                scope: Scope::Project,
                path: PathSpec::Project(".vscode/mcp.json"),
            },
        ],
        evidence: &[
            Evidence::Binary("code"),
            Evidence::HomeDir(HomePath::OsSpecific {
                macos: "Library/Application Support/Code",
                linux: ".config/Code",
                windows: "AppData/Roaming/Code",
            }),
        ],
    },
    TargetDescriptor {
        id: "windsurf",
        display_name: "Windsurf",
        family: MCP_SERVERS,
        scopes: &[ScopePath {
            scope: Scope::User,
            path: PathSpec::Home(HomePath::Relative(".codeium/windsurf/mcp_config.json")),
        }],
        evidence: &[
            Evidence::Binary("windsurf"),
            Evidence::HomeDir(HomePath::Relative(".codeium/windsurf")),
        ],
    },
    TargetDescriptor {
        id: "gemini-cli",
        display_name: "Gemini CLI",
        family: MCP_SERVERS,
        scopes: &[
            ScopePath {
                scope: Scope::User,
                path: PathSpec::Home(HomePath::Relative(".gemini/settings.json")),
            },
            ScopePath {
                scope: Scope::Project,
                path: PathSpec::Project(".gemini/settings.json"),
            },
        ],
        evidence: &[
            Evidence::Binary("gemini"),
            Evidence::HomeDir(HomePath::Relative(".gemini")),
        ],
    },
    TargetDescriptor {
        id: "zed",
        display_name: "Zed",
        family: ConfigFamily::JsonMap {
            wrapper_key: "context_servers",
            type_field: None,
        },
        scopes: &[
            ScopePath {
                scope: Scope::User,
                path: PathSpec::Home(HomePath::Relative(".config/zed/settings.json")),
            },
            ScopePath {
                scope: Scope::Project,
                path: PathSpec::Project(".zed/settings.json"),
            },
        ],
        evidence: &[
            Evidence::Binary("zed"),
            Evidence::Binary("zeditor"),
            Evidence::HomeDir(HomePath::Relative(".config/zed")),
        ],
    },
    TargetDescriptor {
        id: "opencode",
        display_name: "opencode",
        family: ConfigFamily::JsonCommandTokens { wrapper_key: "mcp" },
        scopes: &[
            ScopePath {
                scope: Scope::User,
                path: PathSpec::Home(HomePath::Relative(".config/opencode/opencode.json")),
            },
            ScopePath {
                scope: Scope::Project,
                path: PathSpec::Project("opencode.json"),
            },
        ],
        evidence: &[
            Evidence::Binary("opencode"),
            Evidence::HomeDir(HomePath::Relative(".config/opencode")),
        ],
    },
    TargetDescriptor {
        id: "codex",
        display_name: "Codex CLI",
        family: ConfigFamily::TomlTable {
            wrapper_key: "mcp_servers",
        },
        scopes: &[ScopePath {
            scope: Scope::User,
            path: PathSpec::Home(HomePath::Relative(".codex/config.toml")),
        }],
        evidence: &[
            Evidence::Binary("codex"),
            Evidence::HomeDir(HomePath::Relative(".codex")),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique_and_every_target_has_a_scope() {
        let mut seen = std::collections::HashSet::new();
        for target in BUILTIN_TARGETS {
            assert!(!target.scopes.is_empty(), "{} has no scope", target.id);
            assert!(seen.insert(target.id), "duplicate id {}", target.id);
        }
    }

    #[test]
    fn test_builtin_order_is_stable() {
        let ids: Vec<&str> = TargetRegistry::builtin()
            .list_targets()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids.first(), Some(&"claude-code"));
        assert_eq!(ids.last(), Some(&"codex"));
        assert_eq!(ids.len(), BUILTIN_TARGETS.len());
    }

    #[test]
    fn test_missing_home_is_reported() {
        let env = Environment::new(None, "/work");
        let err = TargetRegistry::builtin()
            .resolve_config_location("codex", Scope::User, &env)
            .unwrap_err();
        assert_eq!(err, Error::HomeDirNotFound);
    }
}
