//! Target catalog for jira-mcp-setup
//!
//! Describes every AI-assistant tool whose configuration file can receive the
//! Jira MCP server entry, and where that file lives for each scope.
//!
//! # Architecture
//!
//! - [`TargetDescriptor`] values are compile-time constants: paths, wrapper
//!   keys and entry shapes are `&'static str` data, never logic.
//! - [`TargetRegistry`] is the immutable catalog built once at startup.
//! - [`Environment`] carries the runtime facts (home, cwd, `PATH`) that turn a
//!   descriptor into a concrete [`ConfigLocation`].
//! - [`detect_installed_targets`] probes the environment for evidence that a
//!   tool is installed.

pub mod detector;
pub mod environment;
pub mod error;
pub mod registry;
pub mod scope;
pub mod target;

pub use detector::{DetectedTarget, detect_installed_targets};
pub use environment::Environment;
pub use error::{Error, Result};
pub use registry::{BUILTIN_TARGETS, ConfigLocation, ENTRY_KEY, TargetRegistry, resolve_for};
pub use scope::Scope;
pub use target::{
    ConfigFamily, ConfigFormat, Evidence, HomePath, PathSpec, ScopePath, TargetDescriptor,
};
