//! Config injection for jira-mcp-setup.
//!
//! This crate owns everything that touches a target's config file:
//!
//! 1. [`ServiceEntry`]: the canonical, tool-agnostic Jira MCP server entry.
//! 2. [`family`]: one normalizer per [`ConfigFamily`](setup_meta::ConfigFamily)
//!    translating the canonical entry to and from each tool's native shape.
//! 3. [`ConfigDocument`]: a parsed JSON or TOML document that preserves every
//!    key it does not understand.
//! 4. [`Installer`]: the read-merge-backup-write engine for one target.
//! 5. [`validate`] and [`run_batch`]: the pre-flight check and the
//!    sequential multi-target run built on top of it.

pub mod batch;
pub mod credentials;
pub mod document;
pub mod entry;
pub mod error;
pub mod family;
pub mod inject;
pub mod validate;

pub use batch::{BatchSummary, run_batch};
pub use credentials::{Credentials, is_url_like};
pub use document::ConfigDocument;
pub use entry::ServiceEntry;
pub use error::{Error, Result};
pub use inject::{EntryAction, InjectionResult, Installer};
pub use validate::{ValidationResult, validate};
