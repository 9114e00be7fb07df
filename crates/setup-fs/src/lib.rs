//! Filesystem primitives for jira-mcp-setup
//!
//! Provides the two guarantees the injection engine relies on: writes that
//! never leave a half-written config behind, and sibling backups that can be
//! copied back when a write has to be rolled back.

pub mod backup;
pub mod error;
pub mod io;

pub use backup::{backup_file_name, create_backup, restore_backup};
pub use error::{Error, Result};
pub use io::{read_optional, resolve_symlinks, write_atomic};
