//! Shared test utilities for the jira-mcp-setup workspace.
//!
//! - [`machine`]: a throwaway home directory, project directory and search
//!   path that stand in for a real user's machine.

pub mod machine;

pub use machine::{FakeMachine, block_directory, fake_binary};
