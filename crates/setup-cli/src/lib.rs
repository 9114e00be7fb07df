//! Interactive installer for the Jira MCP server.
//!
//! The binary is a thin shell around three pieces:
//!
//! - [`app`]: the terminal-independent state machine. Every transition is a
//!   plain method call, so the whole flow is testable without a terminal.
//! - [`ui`]: stateless rendering of a [`app::Session`] with ratatui.
//! - [`tui`]: the event loop that reads crossterm events, feeds them to the
//!   session and runs the batch when the session asks for it.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod report;
pub mod tui;
pub mod ui;

pub use error::{CliError, Result};
