//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Add the Jira MCP server to the AI tools installed on this machine
#[derive(Parser, Debug)]
#[command(name = "jira-mcp-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pre-fill the Jira base URL in the credentials form
    #[arg(long, env = "JIRA_BASE_URL")]
    pub base_url: Option<String>,

    /// List every supported tool, including ones not detected
    #[arg(short, long)]
    pub all: bool,

    /// Print the detection report and exit
    #[arg(short, long)]
    pub list: bool,

    /// With --list, print the report as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Append logs to this file (the interactive UI owns the terminal)
    #[arg(long, env = "JIRA_MCP_SETUP_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
