//! Error types for setup-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can end the process
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Standard I/O error, including terminal failures
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialized
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// Interactive mode was started without a terminal
    #[error("Interactive mode needs a terminal. Use --list for a non-interactive report.")]
    NotATerminal,

    /// Nothing to install into
    #[error("No supported tools detected. Run with --all to choose from every supported tool.")]
    NoTargets,
}
