//! Error types for setup-meta

/// Result type for setup-meta operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown target '{id}'")]
    UnknownTarget { id: String },

    #[error("{target} does not support {scope} scope")]
    ScopeNotSupported { target: String, scope: String },

    #[error("Home directory could not be determined")]
    HomeDirNotFound,
}
