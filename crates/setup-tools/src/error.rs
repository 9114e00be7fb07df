//! Error types for setup-tools

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] setup_fs::Error),

    #[error(transparent)]
    Meta(#[from] setup_meta::Error),

    #[error("Failed to parse {format} config at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("'{key}' in {path} is not a map; refusing to overwrite it")]
    NotAMap { path: PathBuf, key: String },

    #[error("Failed to render {format} config: {message}")]
    Render {
        format: &'static str,
        message: String,
    },

    #[error("Written config at {path} did not verify: {message}")]
    Verification { path: PathBuf, message: String },
}
