//! Error types for Atrium
//!
//! Uses `thiserror` for library errors. Nothing in the rendering path returns
//! an error; failures there degrade to diagnostics and visible fallback
//! elements instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Atrium operations
pub type AtriumResult<T> = Result<T, AtriumError>;

/// Main error type for Atrium operations
#[derive(Error, Debug)]
pub enum AtriumError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// The list endpoint request itself failed (network or HTTP status)
    #[error("list endpoint request failed: {message}")]
    Fetch { message: String },

    /// The endpoint answered but the payload did not match the expected envelope
    #[error("unexpected payload from {url}: {message}")]
    InvalidPayload { url: String, message: String },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A list operation needs a GUID that the configuration does not carry
    #[error("no list GUID configured for {component}")]
    MissingListGuid { component: &'static str },
}
