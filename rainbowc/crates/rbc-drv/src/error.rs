//! Driver error type.
//!
//! Stage findings are never errors here — they live in diagnostics and
//! sidecar files. `RbcError` covers the driver's own failures: unreadable
//! input, unwritable artifacts, serialization.

use std::path::PathBuf;

use thiserror::Error;

/// Errors the driver itself can hit while orchestrating the pipeline.
#[derive(Error, Debug)]
pub enum RbcError {
    /// The source file could not be read.
    #[error("não foi possível ler '{path}': {source}")]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A sidecar artifact could not be written.
    #[error("não foi possível gravar '{path}': {source}")]
    WriteArtifact {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("erro de serialização JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other IO failure.
    #[error("erro de E/S: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the driver.
pub type Result<T> = std::result::Result<T, RbcError>;
