// Unified error handling for the triage client.

use std::io;

use thiserror::Error;

/// Main error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Network failure or non-success status from the prediction API.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API responded with a body we could not decode.
    #[error("decode error: {0}")]
    Decode(String),

    /// The selected file could not be read or decoded for preview.
    #[error("preview error: {0}")]
    Preview(String),

    /// Settings could not be loaded or persisted.
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, Error>;
