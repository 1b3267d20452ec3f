//! Error types for the mdm-core library.
//!
//! The extraction engine itself is total and never fails; these errors only
//! come from the layers around it (configuration files and ingest input).

use thiserror::Error;

/// Main error type for the mdm library.
#[derive(Error, Debug)]
pub enum MdmError {
    /// Ingest input could not be turned into change requests.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to ingesting source requests.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The payload was not a list of requests.
    #[error("expected a JSON array of requests, got {0}")]
    NotAList(String),

    /// A request in the payload could not be decoded.
    #[error("invalid request at index {index}: {reason}")]
    InvalidRequest { index: usize, reason: String },

    /// The existing store could not be read back.
    #[error("invalid store: {0}")]
    Store(String),
}

/// Result type for the mdm library.
pub type Result<T> = std::result::Result<T, MdmError>;
