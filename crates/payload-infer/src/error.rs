//! Error types for payload-infer.
//!
//! Inference itself never fails: an unrecognized or invalid message simply
//! yields no result. These errors cover the boundaries around it, namely
//! loading a message and parsing a BSSID string.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while turning external input into a [`Message`](crate::Message).
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not well-formed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is valid JSON but not an object.
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Error raised when a string is not a valid BSSID.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BssidError {
    /// The string, with separators removed, is not valid hexadecimal.
    #[error("Invalid hexadecimal BSSID: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The string decodes to the wrong number of bytes.
    #[error("BSSID must be 6 bytes, got {0}")]
    InvalidLength(usize),
}

/// Result type alias for payload-infer operations.
pub type Result<T> = std::result::Result<T, PayloadError>;
