//! Error types for I/O operations.
//!
//! Every codec maps its library error into one [`IoError`] variant with the
//! library message preserved as text.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported or undetectable format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Payload size does not match the declared dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size.
        expected: String,
        /// Actual size.
        actual: String,
    },

    /// Missing required data (e.g. raw dimensions that cannot be inferred).
    #[error("missing data: {0}")]
    MissingData(String),

    /// Malformed raw layout description.
    #[error("invalid raw spec: {0}")]
    InvalidRawSpec(String),

    /// Buffer construction failed.
    #[error(transparent)]
    Core(#[from] pixlab_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
