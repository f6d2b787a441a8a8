//! Error types for pixlab-core.
//!
//! Every buffer constructor in this crate validates its input and reports
//! problems through [`Error`]. Higher crates wrap it in their own error enums
//! (`OpsError::Core`, `IoError::Core`).
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::{Channels, Error, Image};
//!
//! let err = Image::from_data(4, 4, Channels::Rgb, vec![0; 10]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, the sample buffer does not
    /// match `width * height * channels`, or the size overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
