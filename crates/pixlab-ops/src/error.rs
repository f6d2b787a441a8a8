//! Error types for image operations.

use pixlab_core::{Channels, Image};
use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid dimensions specified or produced.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The operation does not accept this channel layout.
    #[error("{op}: expected {expected} input, got {actual}")]
    ChannelMismatch {
        /// Operation name
        op: &'static str,
        /// Layout the operation needs
        expected: Channels,
        /// Layout it was given
        actual: Channels,
    },

    /// The input image has no pixels.
    #[error("{0}: no image data")]
    EmptyImage(&'static str),

    /// Error bubbled up from a core buffer constructor.
    #[error(transparent)]
    Core(#[from] pixlab_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Rejects zero-sized input.
pub(crate) fn ensure_not_empty(op: &'static str, image: &Image) -> OpsResult<()> {
    if image.is_empty() {
        return Err(OpsError::EmptyImage(op));
    }
    Ok(())
}

/// Rejects empty input and input that does not have the `expected` layout.
pub(crate) fn ensure_channels(op: &'static str, image: &Image, expected: Channels) -> OpsResult<()> {
    ensure_not_empty(op, image)?;
    if image.channels() != expected {
        return Err(OpsError::ChannelMismatch {
            op,
            expected,
            actual: image.channels(),
        });
    }
    Ok(())
}
