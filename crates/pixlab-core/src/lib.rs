//! # pixlab-core
//!
//! Core types for 8-bit image processing.
//!
//! This crate provides the foundational types used throughout pixlab:
//!
//! - [`Image`] - Owned 8-bit pixel buffer, gray or interleaved RGB
//! - [`Channels`] - Channel layout of an image
//! - [`FloatImage`] - `f64` intermediate with explicit conversions back to [`Image`]
//! - [`Error`] / [`Result`] - Error types shared by the other crates
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. Every other pixlab crate depends
//! on `pixlab-core`:
//!
//! ```text
//! pixlab-core (this crate)
//!    ^
//!    |
//!    +-- pixlab-ops (transformations)
//!    +-- pixlab-io (codecs)
//!    +-- pixlab-cli (binary)
//! ```
//!
//! ## Buffers are values
//!
//! Every transformation in `pixlab-ops` takes an `&Image` and returns a new
//! one. Dimensions never change on an existing buffer.
//!
//! ```
//! use pixlab_core::{Channels, Image};
//!
//! let img = Image::filled(4, 4, Channels::Gray, 10).unwrap();
//! let brighter = img.map_samples(|v| v.saturating_add(100));
//! assert_eq!(img.sample(0, 0, 0), 10);
//! assert_eq!(brighter.sample(0, 0, 0), 110);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod float;
pub mod image;

pub use error::*;
pub use float::FloatImage;
pub use image::{luma_bt601, Channels, Image};

/// Prelude module for convenient imports.
///
/// ```
/// use pixlab_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::float::FloatImage;
    pub use crate::image::{Channels, Image};
}
