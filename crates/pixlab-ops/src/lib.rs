//! # pixlab-ops
//!
//! Image transformations over [`pixlab_core::Image`].
//!
//! Every operation is a pure function: it borrows its input, validates the
//! parameters and returns a freshly allocated result or an [`OpsError`].
//!
//! # Modules
//!
//! - [`intensity`] - Brightness curves, slicing, histogram equalization, bit planes
//! - [`geometry`] - Bilinear resize and rotate
//! - [`filter`] - Convolution, average, median, Gaussian, Laplacian, sharpen
//! - [`fft`] - 2D Fourier transform and reconstructions
//! - [`color`] - RGB channel extraction, HSI decomposition, masks
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::{Channels, Image};
//! use pixlab_ops::filter::{sharpen, FilterConfig, SharpenMode};
//! use pixlab_ops::intensity::equalize;
//!
//! let img = Image::from_fn(32, 32, Channels::Rgb, |x, y, c| (x * 4 + y * 2 + c as u32) as u8).unwrap();
//! let eq = equalize(&img).unwrap();
//! let sharp = sharpen(&eq, 1, SharpenMode::Hsi, &FilterConfig::default()).unwrap();
//! assert_eq!(sharp.dimensions(), (32, 32));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - Row-parallel filters and resampling via rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color;
pub mod fft;
pub mod filter;
pub mod geometry;
pub mod intensity;
pub mod parallel;

pub use error::{OpsError, OpsResult};
pub use filter::{Border, FilterConfig, Kernel, SharpenMode};
pub use fft::Spectrum;
pub use intensity::{BrightnessMode, Histogram};
pub use color::{HsiChannel, RgbChannel};
