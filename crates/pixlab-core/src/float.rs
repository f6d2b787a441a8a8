//! Floating-point intermediate images.
//!
//! Convolutions, spectra and brightness curves produce values outside
//! [0, 255]. They land in a [`FloatImage`], which is never displayed
//! directly: it becomes an [`Image`] only through one of the explicit
//! conversions [`FloatImage::clip_to_u8`], [`FloatImage::round_to_u8`] or
//! [`FloatImage::normalize_to_u8`].

use crate::image::buffer_len;
use crate::{Channels, Error, Image, Result};

/// Image-shaped buffer of `f64` samples.
#[derive(Clone, PartialEq)]
pub struct FloatImage {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<f64>,
}

impl FloatImage {
    /// Wraps an existing sample buffer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] on a length mismatch.
    pub fn from_data(width: u32, height: u32, channels: Channels, data: Vec<f64>) -> Result<Self> {
        let expected = buffer_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("buffer holds {} samples, expected {}", data.len(), expected),
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Widens an 8-bit image sample by sample.
    pub fn from_image(image: &Image) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            channels: image.channels(),
            data: image.data().iter().map(|&v| v as f64).collect(),
        }
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Returns one sample.
    #[inline]
    pub fn sample(&self, x: u32, y: u32, c: usize) -> f64 {
        let n = self.channels.count();
        self.data[(y as usize * self.width as usize + x as usize) * n + c]
    }

    /// Returns the sample buffer.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns the sample buffer mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns a new image with `f` applied to every sample.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Smallest and largest sample, or `None` for an empty buffer.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Returns `true` if no sample is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    fn to_u8_with<F>(&self, f: F) -> Image
    where
        F: Fn(f64) -> u8,
    {
        let data = self.data.iter().map(|&v| f(v)).collect();
        Image::from_raw_parts(self.width, self.height, self.channels, data)
    }

    /// Clamps to [0, 255] and truncates toward zero. NaN becomes 0.
    pub fn clip_to_u8(&self) -> Image {
        self.to_u8_with(|v| v.clamp(0.0, 255.0) as u8)
    }

    /// Clamps to [0, 255] and rounds to the nearest integer. NaN becomes 0.
    pub fn round_to_u8(&self) -> Image {
        self.to_u8_with(|v| v.clamp(0.0, 255.0).round() as u8)
    }

    /// Min-max normalizes the whole buffer to [0, 255] and rounds.
    ///
    /// When every sample is equal (or the range is not finite) each output
    /// sample is `flat`.
    pub fn normalize_to_u8(&self, flat: u8) -> Image {
        match self.min_max() {
            Some((lo, hi)) if hi > lo && (hi - lo).is_finite() => {
                let scale = 255.0 / (hi - lo);
                self.to_u8_with(|v| ((v - lo) * scale).clamp(0.0, 255.0).round() as u8)
            }
            _ => self.to_u8_with(|_| flat),
        }
    }
}

impl std::fmt::Debug for FloatImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish()
    }
}
