//! 8-bit image buffers.
//!
//! [`Image`] is the displayable buffer every operation consumes and
//! produces. Samples are `u8`, stored row-major, top-to-bottom:
//!
//! ```text
//! Gray:  [Y Y Y Y ...]          <- Row 0
//! RGB:   [R G B R G B R G B ...] <- Row 0
//!        ...
//! ```
//!
//! The dimensions and channel layout of an instance never change. Helpers
//! that reshape data ([`Image::to_luma`], [`Image::to_rgb`]) always
//! allocate a new buffer.

use crate::{Error, Result};

/// Channel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channels {
    /// One sample per pixel.
    Gray,
    /// Three interleaved samples per pixel in R, G, B order.
    Rgb,
}

impl Channels {
    /// Number of samples per pixel.
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
        }
    }

    /// Short lowercase name, used in logs and CLI output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Rgb => "rgb",
        }
    }
}

impl std::fmt::Display for Channels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// ITU-R BT.601 luma with integer weights 299/587/114, rounded.
#[inline]
pub fn luma_bt601(r: u8, g: u8, b: u8) -> u8 {
    let sum = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    ((sum + 500) / 1000) as u8
}

/// Computes `width * height * channels`, failing on overflow.
pub(crate) fn buffer_len(width: u32, height: u32, channels: Channels) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels.count()))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows usize"))
}

/// Owned 8-bit image buffer.
///
/// A zero-sized image is representable (it is what an "unloaded" slot looks
/// like); operations in `pixlab-ops` reject it with an `EmptyImage` error.
///
/// # Example
///
/// ```rust
/// use pixlab_core::{Channels, Image};
///
/// let img = Image::from_fn(3, 2, Channels::Rgb, |x, y, c| (x + y + c as u32) as u8).unwrap();
/// assert_eq!(img.pixel(2, 1), &[3, 4, 5]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl Image {
    /// Creates a black image.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Self::filled(width, height, channels, 0)
    }

    /// Creates an image with every sample set to `value`.
    pub fn filled(width: u32, height: u32, channels: Channels, value: u8) -> Result<Self> {
        let len = buffer_len(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![value; len],
        })
    }

    /// Wraps an existing sample buffer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * channels`.
    pub fn from_data(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!(
                    "buffer holds {} samples, expected {} for {} layout",
                    data.len(),
                    expected,
                    channels
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Assembles an image whose buffer length is already known to match.
    pub(crate) fn from_raw_parts(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * channels.count());
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Builds an image by evaluating `f(x, y, channel)` for every sample.
    pub fn from_fn<F>(width: u32, height: u32, channels: Channels, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32, usize) -> u8,
    {
        let len = buffer_len(width, height, channels)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels.count() {
                    data.push(f(x, y, c));
                }
            }
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Returns the number of samples per pixel.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.count()
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels.count()
    }

    /// Returns the samples of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        &self.data[offset..offset + self.channels.count()]
    }

    /// Returns one sample.
    ///
    /// # Panics
    ///
    /// Panics if (x, y, c) is out of bounds.
    #[inline]
    pub fn sample(&self, x: u32, y: u32, c: usize) -> u8 {
        debug_assert!(c < self.channels.count(), "channel out of bounds");
        self.data[self.offset(x, y) + c]
    }

    /// Returns a row of samples.
    ///
    /// # Panics
    ///
    /// Panics if y >= height.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let stride = self.width as usize * self.channels.count();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Returns the interleaved sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a new image with `f` applied to every sample.
    pub fn map_samples<F>(&self, f: F) -> Self
    where
        F: Fn(u8) -> u8,
    {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Converts to a single-channel luma image.
    ///
    /// Gray input is returned as a copy.
    pub fn to_luma(&self) -> Self {
        match self.channels {
            Channels::Gray => self.clone(),
            Channels::Rgb => Self {
                width: self.width,
                height: self.height,
                channels: Channels::Gray,
                data: self
                    .data
                    .chunks_exact(3)
                    .map(|px| luma_bt601(px[0], px[1], px[2]))
                    .collect(),
            },
        }
    }

    /// Converts to RGB by replicating the gray sample.
    ///
    /// RGB input is returned as a copy.
    pub fn to_rgb(&self) -> Self {
        match self.channels {
            Channels::Rgb => self.clone(),
            Channels::Gray => Self {
                width: self.width,
                height: self.height,
                channels: Channels::Rgb,
                data: self.data.iter().flat_map(|&v| [v, v, v]).collect(),
            },
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish()
    }
}
