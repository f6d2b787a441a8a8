//! Headerless raw sample dumps.
//!
//! A raw file is nothing but row-major 8-bit samples, so the caller has to
//! say how to interpret it with a [`RawSpec`]. Without one, a file of exactly
//! `512 * 512` bytes is taken to be a 512x512 grayscale image, which is how
//! the classic test images (lena.raw and friends) are distributed.

use crate::{IoError, IoResult};
use pixlab_core::{Channels, Image};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Side length assumed for raw files without an explicit layout.
pub const DEFAULT_RAW_SIDE: u32 = 512;

/// Sample layout of a raw dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawLayout {
    /// One byte per pixel.
    #[default]
    Gray,
    /// Interleaved RGB, three bytes per pixel.
    Rgb,
}

impl RawLayout {
    fn channels(self) -> Channels {
        match self {
            RawLayout::Gray => Channels::Gray,
            RawLayout::Rgb => Channels::Rgb,
        }
    }
}

/// Dimensions and layout of a raw dump.
///
/// Parses from `WxH` or `WxH:gray` / `WxH:rgb`:
///
/// ```rust
/// use pixlab_io::{RawLayout, RawSpec};
///
/// let spec: RawSpec = "640x480:rgb".parse().unwrap();
/// assert_eq!(spec, RawSpec::new(640, 480, RawLayout::Rgb));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSpec {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Sample layout.
    pub layout: RawLayout,
}

impl RawSpec {
    /// Creates a raw spec.
    pub fn new(width: u32, height: u32, layout: RawLayout) -> Self {
        Self { width, height, layout }
    }

    /// Byte count described by this spec.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.layout.channels().count()
    }
}

impl Default for RawSpec {
    fn default() -> Self {
        Self::new(DEFAULT_RAW_SIDE, DEFAULT_RAW_SIDE, RawLayout::Gray)
    }
}

impl fmt::Display for RawSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = match self.layout {
            RawLayout::Gray => "gray",
            RawLayout::Rgb => "rgb",
        };
        write!(f, "{}x{}:{}", self.width, self.height, layout)
    }
}

impl FromStr for RawSpec {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dims, layout) = match s.split_once(':') {
            Some((dims, layout)) => (dims, Some(layout)),
            None => (s, None),
        };

        let layout = match layout.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            None | Some("gray") | Some("grey") | Some("l") => RawLayout::Gray,
            Some("rgb") => RawLayout::Rgb,
            Some(other) => {
                return Err(IoError::InvalidRawSpec(format!("unknown layout '{}'", other)));
            }
        };

        let (w, h) = dims
            .split_once(['x', 'X'])
            .ok_or_else(|| IoError::InvalidRawSpec(format!("expected WxH, got '{}'", s)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| IoError::InvalidRawSpec(format!("'{}': {}", v, e)))
        };
        let (width, height) = (parse(w)?, parse(h)?);
        if width == 0 || height == 0 {
            return Err(IoError::InvalidRawSpec(format!("zero dimension in '{}'", s)));
        }

        Ok(Self::new(width, height, layout))
    }
}

/// Interprets a byte buffer as a raw dump.
pub fn decode(bytes: &[u8], spec: Option<RawSpec>) -> IoResult<Image> {
    let spec = match spec {
        Some(spec) => spec,
        None => {
            let inferred = RawSpec::default();
            if bytes.len() != inferred.byte_len() {
                return Err(IoError::MissingData(format!(
                    "raw dimensions unknown for {} bytes; supply WxH",
                    bytes.len()
                )));
            }
            debug!(spec = %inferred, "Inferred raw layout from file size");
            inferred
        }
    };

    let expected = spec.byte_len();
    if bytes.len() < expected {
        return Err(IoError::DimensionMismatch {
            expected: format!("{} bytes ({})", expected, spec),
            actual: format!("{} bytes", bytes.len()),
        });
    }
    if bytes.len() > expected {
        warn!(
            extra = bytes.len() - expected,
            spec = %spec,
            "Ignoring trailing bytes in raw file"
        );
    }

    Ok(Image::from_data(
        spec.width,
        spec.height,
        spec.layout.channels(),
        bytes[..expected].to_vec(),
    )?)
}

/// Reads a raw dump from disk.
pub fn read<P: AsRef<Path>>(path: P, spec: Option<RawSpec>) -> IoResult<Image> {
    let bytes = std::fs::read(path.as_ref())?;
    decode(&bytes, spec)
}

/// Writes the image samples with no header.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    std::fs::write(path.as_ref(), image.data())?;
    Ok(())
}
