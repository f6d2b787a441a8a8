//! JPEG format support.
//!
//! Decoding uses `jpeg-decoder`, encoding uses `jpeg-encoder`. Gray JPEGs
//! load as single-channel images; CMYK is converted to RGB.

use crate::{IoError, IoResult};
use pixlab_core::{Channels, Image};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, trace};

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOptions {
    /// Quality level 1-100. Higher = better quality, larger files.
    pub quality: u8,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let (width, height) = (info.width as u32, info.height as u32);
    trace!(width, height, format = ?info.pixel_format, "jpeg decode");

    let (channels, data) = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => (Channels::Rgb, pixels),
        jpeg_decoder::PixelFormat::L8 => (Channels::Gray, pixels),
        jpeg_decoder::PixelFormat::L16 => {
            // 16-bit grayscale to 8-bit (use high byte)
            (Channels::Gray, pixels.chunks_exact(2).map(|l16| l16[0]).collect())
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            debug!("Converting CMYK JPEG to RGB");
            let rgb = pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 1.0 - cmyk[3] as f32 / 255.0;
                    let ink = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0).round() as u8;
                    [ink(cmyk[0]), ink(cmyk[1]), ink(cmyk[2])]
                })
                .collect();
            (Channels::Rgb, rgb)
        }
    };

    Ok(Image::from_data(width, height, channels, data)?)
}

/// Writes a JPEG file with default options (quality 90).
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    write_with_options(path, image, &JpegOptions::default())
}

/// Writes a JPEG file.
pub fn write_with_options<P: AsRef<Path>>(path: P, image: &Image, options: &JpegOptions) -> IoResult<()> {
    use jpeg_encoder::{ColorType as JpegColorType, Encoder};

    let (width, height) = image.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::EncodeError(format!(
            "{}x{} exceeds the JPEG size limit",
            width, height
        )));
    }
    let color_type = match image.channels() {
        Channels::Gray => JpegColorType::Luma,
        Channels::Rgb => JpegColorType::Rgb,
    };
    let quality = options.quality.clamp(1, 100);

    let mut buffer = Vec::new();
    let encoder = Encoder::new(&mut buffer, quality);
    encoder
        .encode(image.data(), width as u16, height as u16, color_type)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    std::fs::write(path.as_ref(), &buffer)?;
    Ok(())
}
