//! PNG format support.
//!
//! Palette and sub-byte images are expanded to 8 bits on read. Alpha is
//! dropped and 16-bit samples keep their high byte, so every PNG loads as
//! an 8-bit gray or RGB [`Image`]. Writing produces 8-bit grayscale or RGB.

use crate::{IoError, IoResult};
use pixlab_core::{Channels, Image};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, trace};

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    trace!(
        width = info.width,
        height = info.height,
        color = ?info.color_type,
        depth = ?info.bit_depth,
        "png decode"
    );

    // Samples per pixel in the decoded buffer, and how many of them to keep.
    let (stride, keep, channels) = match info.color_type {
        png::ColorType::Grayscale => (1, 1, Channels::Gray),
        png::ColorType::GrayscaleAlpha => (2, 1, Channels::Gray),
        png::ColorType::Rgb => (3, 3, Channels::Rgb),
        png::ColorType::Rgba => (4, 3, Channels::Rgb),
        png::ColorType::Indexed => {
            return Err(IoError::DecodeError("palette was not expanded".into()));
        }
    };
    let bytes_per_sample = match info.bit_depth {
        png::BitDepth::Eight => 1,
        png::BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::DecodeError(format!("unexpected bit depth {:?}", other)));
        }
    };
    if stride != keep {
        debug!("Dropping PNG alpha channel");
    }

    // Big-endian 16-bit samples: the high byte comes first.
    let data: Vec<u8> = bytes
        .chunks_exact(stride * bytes_per_sample)
        .flat_map(|px| (0..keep).map(move |c| px[c * bytes_per_sample]))
        .collect();

    Ok(Image::from_data(info.width, info.height, channels, data)?)
}

/// Writes an 8-bit PNG.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let color_type = match image.channels() {
        Channels::Gray => png::ColorType::Grayscale,
        Channels::Rgb => png::ColorType::Rgb,
    };

    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e: png::EncodingError| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e: png::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(())
}
