//! TIFF format support.
//!
//! Reads 8- and 16-bit gray, RGB and RGBA strips or tiles (16-bit keeps the
//! high byte, alpha is dropped). Writes 8-bit gray or RGB with LZW
//! compression.

use crate::{IoError, IoResult};
use pixlab_core::{Channels, Image};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// Reads a TIFF file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    use tiff::decoder::{Decoder, DecodingResult};
    use tiff::ColorType;

    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut decoder = Decoder::new(reader)
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;
    let color_type = decoder
        .colortype()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;
    trace!(width, height, color = ?color_type, "tiff decode");

    let result = decoder
        .read_image()
        .map_err(|e: tiff::TiffError| IoError::DecodeError(e.to_string()))?;

    let (stride, keep, channels) = match color_type {
        ColorType::Gray(_) => (1, 1, Channels::Gray),
        ColorType::GrayA(_) => (2, 1, Channels::Gray),
        ColorType::RGB(_) => (3, 3, Channels::Rgb),
        ColorType::RGBA(_) => (4, 3, Channels::Rgb),
        ct => {
            return Err(IoError::DecodeError(format!(
                "unsupported TIFF color type: {:?}",
                ct
            )));
        }
    };

    let data: Vec<u8> = match result {
        DecodingResult::U8(buf) => buf
            .chunks_exact(stride)
            .flat_map(|px| px[..keep].to_vec())
            .collect(),
        DecodingResult::U16(buf) => buf
            .chunks_exact(stride)
            .flat_map(|px| px[..keep].iter().map(|&v| (v >> 8) as u8).collect::<Vec<_>>())
            .collect(),
        _ => {
            return Err(IoError::DecodeError(format!(
                "unsupported TIFF sample type for {:?}",
                color_type
            )));
        }
    };

    Ok(Image::from_data(width, height, channels, data)?)
}

/// Writes an 8-bit TIFF with LZW compression.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    use tiff::encoder::{colortype, compression, TiffEncoder};

    let file = File::create(path.as_ref())?;
    let mut encoder = TiffEncoder::new(file)
        .map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))?;
    let (width, height) = image.dimensions();

    match image.channels() {
        Channels::Rgb => encoder
            .write_image_with_compression::<colortype::RGB8, compression::Lzw>(
                width,
                height,
                compression::Lzw,
                image.data(),
            )
            .map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))?,
        Channels::Gray => encoder
            .write_image_with_compression::<colortype::Gray8, compression::Lzw>(
                width,
                height,
                compression::Lzw,
                image.data(),
            )
            .map_err(|e: tiff::TiffError| IoError::EncodeError(e.to_string()))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.tif");
        let img = Image::from_fn(17, 9, Channels::Rgb, |x, y, c| (x * 15 + y * 27 + c as u32 * 3) as u8).unwrap();
        write(&path, &img).unwrap();
        assert_eq!(read(&path).unwrap(), img);
    }

    #[test]
    fn test_round_trip_gray() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.tiff");
        let img = Image::from_fn(8, 8, Channels::Gray, |x, y, _| (x ^ y) as u8 * 30).unwrap();
        write(&path, &img).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back.channels(), Channels::Gray);
        assert_eq!(back, img);
    }
}
