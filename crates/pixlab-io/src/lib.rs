//! # pixlab-io
//!
//! Reading and writing of 8-bit images.
//!
//! - **PNG** - Lossless, gray or RGB (alpha dropped, 16-bit reduced to 8)
//! - **JPEG** - Lossy, quality setting on write
//! - **TIFF** - LZW-compressed strips on write
//! - **Raw** - Headerless sample dumps described by a [`RawSpec`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pixlab_io::{read, write};
//!
//! // Read any supported format (auto-detected)
//! let image = read("input.tif")?;
//!
//! // Write to a different format
//! write("output.png", &image)?;
//! ```
//!
//! Raw dumps carry no header, so their layout comes from the caller:
//!
//! ```rust,ignore
//! use pixlab_io::{read_with_raw, RawSpec};
//!
//! let spec: RawSpec = "256x256:gray".parse()?;
//! let image = read_with_raw("scan.raw", Some(spec))?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)
//! - `tiff` - TIFF support (default)
//!
//! Raw support is always available.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
pub mod raw;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "tiff")]
pub mod tiff;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use raw::{RawLayout, RawSpec};

#[cfg(feature = "jpeg")]
pub use jpeg::JpegOptions;

use pixlab_core::Image;
use std::path::Path;
use tracing::debug;

/// Reads an image from a file, auto-detecting the format.
///
/// Files with a `.raw` extension are read as raw dumps, inferring a 512x512
/// gray layout from the file size. Use [`read_with_raw`] for other layouts.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    read_with_raw(path, None)
}

/// Reads an image, using `raw` as the layout for headerless files.
///
/// A `.raw` extension always selects the raw reader. Otherwise the format
/// is detected from magic bytes and extension; when neither identifies the
/// file and a layout was supplied, it is read as raw.
pub fn read_with_raw<P: AsRef<Path>>(path: P, raw: Option<RawSpec>) -> IoResult<Image> {
    let path = path.as_ref();
    let format = match Format::from_extension(path) {
        Format::Raw => Format::Raw,
        _ => match Format::detect(path)? {
            Format::Unknown if raw.is_some() => Format::Raw,
            detected => detected,
        },
    };
    debug!(path = %path.display(), format = format.name(), "Reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::read(path),

        Format::Raw => raw::read(path, raw),

        #[allow(unreachable_patterns)]
        other => Err(unsupported(path, other)),
    }
}

/// Writes an image to a file, detecting format from extension.
///
/// JPEG output uses [`JpegOptions::default`]; call [`jpeg::write_with_options`]
/// for a different quality.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be created
/// - The extension names no supported format
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), format = format.name(), "Writing image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        #[cfg(feature = "tiff")]
        Format::Tiff => tiff::write(path, image),

        Format::Raw => raw::write(path, image),

        #[allow(unreachable_patterns)]
        other => Err(unsupported(path, other)),
    }
}

fn unsupported(path: &Path, format: Format) -> IoError {
    match format {
        Format::Unknown => IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        ),
        known => IoError::UnsupportedFormat(format!("{} support not compiled in", known.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixlab_core::Channels;

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let img = Image::filled(2, 2, Channels::Gray, 1).unwrap();
        let err = write(dir.path().join("out.xyz"), &img).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ref e) if e == "xyz"));
    }

    #[test]
    fn test_unrecognized_file_with_raw_spec() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.bin");
        std::fs::write(&path, [1u8, 2, 3, 4, 5, 6]).unwrap();

        assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(_))));

        let spec = RawSpec::new(3, 2, RawLayout::Gray);
        let img = read_with_raw(&path, Some(spec)).unwrap();
        assert_eq!(img.row(1), &[4, 5, 6]);
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_raw_spec_does_not_override_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        let img = Image::from_fn(5, 3, Channels::Rgb, |x, y, c| (x + y + c as u32) as u8).unwrap();
        write(&path, &img).unwrap();
        let back = read_with_raw(&path, Some(RawSpec::new(1, 1, RawLayout::Gray))).unwrap();
        assert_eq!(back, img);
    }
}
