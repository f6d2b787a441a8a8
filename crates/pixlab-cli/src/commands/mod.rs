//! CLI command implementations

pub mod bit_plane;
pub mod blur;
pub mod brightness;
pub mod channels;
pub mod convert;
pub mod equalize;
pub mod fft;
pub mod info;
pub mod mask;
pub mod resize;
pub mod rotate;
pub mod sharpen;
pub mod slice;

use anyhow::{Context, Result};
use pixlab_core::{Channels, Image};
use pixlab_io::RawSpec;
use std::path::Path;
use tracing::info;

/// Load image from path
pub fn load_image(path: &Path, raw: Option<RawSpec>) -> Result<Image> {
    let image = pixlab_io::read_with_raw(path, raw)
        .with_context(|| format!("Failed to load: {}", path.display()))?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        channels = %image.channels(),
        "Loaded image"
    );
    Ok(image)
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    pixlab_io::write(path, image)
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    info!(path = %path.display(), "Saved image");
    Ok(())
}

/// Reduces color input to luma for operations defined on gray images.
pub fn to_gray_for(image: Image, op: &str) -> Image {
    match image.channels() {
        Channels::Gray => image,
        Channels::Rgb => {
            info!(op, "Converting RGB input to luma");
            image.to_luma()
        }
    }
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024 / 2), "1.50 MB");
    }

    #[test]
    fn test_to_gray_for() {
        let rgb = Image::filled(2, 2, Channels::Rgb, 90).unwrap();
        let gray = to_gray_for(rgb, "fft");
        assert_eq!(gray.channels(), Channels::Gray);
        assert_eq!(gray.sample(1, 1, 0), 90);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = load_image(Path::new("/nonexistent/pixlab/input.png"), None).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
