//! Integration tests for pixlab crates.
//!
//! End-to-end checks that decode, transform and re-encode images across
//! `pixlab-io` and `pixlab-ops`, plus the algebraic properties the
//! operations promise (involutions, round trips, partitions).

#[cfg(test)]
mod properties;

#[cfg(test)]
mod tests {
    use pixlab_core::{Channels, Image};
    use pixlab_io::{IoError, RawLayout, RawSpec};
    use pixlab_ops::filter::{median, sharpen, FilterConfig, SharpenMode};
    use pixlab_ops::geometry::resize;
    use pixlab_ops::intensity::{equalize, slice};
    use tempfile::tempdir;

    fn gradient_rgb(w: u32, h: u32) -> Image {
        Image::from_fn(w, h, Channels::Rgb, |x, y, c| {
            (x * 160 / w.max(1) + y * 50 / h.max(1) + c as u32 * 20) as u8
        })
        .unwrap()
    }

    #[test]
    fn test_io_roundtrip_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");
        let image = gradient_rgb(32, 24);

        pixlab_io::write(&path, &image).expect("Failed to write PNG");
        let loaded = pixlab_io::read(&path).expect("Failed to read PNG");

        assert_eq!(loaded, image);
    }

    #[test]
    fn test_io_roundtrip_tiff() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.tiff");
        let image = gradient_rgb(32, 32).to_luma();

        pixlab_io::write(&path, &image).expect("Failed to write TIFF");
        let loaded = pixlab_io::read(&path).expect("Failed to read TIFF");

        assert_eq!(loaded, image);
    }

    #[test]
    fn test_io_roundtrip_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.jpg");
        let image = gradient_rgb(48, 32);

        pixlab_io::write(&path, &image).expect("Failed to write JPEG");
        let loaded = pixlab_io::read(&path).expect("Failed to read JPEG");

        assert_eq!(loaded.dimensions(), image.dimensions());
        assert_eq!(loaded.channels(), Channels::Rgb);
        let mean_err: f64 = loaded
            .data()
            .iter()
            .zip(image.data())
            .map(|(&a, &b)| (a as f64 - b as f64).abs())
            .sum::<f64>()
            / image.data().len() as f64;
        assert!(mean_err < 4.0, "mean error {mean_err}");
    }

    #[test]
    fn test_raw_512_inference() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lena.raw");
        let bytes: Vec<u8> = (0..512 * 512).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &bytes).unwrap();

        let loaded = pixlab_io::read(&path).unwrap();
        assert_eq!(loaded.dimensions(), (512, 512));
        assert_eq!(loaded.channels(), Channels::Gray);
        assert_eq!(loaded.data(), &bytes[..]);
    }

    #[test]
    fn test_raw_without_layout_is_missing_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("odd.raw");
        std::fs::write(&path, vec![0u8; 100]).unwrap();

        assert!(matches!(pixlab_io::read(&path), Err(IoError::MissingData(_))));
        let spec = RawSpec::new(10, 10, RawLayout::Gray);
        assert_eq!(pixlab_io::read_with_raw(&path, Some(spec)).unwrap().dimensions(), (10, 10));
    }

    #[test]
    fn test_raw_to_png_pipeline() {
        let dir = tempdir().unwrap();
        let raw_path = dir.path().join("scan.raw");
        let png_path = dir.path().join("scan.png");
        let image = gradient_rgb(20, 10);
        pixlab_io::write(&raw_path, &image).unwrap();

        let spec: RawSpec = "20x10:rgb".parse().unwrap();
        let loaded = pixlab_io::read_with_raw(&raw_path, Some(spec)).unwrap();
        let processed = equalize(&loaded).unwrap();
        pixlab_io::write(&png_path, &processed).unwrap();

        assert_eq!(pixlab_io::read(&png_path).unwrap(), processed);
    }

    #[test]
    fn test_resize_pipeline() {
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("input.png");
        let output_path = dir.path().join("output.tif");

        pixlab_io::write(&input_path, &gradient_rgb(40, 30)).unwrap();
        let image = pixlab_io::read(&input_path).unwrap();
        let resized = resize(&image, 0.5).unwrap();
        pixlab_io::write(&output_path, &resized).unwrap();

        let loaded = pixlab_io::read(&output_path).unwrap();
        assert_eq!(loaded.dimensions(), (20, 15));
        assert_eq!(loaded.channels(), Channels::Rgb);
    }

    #[test]
    fn test_denoise_then_sharpen_pipeline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.png");

        // Flat field with salt noise on a sparse grid.
        let noisy = Image::from_fn(24, 24, Channels::Rgb, |x, y, _| {
            if x % 6 == 3 && y % 6 == 3 { 255 } else { 90 }
        })
        .unwrap();
        let cfg = FilterConfig::default();
        let clean = median(&noisy, 3, &cfg).unwrap();
        assert!(clean.data().iter().all(|&v| v == 90));

        // Sharpening a flat field changes nothing.
        let sharp = sharpen(&clean, 2, SharpenMode::Hsi, &cfg).unwrap();
        assert_eq!(sharp, clean);

        pixlab_io::write(&path, &sharp).unwrap();
        assert_eq!(pixlab_io::read(&path).unwrap(), sharp);
    }

    #[test]
    fn test_slice_reference_values() {
        let img = Image::from_data(4, 1, Channels::Gray, vec![50, 100, 150, 200]).unwrap();
        assert_eq!(slice(&img, 100, 150, false).unwrap().data(), &[0, 255, 255, 0]);
        assert_eq!(slice(&img, 100, 150, true).unwrap().data(), &[50, 255, 255, 200]);
    }

    #[test]
    fn test_unsupported_output_extension() {
        let dir = tempdir().unwrap();
        let image = gradient_rgb(4, 4);
        let err = pixlab_io::write(dir.path().join("out.bmp"), &image).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}
