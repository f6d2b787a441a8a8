//! Geometric transforms with bilinear resampling.
//!
//! - [`resize`] / [`resize_to`] - Scale, edge samples clamped
//! - [`rotate`] - Counter-clockwise rotation about the center on the same
//!   canvas; area uncovered by the source is black
//!
//! Both map each output pixel center back into the source and blend the
//! four nearest samples.
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::{Channels, Image};
//! use pixlab_ops::geometry::{resize, rotate};
//!
//! let img = Image::filled(64, 48, Channels::Rgb, 200).unwrap();
//! let half = resize(&img, 0.5).unwrap();
//! assert_eq!(half.dimensions(), (32, 24));
//!
//! let turned = rotate(&img, 30.0).unwrap();
//! assert_eq!(turned.dimensions(), (64, 48));
//! ```

use pixlab_core::Image;
use tracing::trace;

use crate::error::ensure_not_empty;
use crate::parallel::collect_rows;
use crate::{OpsError, OpsResult};

/// What a bilinear tap outside the source reads.
#[derive(Clone, Copy)]
enum Edge {
    /// Nearest edge sample.
    Clamp,
    /// Zero.
    Background,
}

/// Bilinear sample of channel `c` at continuous source position (sx, sy),
/// where integer coordinates are pixel centers.
#[inline]
fn sample_bilinear(image: &Image, sx: f64, sy: f64, c: usize, edge: Edge) -> f64 {
    let (w, h) = (image.width() as i64, image.height() as i64);
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let tap = |x: i64, y: i64| -> f64 {
        match edge {
            Edge::Clamp => image.sample(x.clamp(0, w - 1) as u32, y.clamp(0, h - 1) as u32, c) as f64,
            Edge::Background => {
                if x < 0 || y < 0 || x >= w || y >= h {
                    0.0
                } else {
                    image.sample(x as u32, y as u32, c) as f64
                }
            }
        }
    };

    let top = tap(x0, y0) * (1.0 - fx) + tap(x0 + 1, y0) * fx;
    let bot = tap(x0, y0 + 1) * (1.0 - fx) + tap(x0 + 1, y0 + 1) * fx;
    top * (1.0 - fy) + bot * fy
}

/// Fills a `width` x `height` image from a per-pixel source coordinate map.
fn remap<F>(image: &Image, width: u32, height: u32, edge: Edge, coord: F) -> OpsResult<Image>
where
    F: Fn(u32, u32) -> (f64, f64) + Sync + Send,
{
    let ch = image.channel_count();
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(ch))
        .ok_or_else(|| {
            OpsError::InvalidDimensions(format!(
                "{}x{} {} output overflows the address space",
                width,
                height,
                image.channels()
            ))
        })?;
    let data = collect_rows(len, width as usize * ch, true, |y, row| {
        for x in 0..width {
            let (sx, sy) = coord(x, y as u32);
            for c in 0..ch {
                let v = sample_bilinear(image, sx, sy, c, edge);
                row[x as usize * ch + c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    });
    Ok(Image::from_data(width, height, image.channels(), data)?)
}

/// Scales by `scale` in both directions.
///
/// The output is `floor(width * scale)` x `floor(height * scale)`.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] if `scale` is not finite or not positive
/// - [`OpsError::InvalidDimensions`] if an output dimension rounds down to zero,
///   does not fit in `u32`, or the output buffer size overflows `usize`
pub fn resize(image: &Image, scale: f64) -> OpsResult<Image> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "scale must be finite and > 0, got {}",
            scale
        )));
    }
    let target = |n: u32| -> OpsResult<u32> {
        let v = (n as f64 * scale).floor();
        if v < 1.0 || v > u32::MAX as f64 {
            return Err(OpsError::InvalidDimensions(format!(
                "scaling {} by {} gives {}",
                n, scale, v
            )));
        }
        Ok(v as u32)
    };
    ensure_not_empty("resize", image)?;
    let (w, h) = (target(image.width())?, target(image.height())?);
    resize_to(image, w, h)
}

/// Bilinear resize to explicit dimensions.
///
/// Output pixel centers map back with `(x + 0.5) * src / dst - 0.5`.
pub fn resize_to(image: &Image, width: u32, height: u32) -> OpsResult<Image> {
    ensure_not_empty("resize", image)?;
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "target size {}x{} is empty",
            width, height
        )));
    }
    trace!(
        src_w = image.width(),
        src_h = image.height(),
        dst_w = width,
        dst_h = height,
        "resize"
    );

    let sx_scale = image.width() as f64 / width as f64;
    let sy_scale = image.height() as f64 / height as f64;
    remap(image, width, height, Edge::Clamp, |x, y| {
        (
            (x as f64 + 0.5) * sx_scale - 0.5,
            (y as f64 + 0.5) * sy_scale - 0.5,
        )
    })
}

/// Rotates counter-clockwise by `angle_degrees` about the image center.
///
/// The canvas keeps its size; corners rotated out are lost and uncovered
/// area is black.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if the angle is not finite.
pub fn rotate(image: &Image, angle_degrees: f64) -> OpsResult<Image> {
    ensure_not_empty("rotate", image)?;
    if !angle_degrees.is_finite() {
        return Err(OpsError::InvalidParameter(format!(
            "rotation angle must be finite, got {}",
            angle_degrees
        )));
    }
    trace!(angle_degrees, width = image.width(), height = image.height(), "rotate");

    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let cx = image.width() as f64 / 2.0;
    let cy = image.height() as f64 / 2.0;
    remap(image, image.width(), image.height(), Edge::Background, |x, y| {
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        let u = dx * cos - dy * sin;
        let v = dx * sin + dy * cos;
        (u + cx - 0.5, v + cy - 0.5)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixlab_core::Channels;

    fn pattern(w: u32, h: u32, channels: Channels) -> Image {
        Image::from_fn(w, h, channels, |x, y, c| ((x * 29 + y * 53 + c as u32 * 7) % 256) as u8).unwrap()
    }

    #[test]
    fn test_resize_dimensions_floor() {
        let img = pattern(10, 7, Channels::Gray);
        assert_eq!(resize(&img, 0.5).unwrap().dimensions(), (5, 3));
        assert_eq!(resize(&img, 1.25).unwrap().dimensions(), (12, 8));
    }

    #[test]
    fn test_resize_output_size_overflow() {
        let img = pattern(2, 2, Channels::Rgb);
        // Each axis fits in u32, the sample count does not fit in usize.
        let err = resize(&img, 2.1e9).unwrap_err();
        assert!(matches!(err, OpsError::InvalidDimensions(_)), "{err}");
        assert!(matches!(
            resize_to(&img, u32::MAX, u32::MAX),
            Err(OpsError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_resize_reciprocal_within_one() {
        for (w, h, s) in [(10, 7, 0.5), (33, 17, 3.0), (21, 14, 2.0)] {
            let img = pattern(w, h, Channels::Rgb);
            let back = resize(&resize(&img, s).unwrap(), 1.0 / s).unwrap();
            assert!((back.width() as i64 - w as i64).abs() <= 1, "{} {}", w, s);
            assert!((back.height() as i64 - h as i64).abs() <= 1, "{} {}", h, s);
        }
    }

    #[test]
    fn test_resize_identity_and_uniform() {
        let img = pattern(9, 6, Channels::Rgb);
        assert_eq!(resize(&img, 1.0).unwrap(), img);

        let flat = Image::filled(7, 5, Channels::Gray, 42).unwrap();
        let up = resize(&flat, 2.7).unwrap();
        assert!(up.data().iter().all(|&v| v == 42));
    }

    #[test]
    fn test_resize_upscale_interpolates() {
        let img = Image::from_data(2, 1, Channels::Gray, vec![0, 100]).unwrap();
        let out = resize_to(&img, 4, 1).unwrap();
        // Centers map to -0.25, 0.25, 0.75, 1.25.
        assert_eq!(out.data(), &[0, 25, 75, 100]);
    }

    #[test]
    fn test_resize_invalid() {
        let img = pattern(4, 4, Channels::Gray);
        for s in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(resize(&img, s), Err(OpsError::InvalidParameter(_))));
        }
        assert!(matches!(resize(&img, 0.1), Err(OpsError::InvalidDimensions(_))));
        assert!(matches!(resize_to(&img, 0, 3), Err(OpsError::InvalidDimensions(_))));
    }

    #[test]
    fn test_rotate_full_turn() {
        let img = pattern(12, 9, Channels::Rgb);
        for angle in [0.0, 360.0, -360.0] {
            let out = rotate(&img, angle).unwrap();
            for (a, b) in out.data().iter().zip(img.data()) {
                assert!((*a as i32 - *b as i32).abs() <= 1, "angle {}", angle);
            }
        }
    }

    #[test]
    fn test_rotate_quarter_is_ccw() {
        let img = pattern(4, 4, Channels::Gray);
        let out = rotate(&img, 90.0).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.sample(x, y, 0), img.sample(3 - y, x, 0));
            }
        }
    }

    #[test]
    fn test_rotate_background_black() {
        let img = Image::filled(10, 4, Channels::Gray, 200).unwrap();
        let out = rotate(&img, 90.0).unwrap();
        // The rotated strip is 4 wide and centered; the outer columns are empty.
        assert_eq!(out.sample(0, 0, 0), 0);
        assert_eq!(out.sample(5, 2, 0), 200);
    }
}
