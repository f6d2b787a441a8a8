//! Frequency-domain operations on gray images.
//!
//! The 2D transform is computed as row FFTs followed by column FFTs with a
//! single [`FftPlanner`]. Inverse transforms are scaled by `1 / (w * h)`, so a
//! forward/inverse pair is the identity.
//!
//! # Operations
//!
//! - [`forward_fft`] / [`inverse_fft`] - Center-shifted spectrum and back
//! - [`magnitude_spectrum`] - `ln(|F| + 1)` stretched to [0, 255]
//! - [`inverse_fft_magnitude_only`] / [`inverse_fft_phase_only`] - Reconstruction
//!   from one half of the polar representation
//! - [`checkerboard`], [`dft`], [`conjugate`], [`inverse_dft`] - Composable steps
//!   of the classic `(-1)^(x+y)` centering pipeline
//! - [`fft_shift`] / [`ifft_shift`] - Quadrant swaps, correct for odd sizes
//!
//! Every image entry point accepts single-channel input only.
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::{Channels, Image};
//! use pixlab_ops::fft::{forward_fft, inverse_fft};
//!
//! let img = Image::from_fn(8, 8, Channels::Gray, |x, y, _| (x * 30 + y) as u8).unwrap();
//! let spectrum = forward_fft(&img).unwrap();
//! let back = inverse_fft(&spectrum).unwrap().round_to_u8();
//! assert_eq!(back, img);
//! ```

use pixlab_core::{Channels, FloatImage, Image};
use rustfft::FftPlanner;
use tracing::{debug, trace};

use crate::error::ensure_channels;
use crate::{OpsError, OpsResult};

pub use rustfft::num_complex::Complex;

/// 2D grid of complex frequency coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    width: u32,
    height: u32,
    data: Vec<Complex<f64>>,
    centered: bool,
}

impl Spectrum {
    /// Wraps coefficient data.
    ///
    /// `centered` records whether the zero frequency sits at
    /// `(width / 2, height / 2)` rather than at the origin.
    pub fn new(width: u32, height: u32, data: Vec<Complex<f64>>, centered: bool) -> OpsResult<Self> {
        if data.len() != width as usize * height as usize {
            return Err(OpsError::InvalidDimensions(format!(
                "spectrum holds {} coefficients, expected {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            centered,
        })
    }

    /// Width in coefficients.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in coefficients.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the zero frequency has been shifted to the center.
    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Coefficient at (u, v) in storage order.
    pub fn get(&self, u: u32, v: u32) -> Complex<f64> {
        self.data[v as usize * self.width as usize + u as usize]
    }

    /// All coefficients, row-major.
    pub fn data(&self) -> &[Complex<f64>] {
        &self.data
    }

    /// Returns the same spectrum with the zero frequency at the origin.
    pub fn uncentered(&self) -> Self {
        if !self.centered {
            return self.clone();
        }
        Self {
            width: self.width,
            height: self.height,
            data: ifft_shift(&self.data, self.width as usize, self.height as usize),
            centered: false,
        }
    }

    fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Complex<f64>) -> Complex<f64>,
    {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&c| f(c)).collect(),
            centered: self.centered,
        }
    }
}

/// In-place 2D FFT. The inverse is normalized by `1 / (w * h)`.
fn fft2d(data: &mut [Complex<f64>], width: usize, height: usize, inverse: bool) {
    if width == 0 || height == 0 {
        return;
    }
    let mut planner = FftPlanner::<f64>::new();
    let (row_fft, col_fft) = if inverse {
        (planner.plan_fft_inverse(width), planner.plan_fft_inverse(height))
    } else {
        (planner.plan_fft_forward(width), planner.plan_fft_forward(height))
    };

    for row in data.chunks_exact_mut(width) {
        row_fft.process(row);
    }

    let mut col_buf = vec![Complex::new(0.0, 0.0); height];
    for x in 0..width {
        for y in 0..height {
            col_buf[y] = data[y * width + x];
        }
        col_fft.process(&mut col_buf);
        for y in 0..height {
            data[y * width + x] = col_buf[y];
        }
    }

    if inverse {
        let scale = 1.0 / (width * height) as f64;
        for c in data.iter_mut() {
            *c *= scale;
        }
    }
}

fn roll<T: Copy>(data: &[T], width: usize, height: usize, sx: usize, sy: usize) -> Vec<T> {
    let mut out = data.to_vec();
    for y in 0..height {
        let dy = (y + sy) % height;
        for x in 0..width {
            out[dy * width + (x + sx) % width] = data[y * width + x];
        }
    }
    out
}

/// Moves the zero frequency from the origin to `(width / 2, height / 2)`.
pub fn fft_shift<T: Copy>(data: &[T], width: usize, height: usize) -> Vec<T> {
    roll(data, width, height, width / 2, height / 2)
}

/// Inverse of [`fft_shift`]; differs from it when a dimension is odd.
pub fn ifft_shift<T: Copy>(data: &[T], width: usize, height: usize) -> Vec<T> {
    roll(data, width, height, width - width / 2, height - height / 2)
}

fn ensure_gray_float(op: &'static str, image: &FloatImage) -> OpsResult<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(OpsError::EmptyImage(op));
    }
    if image.channels() != Channels::Gray {
        return Err(OpsError::ChannelMismatch {
            op,
            expected: Channels::Gray,
            actual: image.channels(),
        });
    }
    Ok(())
}

fn inverse_complex(spectrum: &Spectrum) -> Vec<Complex<f64>> {
    let mut data = spectrum.uncentered().data;
    fft2d(&mut data, spectrum.width as usize, spectrum.height as usize, true);
    data
}

fn float_from(width: u32, height: u32, data: Vec<f64>) -> OpsResult<FloatImage> {
    Ok(FloatImage::from_data(width, height, Channels::Gray, data)?)
}

/// Unshifted 2D DFT of a gray float image.
pub fn dft(image: &FloatImage) -> OpsResult<Spectrum> {
    ensure_gray_float("dft", image)?;
    let (w, h) = (image.width() as usize, image.height() as usize);
    trace!(width = w, height = h, "dft");

    let mut data: Vec<Complex<f64>> = image.data().iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft2d(&mut data, w, h, false);
    Spectrum::new(image.width(), image.height(), data, false)
}

/// Real part of the inverse DFT of the stored grid, taken as-is.
///
/// Unlike [`inverse_fft`], a centered spectrum is not shifted back first.
pub fn inverse_dft(spectrum: &Spectrum) -> OpsResult<FloatImage> {
    let mut data = spectrum.data.clone();
    fft2d(&mut data, spectrum.width as usize, spectrum.height as usize, true);
    float_from(spectrum.width, spectrum.height, data.iter().map(|c| c.re).collect())
}

/// Center-shifted 2D DFT of a gray image.
pub fn forward_fft(image: &Image) -> OpsResult<Spectrum> {
    ensure_channels("forward_fft", image, Channels::Gray)?;
    let unshifted = dft(&FloatImage::from_image(image))?;
    let (w, h) = (image.width() as usize, image.height() as usize);
    Spectrum::new(image.width(), image.height(), fft_shift(&unshifted.data, w, h), true)
}

/// Real part of the inverse transform, un-shifting first when needed.
pub fn inverse_fft(spectrum: &Spectrum) -> OpsResult<FloatImage> {
    inverse_dft(&spectrum.uncentered())
}

/// Log-magnitude `ln(|F| + 1)`, min-max stretched to [0, 255].
///
/// A flat spectrum (e.g. of an all-zero image) maps to all zeros.
pub fn magnitude_spectrum(spectrum: &Spectrum) -> OpsResult<Image> {
    let logmag = spectrum.data.iter().map(|c| (c.norm() + 1.0).ln()).collect();
    let img = float_from(spectrum.width, spectrum.height, logmag)?;
    Ok(normalize_or_zero(&img, "magnitude spectrum"))
}

fn normalize_or_zero(img: &FloatImage, what: &'static str) -> Image {
    if let Some((lo, hi)) = img.min_max() {
        if hi <= lo {
            debug!(what, value = lo, "Flat buffer, normalizing to zero");
        }
    }
    img.normalize_to_u8(0)
}

/// Inverse of the spectrum with every phase set to zero, `|.|`, clipped.
pub fn inverse_fft_magnitude_only(image: &Image) -> OpsResult<Image> {
    let spectrum = forward_fft(image)?;
    let magnitude_only = spectrum.map(|c| Complex::new(c.norm(), 0.0));
    let recon: Vec<f64> = inverse_complex(&magnitude_only).iter().map(|c| c.norm()).collect();
    Ok(float_from(image.width(), image.height(), recon)?.clip_to_u8())
}

/// Relative magnitude below which a coefficient counts as zero.
const PHASE_ZERO_EPS: f64 = 1e-9;

/// Inverse of the spectrum with every magnitude set to one, `|.|`,
/// min-max stretched. A flat reconstruction maps to all zeros.
///
/// Zero coefficients take phase 0 and become `1`, so a constant image
/// reconstructs to a single bright pixel at the origin.
pub fn inverse_fft_phase_only(image: &Image) -> OpsResult<Image> {
    let spectrum = forward_fft(image)?;
    let peak = spectrum.data.iter().map(|c| c.norm()).fold(0.0, f64::max);
    let floor = peak * PHASE_ZERO_EPS;
    // Rounding residue has no meaningful angle.
    let phase_only = spectrum.map(|c| {
        if c.norm() <= floor {
            Complex::new(1.0, 0.0)
        } else {
            Complex::from_polar(1.0, c.arg())
        }
    });
    let recon: Vec<f64> = inverse_complex(&phase_only).iter().map(|c| c.norm()).collect();
    let img = float_from(image.width(), image.height(), recon)?;
    Ok(normalize_or_zero(&img, "phase-only reconstruction"))
}

/// Multiplies sample `(x, y)` by `(-1)^(x + y)`.
pub fn checkerboard(image: &FloatImage) -> FloatImage {
    let (w, n) = (image.width() as usize, image.channels().count());
    let mut out = image.clone();
    for (i, v) in out.data_mut().iter_mut().enumerate() {
        let pixel = i / n;
        if (pixel % w + pixel / w) % 2 == 1 {
            *v = -*v;
        }
    }
    out
}

/// Complex conjugate of every coefficient.
pub fn conjugate(spectrum: &Spectrum) -> Spectrum {
    spectrum.map(|c| c.conj())
}

/// Checkerboard, DFT, conjugate, inverse DFT, checkerboard.
///
/// For even dimensions the result is the point reflection
/// `f(-x mod W, -y mod H)`.
pub fn checkerboard_round_trip(image: &Image) -> OpsResult<Image> {
    ensure_channels("checkerboard_round_trip", image, Channels::Gray)?;
    if image.width() % 2 == 1 || image.height() % 2 == 1 {
        debug!(
            width = image.width(),
            height = image.height(),
            "Odd dimensions: checkerboard round trip is not an exact reflection"
        );
    }
    let centered = checkerboard(&FloatImage::from_image(image));
    let spectrum = conjugate(&dft(&centered)?);
    let back = checkerboard(&inverse_dft(&spectrum)?);
    Ok(back.round_to_u8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pattern(w: u32, h: u32) -> Image {
        Image::from_fn(w, h, Channels::Gray, |x, y, _| ((x * 37 + y * 91 + x * y) % 256) as u8).unwrap()
    }

    #[test]
    fn test_round_trip() {
        for (w, h) in [(8, 8), (12, 6), (7, 5)] {
            let img = pattern(w, h);
            let back = inverse_fft(&forward_fft(&img).unwrap()).unwrap();
            for (a, b) in back.data().iter().zip(img.data()) {
                assert_abs_diff_eq!(*a, *b as f64, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_dc_is_centered() {
        let img = Image::filled(6, 4, Channels::Gray, 10).unwrap();
        let spectrum = forward_fft(&img).unwrap();
        assert!(spectrum.is_centered());
        assert_abs_diff_eq!(spectrum.get(3, 2).re, 240.0, epsilon = 1e-9);
        assert_abs_diff_eq!(spectrum.get(0, 0).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shift_odd_sizes() {
        let data: Vec<u32> = (0..15).collect();
        let shifted = fft_shift(&data, 5, 3);
        // Origin moves to (2, 1).
        assert_eq!(shifted[5 + 2], 0);
        assert_eq!(ifft_shift(&shifted, 5, 3), data);
        assert_ne!(fft_shift(&shifted, 5, 3), data);
    }

    #[test]
    fn test_checkerboard_matches_shifted_fft() {
        let img = pattern(8, 6);
        let shifted = forward_fft(&img).unwrap();
        let via_checker = dft(&checkerboard(&FloatImage::from_image(&img))).unwrap();
        for (a, b) in via_checker.data().iter().zip(shifted.data()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-6);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_checkerboard_round_trip_reflects() {
        let (w, h) = (8, 6);
        let img = pattern(w, h);
        let out = checkerboard_round_trip(&img).unwrap();
        for y in 0..h {
            for x in 0..w {
                let sx = (w - x) % w;
                let sy = (h - y) % h;
                assert_eq!(out.sample(x, y, 0), img.sample(sx, sy, 0));
            }
        }
    }

    #[test]
    fn test_zero_image() {
        let img = Image::new(8, 8, Channels::Gray).unwrap();
        let spectrum = forward_fft(&img).unwrap();
        assert!(spectrum.data().iter().all(|c| c.norm() == 0.0));
        assert!(magnitude_spectrum(&spectrum).unwrap().data().iter().all(|&v| v == 0));
        assert!(inverse_fft_magnitude_only(&img).unwrap().data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_phase_only_constant_image_is_delta() {
        for value in [0u8, 10, 128] {
            let img = Image::filled(4, 4, Channels::Gray, value).unwrap();
            let out = inverse_fft_phase_only(&img).unwrap();
            let mut expected = vec![0u8; 16];
            expected[0] = 255;
            assert_eq!(out.data(), &expected[..], "value {value}");
        }
    }

    #[test]
    fn test_magnitude_spectrum_peak_at_center() {
        let img = pattern(16, 16);
        let mag = magnitude_spectrum(&forward_fft(&img).unwrap()).unwrap();
        assert_eq!(mag.sample(8, 8, 0), 255);
    }

    #[test]
    fn test_phase_only_keeps_edges() {
        let img = Image::from_fn(16, 16, Channels::Gray, |x, _, _| if x < 8 { 0 } else { 200 }).unwrap();
        let out = inverse_fft_phase_only(&img).unwrap();
        assert_eq!(out.dimensions(), (16, 16));
        assert_eq!(out.data().iter().copied().max(), Some(255));
    }

    #[test]
    fn test_gray_only() {
        let rgb = Image::new(4, 4, Channels::Rgb).unwrap();
        assert!(matches!(forward_fft(&rgb), Err(OpsError::ChannelMismatch { .. })));
        assert!(matches!(inverse_fft_phase_only(&rgb), Err(OpsError::ChannelMismatch { .. })));
        let frgb = FloatImage::from_image(&rgb);
        assert!(matches!(dft(&frgb), Err(OpsError::ChannelMismatch { .. })));
    }

    #[test]
    fn test_conjugate_negates_imaginary() {
        let spectrum = forward_fft(&pattern(4, 4)).unwrap();
        let conj = conjugate(&spectrum);
        for (a, b) in conj.data().iter().zip(spectrum.data()) {
            assert_eq!(a.re, b.re);
            assert_eq!(a.im, -b.im);
        }
    }
}
