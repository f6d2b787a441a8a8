//! Point intensity transforms.
//!
//! Each output sample depends only on the input sample at the same position
//! (plus, for [`equalize`] and the normalized curves of
//! [`adjust_brightness`], statistics of the whole buffer).
//!
//! - [`adjust_brightness`] - Linear, exponential or logarithmic curve
//! - [`slice`] - Gray-level slicing
//! - [`equalize`] / [`histogram`] - Per-channel histogram equalization
//! - [`bit_plane`] - Single bit-plane extraction

use pixlab_core::{Channels, FloatImage, Image};
use tracing::{debug, trace};

use crate::error::{ensure_channels, ensure_not_empty};
use crate::{OpsError, OpsResult};

/// Shape of the brightness curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrightnessMode {
    /// `a * x + b`, clamped.
    #[default]
    Linear,
    /// `exp(a * x / 255 + b)`, min-max normalized.
    Exponential,
    /// `ln(a * x / 255 + b)`, min-max normalized. Requires `b > 1`.
    Logarithmic,
}

/// Sample value used when a normalized curve comes out flat.
const FLAT_GRAY: u8 = 128;

/// Applies a brightness/contrast curve.
///
/// - `Linear`: `y = a*x + b`, clamped to [0, 255] and truncated. `a = 1, b = 0`
///   returns the input unchanged.
/// - `Exponential` / `Logarithmic`: evaluated on `x / 255`, then the whole
///   buffer (all channels together) is min-max stretched to [0, 255]. A
///   constant result becomes uniform mid-gray.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] if `a` or `b` is not finite
/// - [`OpsError::InvalidParameter`] for `Logarithmic` with `b <= 1`
/// - [`OpsError::InvalidParameter`] if the curve produces NaN or infinity
///   (e.g. a negative log argument)
///
/// # Example
///
/// ```rust
/// use pixlab_core::{Channels, Image};
/// use pixlab_ops::intensity::{adjust_brightness, BrightnessMode};
///
/// let img = Image::from_fn(4, 1, Channels::Gray, |x, _, _| (x * 80) as u8).unwrap();
/// let out = adjust_brightness(&img, 2.0, 10.0, BrightnessMode::Linear).unwrap();
/// assert_eq!(out.data(), &[10, 170, 255, 255]);
/// ```
pub fn adjust_brightness(image: &Image, a: f64, b: f64, mode: BrightnessMode) -> OpsResult<Image> {
    ensure_not_empty("adjust_brightness", image)?;
    if !a.is_finite() || !b.is_finite() {
        return Err(OpsError::InvalidParameter(format!(
            "brightness coefficients must be finite, got a={} b={}",
            a, b
        )));
    }
    trace!(a, b, ?mode, width = image.width(), height = image.height(), "adjust_brightness");

    let src = FloatImage::from_image(image);
    match mode {
        BrightnessMode::Linear => Ok(src.map(|x| a * x + b).clip_to_u8()),
        BrightnessMode::Exponential => normalized(src.map(|x| (a * x / 255.0 + b).exp()), mode),
        BrightnessMode::Logarithmic => {
            if b <= 1.0 {
                return Err(OpsError::InvalidParameter(format!(
                    "logarithmic brightness requires b > 1, got {}",
                    b
                )));
            }
            normalized(src.map(|x| (a * x / 255.0 + b).ln()), mode)
        }
    }
}

fn normalized(curve: FloatImage, mode: BrightnessMode) -> OpsResult<Image> {
    if !curve.is_finite() {
        return Err(OpsError::InvalidParameter(format!(
            "{:?} curve is undefined for these coefficients",
            mode
        )));
    }
    if let Some((lo, hi)) = curve.min_max() {
        if hi <= lo {
            debug!(?mode, value = lo, "Flat brightness curve, returning mid-gray");
        }
    }
    Ok(curve.normalize_to_u8(FLAT_GRAY))
}

/// Gray-level slicing.
///
/// Samples in `[min_gray, max_gray]` become 255. Others keep their value when
/// `preserve_original` is set, otherwise they become 0. RGB images are
/// sliced per sample.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `min_gray > max_gray`.
pub fn slice(image: &Image, min_gray: u8, max_gray: u8, preserve_original: bool) -> OpsResult<Image> {
    if min_gray > max_gray {
        return Err(OpsError::InvalidParameter(format!(
            "slice range is empty: min {} > max {}",
            min_gray, max_gray
        )));
    }
    ensure_not_empty("slice", image)?;
    trace!(min_gray, max_gray, preserve_original, "slice");

    Ok(image.map_samples(|v| {
        if (min_gray..=max_gray).contains(&v) {
            255
        } else if preserve_original {
            v
        } else {
            0
        }
    }))
}

/// 256-bin histogram of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Sample count per level.
    pub bins: [u64; 256],
}

impl Histogram {
    /// Counts the samples of one channel.
    pub fn of_channel(image: &Image, channel: usize) -> Self {
        let n = image.channel_count();
        let mut bins = [0u64; 256];
        for &v in image.data().iter().skip(channel).step_by(n) {
            bins[v as usize] += 1;
        }
        Self { bins }
    }

    /// Total number of samples.
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Inclusive running sum of the bins.
    pub fn cumulative(&self) -> [u64; 256] {
        let mut cdf = [0u64; 256];
        let mut acc = 0;
        for (dst, &count) in cdf.iter_mut().zip(&self.bins) {
            acc += count;
            *dst = acc;
        }
        cdf
    }

    /// Lowest and highest occupied level.
    pub fn range(&self) -> Option<(u8, u8)> {
        let lo = self.bins.iter().position(|&c| c > 0)?;
        let hi = self.bins.iter().rposition(|&c| c > 0)?;
        Some((lo as u8, hi as u8))
    }

    /// Most frequent level (lowest on ties).
    pub fn mode(&self) -> Option<u8> {
        let mut best: Option<(usize, u64)> = None;
        for (level, &count) in self.bins.iter().enumerate() {
            if count > 0 && best.is_none_or(|(_, c)| count > c) {
                best = Some((level, count));
            }
        }
        best.map(|(level, _)| level as u8)
    }

    /// Mean level.
    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let sum: f64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(level, &count)| level as f64 * count as f64)
            .sum();
        Some(sum / total as f64)
    }
}

/// One histogram per channel, in channel order.
pub fn histogram(image: &Image) -> Vec<Histogram> {
    (0..image.channel_count())
        .map(|c| Histogram::of_channel(image, c))
        .collect()
}

/// Per-channel histogram equalization.
///
/// Each level maps to `round(255 * CDF(level) / total)`. RGB channels are
/// equalized independently, so hues can shift.
pub fn equalize(image: &Image) -> OpsResult<Image> {
    ensure_not_empty("equalize", image)?;
    trace!(channels = image.channel_count(), "equalize");

    let luts: Vec<[u8; 256]> = histogram(image)
        .iter()
        .map(|hist| {
            let total = hist.total() as f64;
            let cdf = hist.cumulative();
            let mut lut = [0u8; 256];
            for (dst, &c) in lut.iter_mut().zip(&cdf) {
                *dst = (255.0 * c as f64 / total).round() as u8;
            }
            lut
        })
        .collect();

    let n = image.channel_count();
    let data = image
        .data()
        .iter()
        .enumerate()
        .map(|(i, &v)| luts[i % n][v as usize])
        .collect();
    Ok(Image::from_data(image.width(), image.height(), image.channels(), data)?)
}

/// Extracts bit `plane` (0 = least significant) as a 0/255 image.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] if `plane > 7`
/// - [`OpsError::ChannelMismatch`] for non-gray input
pub fn bit_plane(image: &Image, plane: u8) -> OpsResult<Image> {
    if plane > 7 {
        return Err(OpsError::InvalidParameter(format!(
            "bit plane must be in 0..=7, got {}",
            plane
        )));
    }
    ensure_channels("bit_plane", image, Channels::Gray)?;
    Ok(image.map_samples(|v| ((v >> plane) & 1) * 255))
}
