//! Color-space decomposition.
//!
//! "HSI" throughout pixlab means the hexcone HSV model with the 8-bit
//! encoding used by OpenCV:
//!
//! | Component | Float range | 8-bit encoding |
//! |---|---|---|
//! | Hue | degrees `[0, 360)` | `round(h / 2) mod 180` (0..=179) |
//! | Saturation | `[0, 1]` | `round(s * 255)` |
//! | Intensity | `[0, 255]` | `max(R, G, B)` |
//!
//! [`hue_mask`] and [`saturation_mask`] compare against these 8-bit values.
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::{Channels, Image};
//! use pixlab_ops::color::{rgb_to_hsi_channel, HsiChannel};
//!
//! let red = Image::from_fn(2, 2, Channels::Rgb, |_, _, c| if c == 0 { 255 } else { 0 }).unwrap();
//! let sat = rgb_to_hsi_channel(&red, HsiChannel::Saturation).unwrap();
//! assert_eq!(sat.sample(0, 0, 0), 255);
//! ```

use pixlab_core::{Channels, Image};
use tracing::trace;

use crate::error::{ensure_channels, ensure_not_empty};
use crate::{OpsError, OpsResult};

/// A color in hexcone HSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Value (intensity), `[0, 255]`.
    pub v: f64,
}

impl Hsv {
    /// 8-bit hue, `0..=179`.
    #[inline]
    pub fn hue_u8(&self) -> u8 {
        ((self.h / 2.0).round() as u32 % 180) as u8
    }

    /// 8-bit saturation.
    #[inline]
    pub fn saturation_u8(&self) -> u8 {
        (self.s * 255.0).round().clamp(0.0, 255.0) as u8
    }

    /// 8-bit intensity.
    #[inline]
    pub fn value_u8(&self) -> u8 {
        self.v.round().clamp(0.0, 255.0) as u8
    }
}

/// Converts one RGB pixel to HSV.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (rf, gf, bf) = (r as f64, g as f64, b as f64);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    if delta == 0.0 {
        return Hsv { h: 0.0, s: 0.0, v: max };
    }

    let s = delta / max;
    let sector = if r >= g && r >= b {
        (gf - bf) / delta
    } else if g >= b {
        2.0 + (bf - rf) / delta
    } else {
        4.0 + (rf - gf) / delta
    };
    let h = (sector * 60.0).rem_euclid(360.0);

    Hsv { h, s, v: max }
}

/// Converts HSV back to RGB, each component in `[0, 255]`.
pub fn hsv_to_rgb(hsv: Hsv) -> [f64; 3] {
    let v = hsv.v.clamp(0.0, 255.0);
    let s = hsv.s.clamp(0.0, 1.0);
    let c = v * s;
    let h = hsv.h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}

/// An RGB image split into three `f64` planes of hue, saturation and value.
#[derive(Debug, Clone)]
pub struct HsvPlanes {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Hue plane, degrees.
    pub h: Vec<f64>,
    /// Saturation plane, `[0, 1]`.
    pub s: Vec<f64>,
    /// Value plane, `[0, 255]`.
    pub v: Vec<f64>,
}

impl HsvPlanes {
    /// Splits an RGB image into HSV planes.
    pub fn from_image(image: &Image) -> OpsResult<Self> {
        ensure_channels("hsv", image, Channels::Rgb)?;
        let n = image.pixel_count();
        let mut planes = Self {
            width: image.width(),
            height: image.height(),
            h: Vec::with_capacity(n),
            s: Vec::with_capacity(n),
            v: Vec::with_capacity(n),
        };
        for px in image.data().chunks_exact(3) {
            let hsv = rgb_to_hsv(px[0], px[1], px[2]);
            planes.h.push(hsv.h);
            planes.s.push(hsv.s);
            planes.v.push(hsv.v);
        }
        Ok(planes)
    }

    /// Returns the HSV triple of pixel `i`.
    #[inline]
    pub fn get(&self, i: usize) -> Hsv {
        Hsv {
            h: self.h[i],
            s: self.s[i],
            v: self.v[i],
        }
    }

    /// Recombines the planes into an RGB image, rounding each component.
    pub fn to_image(&self) -> OpsResult<Image> {
        let mut data = Vec::with_capacity(self.v.len() * 3);
        for i in 0..self.v.len() {
            for c in hsv_to_rgb(self.get(i)) {
                data.push(c.round().clamp(0.0, 255.0) as u8);
            }
        }
        Ok(Image::from_data(self.width, self.height, Channels::Rgb, data)?)
    }
}

/// RGB channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbChannel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
}

impl RgbChannel {
    /// Sample index within an RGB pixel.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// HSI component selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsiChannel {
    /// Hue
    Hue,
    /// Saturation
    Saturation,
    /// Intensity
    Intensity,
}

/// Keeps one RGB channel and zeroes the other two.
///
/// The result is still a 3-channel image, so it displays tinted.
pub fn extract_rgb_channel(image: &Image, channel: RgbChannel) -> OpsResult<Image> {
    ensure_channels("extract_rgb_channel", image, Channels::Rgb)?;
    trace!(?channel, "extract_rgb_channel");
    let keep = channel.index();
    let data = image
        .data()
        .chunks_exact(3)
        .flat_map(|px| {
            let mut out = [0u8; 3];
            out[keep] = px[keep];
            out
        })
        .collect();
    Ok(Image::from_data(image.width(), image.height(), Channels::Rgb, data)?)
}

/// 8-bit encoded HSI component of each pixel, as a gray image.
///
/// Gray input is treated as an RGB image with equal channels.
pub fn rgb_to_hsi_channel(image: &Image, channel: HsiChannel) -> OpsResult<Image> {
    ensure_not_empty("rgb_to_hsi_channel", image)?;
    trace!(?channel, "rgb_to_hsi_channel");
    hsv_map(image, |hsv| match channel {
        HsiChannel::Hue => hsv.hue_u8(),
        HsiChannel::Saturation => hsv.saturation_u8(),
        HsiChannel::Intensity => hsv.value_u8(),
    })
}

fn hsv_map<F>(image: &Image, f: F) -> OpsResult<Image>
where
    F: Fn(Hsv) -> u8,
{
    let data = match image.channels() {
        Channels::Rgb => image
            .data()
            .chunks_exact(3)
            .map(|px| f(rgb_to_hsv(px[0], px[1], px[2])))
            .collect(),
        Channels::Gray => image.data().iter().map(|&v| f(rgb_to_hsv(v, v, v))).collect(),
    };
    Ok(Image::from_data(image.width(), image.height(), Channels::Gray, data)?)
}

/// `255 - x` for every sample.
pub fn complement(image: &Image) -> OpsResult<Image> {
    ensure_not_empty("complement", image)?;
    Ok(image.map_samples(|v| 255 - v))
}

/// 255 where the 8-bit hue lies in `[lower, upper]`, else 0.
///
/// Hue is circular: `lower > upper` selects `h >= lower || h <= upper`,
/// e.g. `(170, 10)` picks reds on both sides of 0.
pub fn hue_mask(image: &Image, lower: u8, upper: u8) -> OpsResult<Image> {
    ensure_not_empty("hue_mask", image)?;
    trace!(lower, upper, "hue_mask");
    let wraps = lower > upper;
    hsv_map(image, |hsv| {
        let h = hsv.hue_u8();
        let hit = if wraps {
            h >= lower || h <= upper
        } else {
            (lower..=upper).contains(&h)
        };
        if hit { 255 } else { 0 }
    })
}

/// 255 where the 8-bit saturation lies in `[lower, upper]`, else 0.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `lower > upper`.
pub fn saturation_mask(image: &Image, lower: u8, upper: u8) -> OpsResult<Image> {
    if lower > upper {
        return Err(OpsError::InvalidParameter(format!(
            "saturation_mask: lower {} > upper {}",
            lower, upper
        )));
    }
    ensure_not_empty("saturation_mask", image)?;
    trace!(lower, upper, "saturation_mask");
    hsv_map(image, |hsv| {
        if (lower..=upper).contains(&hsv.saturation_u8()) { 255 } else { 0 }
    })
}
