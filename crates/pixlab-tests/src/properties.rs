//! Algebraic properties of the operations.

use approx::assert_abs_diff_eq;
use pixlab_core::{Channels, FloatImage, Image};
use pixlab_ops::color::{
    complement, extract_rgb_channel, hsv_to_rgb, hue_mask, rgb_to_hsv, RgbChannel,
};
use pixlab_ops::fft::{checkerboard, checkerboard_round_trip, dft, forward_fft, inverse_fft};
use pixlab_ops::filter::{average, convolve_with, Border, FilterConfig, Kernel};
use pixlab_ops::geometry::{resize, rotate};
use pixlab_ops::intensity::{adjust_brightness, bit_plane, equalize, BrightnessMode};

fn texture(w: u32, h: u32, channels: Channels) -> Image {
    Image::from_fn(w, h, channels, |x, y, c| {
        ((x * 13 + y * 29 + x * y * 3 + c as u32 * 71) % 256) as u8
    })
    .unwrap()
}

#[test]
fn brightness_curves_span_full_range() {
    let img = texture(16, 12, Channels::Gray);
    for (mode, a, b) in [
        (BrightnessMode::Exponential, 2.0, 0.5),
        (BrightnessMode::Logarithmic, 3.0, 1.5),
    ] {
        let out = adjust_brightness(&img, a, b, mode).unwrap();
        assert_eq!(out.data().iter().min(), Some(&0), "{mode:?}");
        assert_eq!(out.data().iter().max(), Some(&255), "{mode:?}");
    }
}

#[test]
fn linear_identity() {
    let img = texture(9, 7, Channels::Rgb);
    assert_eq!(adjust_brightness(&img, 1.0, 0.0, BrightnessMode::Linear).unwrap(), img);
}

#[test]
fn constant_exponential_is_mid_gray() {
    for value in [128u8, 77, 0, 255] {
        let img = Image::filled(4, 4, Channels::Gray, value).unwrap();
        let out = adjust_brightness(&img, 1.0, 0.0, BrightnessMode::Exponential).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.data().iter().all(|&v| v == 128), "value {value}");
    }
}

#[test]
fn resize_reciprocal_dimensions() {
    for (w, h, s) in [(40, 30, 0.5), (17, 11, 4.0), (50, 20, 0.2)] {
        let img = texture(w, h, Channels::Gray);
        let back = resize(&resize(&img, s).unwrap(), 1.0 / s).unwrap();
        assert!((back.width() as i64 - w as i64).abs() <= 1, "{w}x{h} by {s}");
        assert!((back.height() as i64 - h as i64).abs() <= 1, "{w}x{h} by {s}");
    }
}

#[test]
fn full_turn_is_identity() {
    let img = texture(15, 10, Channels::Rgb);
    let out = rotate(&img, 360.0).unwrap();
    for (&a, &b) in out.data().iter().zip(img.data()) {
        assert!((a as i32 - b as i32).abs() <= 1);
    }
}

#[test]
fn equalize_is_idempotent() {
    let img = texture(20, 20, Channels::Rgb);
    let once = equalize(&img).unwrap();
    assert_eq!(equalize(&once).unwrap(), once);
}

#[test]
fn bit_planes_are_binary_and_recompose() {
    let img = texture(12, 12, Channels::Gray);
    let mut sum = vec![0u32; img.data().len()];
    for plane in 0..8u8 {
        let bits = bit_plane(&img, plane).unwrap();
        assert!(bits.data().iter().all(|&v| v == 0 || v == 255));
        for (acc, &v) in sum.iter_mut().zip(bits.data()) {
            *acc += (v as u32 / 255) << plane;
        }
    }
    let original: Vec<u32> = img.data().iter().map(|&v| v as u32).collect();
    assert_eq!(sum, original);
}

#[test]
fn complement_is_involution() {
    let img = texture(10, 6, Channels::Rgb);
    assert_eq!(complement(&complement(&img).unwrap()).unwrap(), img);
}

#[test]
fn rgb_channels_partition_the_image() {
    let img = texture(8, 5, Channels::Rgb);
    let parts: Vec<Image> = [RgbChannel::Red, RgbChannel::Green, RgbChannel::Blue]
        .into_iter()
        .map(|c| extract_rgb_channel(&img, c).unwrap())
        .collect();
    for i in 0..img.data().len() {
        let total: u32 = parts.iter().map(|p| p.data()[i] as u32).sum();
        assert_eq!(total, img.data()[i] as u32);
    }
}

#[test]
fn fft_round_trip() {
    for (w, h) in [(16, 16), (10, 6), (9, 7)] {
        let img = texture(w, h, Channels::Gray);
        let back = inverse_fft(&forward_fft(&img).unwrap()).unwrap();
        for (&a, &b) in back.data().iter().zip(img.data()) {
            assert_abs_diff_eq!(a, b as f64, epsilon = 1e-6);
        }
    }
}

#[test]
fn checkerboard_dft_equals_shifted_fft() {
    let img = texture(8, 6, Channels::Gray);
    let via_checkerboard = dft(&checkerboard(&FloatImage::from_image(&img))).unwrap();
    let shifted = forward_fft(&img).unwrap();
    for (a, b) in via_checkerboard.data().iter().zip(shifted.data()) {
        assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-6);
        assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-6);
    }
}

#[test]
fn checkerboard_round_trip_reflects_through_origin() {
    let (w, h) = (8u32, 6u32);
    let img = texture(w, h, Channels::Gray);
    let out = checkerboard_round_trip(&img).unwrap();
    for y in 0..h {
        for x in 0..w {
            let expected = img.sample((w - x) % w, (h - y) % h, 0);
            assert_eq!(out.sample(x, y, 0), expected, "at ({x}, {y})");
        }
    }
}

#[test]
fn hsv_round_trip_within_one() {
    for r in (0..=255u32).step_by(17) {
        for g in (0..=255u32).step_by(17) {
            for b in (0..=255u32).step_by(17) {
                let (r, g, b) = (r as u8, g as u8, b as u8);
                let back = hsv_to_rgb(rgb_to_hsv(r, g, b));
                for (orig, rec) in [r, g, b].into_iter().zip(back) {
                    assert!((orig as f64 - rec).abs() <= 1.0, "({r}, {g}, {b}) -> {back:?}");
                }
            }
        }
    }
}

#[test]
fn hue_mask_wraps_through_red() {
    // red, green, blue, magenta-red (hue 340 deg -> 170)
    let colors = [[255u8, 0, 0], [0, 255, 0], [0, 0, 255], [255, 0, 85]];
    let img = Image::from_fn(4, 1, Channels::Rgb, |x, _, c| colors[x as usize][c]).unwrap();
    let mask = hue_mask(&img, 170, 10).unwrap();
    assert_eq!(mask.data(), &[255, 0, 0, 255]);
}

#[test]
fn average_keeps_uniform_image() {
    let img = Image::filled(9, 9, Channels::Rgb, 140).unwrap();
    assert_eq!(average(&img, 3, &FilterConfig::default()).unwrap(), img);
}

#[test]
fn parallel_matches_serial() {
    let img = texture(33, 21, Channels::Rgb);
    let kernel = Kernel::gaussian(5, 1.1);
    for border in [Border::Zero, Border::Replicate, Border::Reflect101] {
        let cfg = FilterConfig::default().with_border(border);
        let par = convolve_with(&img, &kernel, &cfg.with_parallel(true)).unwrap();
        let ser = convolve_with(&img, &kernel, &cfg.with_parallel(false)).unwrap();
        assert!(par == ser, "{border:?}");
    }
}
