//! Benchmarks for pixlab operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use pixlab_core::{Channels, Image};
use pixlab_ops::fft::{forward_fft, inverse_fft};
use pixlab_ops::filter::{convolve_with, median, smooth, FilterConfig, Kernel};
use pixlab_ops::geometry::{resize, rotate};

fn test_image(size: u32, channels: Channels) -> Image {
    Image::from_fn(size, size, channels, |x, y, c| {
        ((x * 7 + y * 13 + c as u32 * 31) % 256) as u8
    })
    .unwrap()
}

/// Benchmark convolution, serial vs row-parallel.
fn bench_convolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolve");
    let kernel = Kernel::gaussian(5, 1.1);

    for size in [128u32, 512] {
        let img = test_image(size, Channels::Rgb);
        group.throughput(Throughput::Elements(img.pixel_count() as u64));

        for parallel in [false, true] {
            let cfg = FilterConfig::default().with_parallel(parallel);
            let name = if parallel { "gauss5_par" } else { "gauss5_serial" };
            group.bench_with_input(BenchmarkId::new(name, size), &img, |b, img| {
                b.iter(|| convolve_with(black_box(img), &kernel, &cfg).unwrap())
            });
        }

        group.bench_with_input(BenchmarkId::new("smooth_level3", size), &img, |b, img| {
            b.iter(|| smooth(black_box(img), 3, &FilterConfig::default()).unwrap())
        });
    }

    group.finish();
}

/// Benchmark median filter by kernel size.
fn bench_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("median");
    let img = test_image(256, Channels::Gray);
    group.throughput(Throughput::Elements(img.pixel_count() as u64));

    for k in [3usize, 5, 7] {
        group.bench_with_input(BenchmarkId::new("gray256", k), &k, |b, &k| {
            b.iter(|| median(black_box(&img), k, &FilterConfig::default()).unwrap())
        });
    }

    group.finish();
}

/// Benchmark forward and inverse 2D FFT.
fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft");

    for size in [128u32, 256, 500] {
        let img = test_image(size, Channels::Gray);
        group.throughput(Throughput::Elements(img.pixel_count() as u64));

        group.bench_with_input(BenchmarkId::new("forward", size), &img, |b, img| {
            b.iter(|| forward_fft(black_box(img)).unwrap())
        });

        let spectrum = forward_fft(&img).unwrap();
        group.bench_with_input(BenchmarkId::new("inverse", size), &spectrum, |b, s| {
            b.iter(|| inverse_fft(black_box(s)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark bilinear resampling.
fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let img = test_image(512, Channels::Rgb);

    group.bench_function("resize_half", |b| b.iter(|| resize(black_box(&img), 0.5).unwrap()));
    group.bench_function("resize_double", |b| b.iter(|| resize(black_box(&img), 2.0).unwrap()));
    group.bench_function("rotate_30", |b| b.iter(|| rotate(black_box(&img), 30.0).unwrap()));

    group.finish();
}

criterion_group!(benches, bench_convolve, bench_median, bench_fft, bench_geometry);
criterion_main!(benches);
