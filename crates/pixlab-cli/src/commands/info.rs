//! Image info command.
//!
//! Displays format, dimensions and channel layout, plus optional
//! per-channel histogram summaries.

use crate::InfoArgs;
use anyhow::Result;
use pixlab_core::{Channels, Image};
use pixlab_io::{Format, RawSpec};
use pixlab_ops::intensity::histogram;
use std::fs;
use std::path::Path;
use tracing::trace;

/// Runs the info command.
pub fn run(args: InfoArgs, raw: Option<RawSpec>) -> Result<()> {
    for path in &args.input {
        trace!(path = %path.display(), "info::run");
        let file_size = fs::metadata(path)?.len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let image = super::load_image(path, raw)?;

        print_text(path, &image, file_size, format);
        if args.histogram {
            print_histograms(&image);
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

fn print_text(path: &Path, image: &Image, file_size: u64, format: Format) {
    println!("{}", path.display());
    println!("  Format:     {}", format.name());
    println!("  Resolution: {}x{}", image.width(), image.height());
    println!("  Channels:   {} ({})", image.channel_count(), image.channels());
    println!("  Pixels:     {}", image.pixel_count());
    println!("  File size:  {}", super::format_size(file_size));
}

fn print_histograms(image: &Image) {
    let names: &[&str] = match image.channels() {
        Channels::Gray => &["Gray"],
        Channels::Rgb => &["Red", "Green", "Blue"],
    };
    for (name, hist) in names.iter().zip(histogram(image)) {
        match (hist.range(), hist.mode(), hist.mean()) {
            (Some((lo, hi)), Some(mode), Some(mean)) => println!(
                "  {:<6} min {:>3}  max {:>3}  mean {:>7.2}  mode {:>3}",
                name, lo, hi, mean, mode
            ),
            _ => println!("  {:<6} (empty)", name),
        }
    }
}
