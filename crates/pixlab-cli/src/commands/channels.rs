//! Color decomposition commands: RGB channel, HSI component, complement.

use crate::{HsiChannelArgs, IoArgs, RgbChannelArgs};
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::color::{complement, extract_rgb_channel, rgb_to_hsi_channel};
use pixlab_ops::{HsiChannel, RgbChannel};
use tracing::{info, trace};

/// Runs `rgb-channel`: keeps one channel, zeroes the others.
pub fn run_rgb(args: RgbChannelArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), "channels::run_rgb");

    let image = super::load_image(&args.input, raw)?;
    let channel: RgbChannel = args.channel.into();
    info!(?channel, "Extracting RGB channel");

    let output = extract_rgb_channel(&image, channel)
        .with_context(|| format!("rgb-channel failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}

/// Runs `hsi-channel`: writes one HSI component as a gray image.
pub fn run_hsi(args: HsiChannelArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), "channels::run_hsi");

    let image = super::load_image(&args.input, raw)?;
    let channel: HsiChannel = args.channel.into();
    info!(?channel, "Extracting HSI component");

    let output = rgb_to_hsi_channel(&image, channel)
        .with_context(|| format!("hsi-channel failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}

/// Runs `complement`: `255 - v` on every sample.
pub fn run_complement(args: IoArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), "channels::run_complement");

    let image = super::load_image(&args.input, raw)?;
    let output = complement(&image)
        .with_context(|| format!("complement failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
