//! Hue and saturation mask commands
//!
//! Bounds use the 8-bit HSV scale: hue 0-179, saturation 0-255. A hue range
//! with `lower > upper` wraps through red.

use crate::MaskArgs;
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::color::{hue_mask, saturation_mask};
use tracing::{info, trace};

pub fn run_hue(args: MaskArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), "mask::run_hue");

    let image = super::load_image(&args.input, raw)?;
    info!(lower = args.lower, upper = args.upper, "Masking by hue");

    let output = hue_mask(&image, args.lower, args.upper)
        .with_context(|| format!("hue-mask failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}

pub fn run_saturation(args: MaskArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), "mask::run_saturation");

    let image = super::load_image(&args.input, raw)?;
    info!(lower = args.lower, upper = args.upper, "Masking by saturation");

    let output = saturation_mask(&image, args.lower, args.upper)
        .with_context(|| format!("saturation-mask failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
