//! Sharpen and Laplacian commands

use crate::{LaplacianArgs, SharpenArgs};
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::filter::{laplacian_image, sharpen, SharpenMode};
use tracing::{info, trace};

pub fn run(args: SharpenArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), strength = args.strength, "sharpen::run");

    let image = super::load_image(&args.input, raw)?;
    let mode: SharpenMode = args.mode.into();
    info!(strength = args.strength, ?mode, "Sharpening");

    let output = sharpen(&image, args.strength, mode, &args.filter.config())
        .with_context(|| format!("sharpen failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}

/// Writes the Laplacian response clipped to [0, 255].
pub fn run_laplacian(args: LaplacianArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), "sharpen::run_laplacian");

    let image = super::load_image(&args.input, raw)?;
    let output = laplacian_image(&image, &args.filter.config())
        .with_context(|| format!("laplacian failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
