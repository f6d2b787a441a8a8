//! Blur commands: mean, median and Gaussian smoothing.

use crate::{KernelArgs, SmoothArgs};
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::filter::{average, median, smooth};
use tracing::{info, trace};

/// Runs `average`: k x k mean filter.
pub fn run_average(args: KernelArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), size = args.size, "blur::run_average");

    let image = super::load_image(&args.input, raw)?;
    let cfg = args.filter.config();
    info!(size = args.size, border = ?cfg.border, "Applying mean filter");

    let output = average(&image, args.size, &cfg)
        .with_context(|| format!("average failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}

/// Runs `median`: k x k median filter.
///
/// The median window always replicates edges; `--border` is ignored.
pub fn run_median(args: KernelArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), size = args.size, "blur::run_median");

    let image = super::load_image(&args.input, raw)?;
    let cfg = args.filter.config();
    info!(size = args.size, "Applying median filter");

    let output = median(&image, args.size, &cfg)
        .with_context(|| format!("median failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}

/// Runs `smooth`: Gaussian blur with kernel size `2 * level + 1`.
pub fn run_smooth(args: SmoothArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), level = args.level, "blur::run_smooth");

    let image = super::load_image(&args.input, raw)?;
    let cfg = args.filter.config();
    info!(level = args.level, border = ?cfg.border, "Applying Gaussian smoothing");

    let output = smooth(&image, args.level, &cfg)
        .with_context(|| format!("smooth failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
