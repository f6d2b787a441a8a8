//! Brightness curve command

use crate::BrightnessArgs;
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::intensity::{adjust_brightness, BrightnessMode};
use tracing::{info, trace};

pub fn run(args: BrightnessArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), a = args.a, b = args.b, "brightness::run");

    let image = super::load_image(&args.input, raw)?;
    let mode: BrightnessMode = args.mode.into();
    info!(?mode, a = args.a, b = args.b, "Adjusting brightness");

    let output = adjust_brightness(&image, args.a, args.b, mode)
        .with_context(|| format!("brightness failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
