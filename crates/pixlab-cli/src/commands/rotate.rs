//! Rotate command - arbitrary angle about the image center

use crate::RotateArgs;
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::geometry::rotate;
use tracing::{info, trace};

pub fn run(args: RotateArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), angle = args.angle, "rotate::run");

    let input = super::load_image(&args.input, raw)?;
    info!(angle = args.angle, "Rotating");

    let output = rotate(&input, args.angle)
        .with_context(|| format!("rotate failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
