//! Gray-level slicing command

use crate::SliceArgs;
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::intensity::slice;
use tracing::{info, trace};

pub fn run(args: SliceArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), "slice::run");

    let image = super::load_image(&args.input, raw)?;
    info!(min = args.min, max = args.max, preserve = args.preserve, "Slicing gray levels");

    let output = slice(&image, args.min, args.max, args.preserve)
        .with_context(|| format!("slice failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
