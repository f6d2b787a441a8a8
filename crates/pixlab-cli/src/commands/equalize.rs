//! Histogram equalization command

use crate::IoArgs;
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::intensity::equalize;
use tracing::trace;

pub fn run(args: IoArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), "equalize::run");

    let image = super::load_image(&args.input, raw)?;
    let output = equalize(&image)
        .with_context(|| format!("equalize failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
