//! Bit-plane extraction command
//!
//! Color input is reduced to luma first.

use crate::BitPlaneArgs;
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::intensity::bit_plane;
use tracing::{info, trace};

pub fn run(args: BitPlaneArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), plane = args.plane, "bit_plane::run");

    let image = super::to_gray_for(super::load_image(&args.input, raw)?, "bit-plane");
    info!(plane = args.plane, "Extracting bit plane");

    let output = bit_plane(&image, args.plane)
        .with_context(|| format!("bit-plane failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
