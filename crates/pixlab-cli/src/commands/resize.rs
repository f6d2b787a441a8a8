//! Resize command
//!
//! Bilinear scaling by factor, or to explicit dimensions. A single
//! dimension keeps the aspect ratio.

use crate::ResizeArgs;
use anyhow::{bail, Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::geometry::{resize, resize_to};
use tracing::{info, trace};

pub fn run(args: ResizeArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), "resize::run");

    let image = super::load_image(&args.input, raw)?;
    let (src_w, src_h) = image.dimensions();

    let output = match (args.width, args.height, args.scale) {
        (Some(w), Some(h), _) => resize_to(&image, w, h),
        (Some(w), None, _) => {
            let h = (src_h as f64 * w as f64 / src_w.max(1) as f64).round() as u32;
            resize_to(&image, w, h)
        }
        (None, Some(h), _) => {
            let w = (src_w as f64 * h as f64 / src_h.max(1) as f64).round() as u32;
            resize_to(&image, w, h)
        }
        (None, None, Some(s)) => resize(&image, s),
        _ => bail!("Specify --scale, --width or --height"),
    }
    .with_context(|| format!("resize failed on {}", args.input.display()))?;

    info!(
        "Resized {}x{} -> {}x{}",
        src_w,
        src_h,
        output.width(),
        output.height()
    );

    super::save_image(&args.output, &output)
}
