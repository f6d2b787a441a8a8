//! Format conversion command.
//!
//! Re-encodes an image; `--quality` applies to JPEG output.

use crate::ConvertArgs;
use anyhow::{Context, Result};
use pixlab_io::jpeg::{self, JpegOptions};
use pixlab_io::{Format, RawSpec};
use tracing::{info, trace, warn};

/// Runs the convert command.
pub fn run(args: ConvertArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");

    let input_format = Format::detect(&args.input).unwrap_or(Format::Unknown);
    let output_format = Format::from_extension(&args.output);
    info!(
        input = %args.input.display(),
        input_format = input_format.name(),
        output = %args.output.display(),
        output_format = output_format.name(),
        "Converting image"
    );

    let image = super::load_image(&args.input, raw)?;

    match (output_format, args.quality) {
        (Format::Jpeg, Some(quality)) => {
            jpeg::write_with_options(&args.output, &image, &JpegOptions { quality })
                .with_context(|| format!("Failed to save: {}", args.output.display()))?;
            info!(path = %args.output.display(), quality, "Saved image");
        }
        (_, quality) => {
            if quality.is_some() {
                warn!(format = output_format.name(), "--quality only applies to JPEG output");
            }
            super::save_image(&args.output, &image)?;
        }
    }

    Ok(())
}
