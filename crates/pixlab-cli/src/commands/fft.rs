//! Fourier commands
//!
//! All modes work on gray images; color input is reduced to luma first.

use crate::{FftArgs, FftMode};
use anyhow::{Context, Result};
use pixlab_io::RawSpec;
use pixlab_ops::fft::{
    checkerboard_round_trip, forward_fft, inverse_fft_magnitude_only, inverse_fft_phase_only,
    magnitude_spectrum,
};
use tracing::{info, trace};

pub fn run(args: FftArgs, raw: Option<RawSpec>) -> Result<()> {
    trace!(input = %args.input.display(), mode = ?args.mode, "fft::run");

    let image = super::to_gray_for(super::load_image(&args.input, raw)?, "fft");
    info!(mode = ?args.mode, "Running frequency-domain operation");

    let output = match args.mode {
        FftMode::Magnitude => forward_fft(&image).and_then(|s| magnitude_spectrum(&s)),
        FftMode::MagnitudeOnly => inverse_fft_magnitude_only(&image),
        FftMode::PhaseOnly => inverse_fft_phase_only(&image),
        FftMode::Checkerboard => checkerboard_round_trip(&image),
    }
    .with_context(|| format!("fft failed on {}", args.input.display()))?;

    super::save_image(&args.output, &output)
}
