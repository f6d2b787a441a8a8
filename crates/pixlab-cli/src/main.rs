//! pixlab - 8-bit image processing CLI
//!
//! One subcommand per operation: intensity curves, geometry, filters,
//! frequency-domain experiments and color decomposition.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pixlab_io::RawSpec;
use pixlab_ops::filter::{Border, FilterConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pixlab")]
#[command(author, version, about = "8-bit image processing toolkit")]
#[command(long_about = "
Classic image processing operations on 8-bit gray and RGB images.
Reads and writes PNG, JPEG, TIFF and headerless raw dumps.

Examples:
  pixlab info photo.png --histogram
  pixlab convert lena.raw lena.png
  pixlab --raw 256x256:rgb convert scan.raw scan.tif
  pixlab brightness in.png -o out.png -a 1.2 -b 10
  pixlab brightness in.png -o out.png --mode logarithmic -a 4 -b 2
  pixlab resize in.png -o half.png -s 0.5
  pixlab rotate in.png -o r.png -a 30
  pixlab median noisy.png -o clean.png -k 5
  pixlab sharpen in.png -o sharp.png --strength 2 --mode hsi
  pixlab fft in.png -o spectrum.png --mode magnitude
  pixlab hue-mask in.png -o mask.png --lower 170 --upper 10
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Layout of headerless input files: WxH[:gray|rgb]
    #[arg(long, global = true, value_name = "WxH[:gray|rgb]")]
    raw: Option<RawSpec>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert image format
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Apply a linear, exponential or logarithmic brightness curve
    Brightness(BrightnessArgs),

    /// Scale image with bilinear interpolation
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Rotate image about its center (counter-clockwise)
    Rotate(RotateArgs),

    /// Gray-level slicing
    Slice(SliceArgs),

    /// Histogram equalization
    Equalize(IoArgs),

    /// Extract a single bit plane (gray)
    #[command(name = "bit-plane")]
    BitPlane(BitPlaneArgs),

    /// k x k mean filter
    Average(KernelArgs),

    /// k x k median filter
    Median(KernelArgs),

    /// Gaussian smoothing
    Smooth(SmoothArgs),

    /// Laplacian sharpening
    Sharpen(SharpenArgs),

    /// Laplacian edge response
    Laplacian(LaplacianArgs),

    /// Fourier spectrum and reconstructions (gray)
    Fft(FftArgs),

    /// Keep one RGB channel
    #[command(name = "rgb-channel")]
    RgbChannel(RgbChannelArgs),

    /// Extract one HSI component as a gray image
    #[command(name = "hsi-channel")]
    HsiChannel(HsiChannelArgs),

    /// Invert every sample
    Complement(IoArgs),

    /// Keep pixels whose hue lies in a range
    #[command(name = "hue-mask")]
    HueMask(MaskArgs),

    /// Keep pixels whose saturation lies in a range
    #[command(name = "saturation-mask")]
    SaturationMask(MaskArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Print per-channel histogram summaries
    #[arg(long)]
    histogram: bool,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Quality (1-100, for JPEG)
    #[arg(short = 'q', long)]
    quality: Option<u8>,
}

/// Input and output only.
#[derive(Args)]
struct IoArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct BrightnessArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Curve gain
    #[arg(short, default_value = "1.0", allow_hyphen_values = true)]
    a: f64,

    /// Curve offset (must exceed 1 for logarithmic)
    #[arg(short, default_value = "0.0", allow_hyphen_values = true)]
    b: f64,

    /// Curve shape
    #[arg(short, long, value_enum, default_value_t = BrightnessArg::Linear)]
    mode: BrightnessArg,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Scale factor (e.g., 0.5, 2.0)
    #[arg(short, long)]
    scale: Option<f64>,

    /// Target width
    #[arg(short, long)]
    width: Option<u32>,

    /// Target height
    #[arg(short = 'H', long)]
    height: Option<u32>,
}

#[derive(Args)]
struct RotateArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Rotation angle in degrees (counter-clockwise)
    #[arg(short, long, allow_hyphen_values = true)]
    angle: f64,
}

#[derive(Args)]
struct SliceArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Lowest highlighted level
    #[arg(long)]
    min: u8,

    /// Highest highlighted level
    #[arg(long)]
    max: u8,

    /// Keep levels outside the range instead of zeroing them
    #[arg(short, long)]
    preserve: bool,
}

#[derive(Args)]
struct BitPlaneArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Bit index, 0 = least significant
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=7))]
    plane: u8,
}

/// Border handling and threading for neighborhood filters.
#[derive(Args)]
struct FilterOpts {
    /// Border mode
    #[arg(long, value_enum, default_value_t = BorderArg::Reflect101)]
    border: BorderArg,

    /// Process rows on a single thread
    #[arg(long)]
    serial: bool,
}

impl FilterOpts {
    fn config(&self) -> FilterConfig {
        FilterConfig::default()
            .with_border(self.border.into())
            .with_parallel(!self.serial)
    }
}

#[derive(Args)]
struct KernelArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Kernel size (even sizes are bumped to the next odd)
    #[arg(short = 'k', long, default_value = "3")]
    size: usize,

    #[command(flatten)]
    filter: FilterOpts,
}

#[derive(Args)]
struct SmoothArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Smoothing level; kernel size is 2 * level + 1
    #[arg(short, long, default_value = "1")]
    level: u32,

    #[command(flatten)]
    filter: FilterOpts,
}

#[derive(Args)]
struct SharpenArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Laplacian weight
    #[arg(short, long, default_value = "1")]
    strength: u32,

    /// Channels to sharpen
    #[arg(short, long, value_enum, default_value_t = SharpenArg::Rgb)]
    mode: SharpenArg,

    #[command(flatten)]
    filter: FilterOpts,
}

#[derive(Args)]
struct LaplacianArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    filter: FilterOpts,
}

#[derive(Args)]
struct FftArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// What to compute
    #[arg(short, long, value_enum, default_value_t = FftMode::Magnitude)]
    mode: FftMode,
}

#[derive(Args)]
struct RgbChannelArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Channel to keep
    #[arg(short, long, value_enum)]
    channel: RgbChannelArg,
}

#[derive(Args)]
struct HsiChannelArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Component to extract
    #[arg(short, long, value_enum)]
    channel: HsiChannelArg,
}

#[derive(Args)]
struct MaskArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Lower bound (8-bit HSV scale; hue is 0-179)
    #[arg(short, long)]
    lower: u8,

    /// Upper bound
    #[arg(short, long)]
    upper: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum BrightnessArg {
    Linear,
    Exponential,
    Logarithmic,
}

impl From<BrightnessArg> for pixlab_ops::BrightnessMode {
    fn from(v: BrightnessArg) -> Self {
        match v {
            BrightnessArg::Linear => Self::Linear,
            BrightnessArg::Exponential => Self::Exponential,
            BrightnessArg::Logarithmic => Self::Logarithmic,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BorderArg {
    Zero,
    Replicate,
    Reflect101,
}

impl From<BorderArg> for Border {
    fn from(v: BorderArg) -> Self {
        match v {
            BorderArg::Zero => Border::Zero,
            BorderArg::Replicate => Border::Replicate,
            BorderArg::Reflect101 => Border::Reflect101,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SharpenArg {
    Rgb,
    Hsi,
}

impl From<SharpenArg> for pixlab_ops::SharpenMode {
    fn from(v: SharpenArg) -> Self {
        match v {
            SharpenArg::Rgb => Self::Rgb,
            SharpenArg::Hsi => Self::Hsi,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FftMode {
    /// Centered log-magnitude spectrum
    Magnitude,
    /// Reconstruction from magnitudes alone
    MagnitudeOnly,
    /// Reconstruction from phases alone
    PhaseOnly,
    /// Checkerboard, DFT, conjugate, inverse, checkerboard
    Checkerboard,
}

#[derive(Clone, Copy, ValueEnum)]
enum RgbChannelArg {
    Red,
    Green,
    Blue,
}

impl From<RgbChannelArg> for pixlab_ops::RgbChannel {
    fn from(v: RgbChannelArg) -> Self {
        match v {
            RgbChannelArg::Red => Self::Red,
            RgbChannelArg::Green => Self::Green,
            RgbChannelArg::Blue => Self::Blue,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum HsiChannelArg {
    Hue,
    Saturation,
    Intensity,
}

impl From<HsiChannelArg> for pixlab_ops::HsiChannel {
    fn from(v: HsiChannelArg) -> Self {
        match v {
            HsiChannelArg::Hue => Self::Hue,
            HsiChannelArg::Saturation => Self::Saturation,
            HsiChannelArg::Intensity => Self::Intensity,
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose > 2)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let raw = cli.raw;
    match cli.command {
        Commands::Info(args) => commands::info::run(args, raw),
        Commands::Convert(args) => commands::convert::run(args, raw),
        Commands::Brightness(args) => commands::brightness::run(args, raw),
        Commands::Resize(args) => commands::resize::run(args, raw),
        Commands::Rotate(args) => commands::rotate::run(args, raw),
        Commands::Slice(args) => commands::slice::run(args, raw),
        Commands::Equalize(args) => commands::equalize::run(args, raw),
        Commands::BitPlane(args) => commands::bit_plane::run(args, raw),
        Commands::Average(args) => commands::blur::run_average(args, raw),
        Commands::Median(args) => commands::blur::run_median(args, raw),
        Commands::Smooth(args) => commands::blur::run_smooth(args, raw),
        Commands::Sharpen(args) => commands::sharpen::run(args, raw),
        Commands::Laplacian(args) => commands::sharpen::run_laplacian(args, raw),
        Commands::Fft(args) => commands::fft::run(args, raw),
        Commands::RgbChannel(args) => commands::channels::run_rgb(args, raw),
        Commands::HsiChannel(args) => commands::channels::run_hsi(args, raw),
        Commands::Complement(args) => commands::channels::run_complement(args, raw),
        Commands::HueMask(args) => commands::mask::run_hue(args, raw),
        Commands::SaturationMask(args) => commands::mask::run_saturation(args, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "pixlab", "-vv", "--raw", "64x32:rgb", "median", "in.raw", "-o", "out.png", "-k", "5",
            "--border", "replicate", "--serial",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.raw, Some(RawSpec::new(64, 32, pixlab_io::RawLayout::Rgb)));
        match cli.command {
            Commands::Median(args) => {
                assert_eq!(args.size, 5);
                let cfg = args.filter.config();
                assert_eq!(cfg.border, Border::Replicate);
                assert!(!cfg.parallel);
            }
            _ => panic!("expected median"),
        }
    }

    #[test]
    fn test_negative_angle_and_bad_plane() {
        let cli = Cli::try_parse_from(["pixlab", "rotate", "a.png", "-o", "b.png", "-a", "-45"]).unwrap();
        match cli.command {
            Commands::Rotate(args) => assert_eq!(args.angle, -45.0),
            _ => panic!("expected rotate"),
        }
        assert!(Cli::try_parse_from(["pixlab", "bit-plane", "a.png", "-o", "b.png", "-p", "8"]).is_err());
        assert!(Cli::try_parse_from(["pixlab", "--raw", "12", "info", "a.raw"]).is_err());
    }
}
