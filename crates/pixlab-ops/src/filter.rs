//! Spatial filtering and convolution.
//!
//! Every linear filter here is built on one primitive, [`convolve`]: a
//! zero-padded correlation of an odd-sized [`Kernel`] with each channel,
//! producing an unclamped [`FloatImage`]. The derived filters go through
//! [`convolve_with`], which adds a [`FilterConfig`] selecting the border
//! mode and whether rows run on the rayon pool.
//!
//! # Filters
//!
//! - [`average`] - Uniform k×k mean
//! - [`median`] - k×k neighborhood median (edge replication)
//! - [`smooth`] - Gaussian blur with kernel size `2 * level + 1`
//! - [`laplacian`] / [`laplacian_image`] - 4-neighbor Laplacian response
//! - [`sharpen`] - `image - strength * laplacian`, per channel or on intensity only
//!
//! # Example
//!
//! ```rust
//! use pixlab_core::{Channels, Image};
//! use pixlab_ops::filter::{average, FilterConfig};
//!
//! let img = Image::filled(16, 16, Channels::Gray, 90).unwrap();
//! let blurred = average(&img, 3, &FilterConfig::default()).unwrap();
//! assert!(blurred.data().iter().all(|&v| v == 90));
//! ```

use pixlab_core::{Channels, FloatImage, Image};
use tracing::{debug, trace};

use crate::color::HsvPlanes;
use crate::error::ensure_not_empty;
use crate::parallel::collect_rows;
use crate::{OpsError, OpsResult};

/// Convolution kernel of signed weights.
///
/// Both sides are odd and `data` holds exactly `width * height` weights.
/// The fields are private so every kernel goes through a checked
/// constructor:
///
/// ```compile_fail
/// use pixlab_ops::filter::Kernel;
///
/// let k = Kernel { data: vec![1.0; 4], width: 2, height: 2 };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Creates a new kernel from data.
    ///
    /// Width and height must be odd numbers.
    pub fn new(data: Vec<f64>, width: usize, height: usize) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel dimensions must be odd, got {}x{}",
                width, height
            )));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Uniform `1 / (size * size)` kernel.
    ///
    /// An even `size` is bumped to `size + 1`.
    ///
    /// ```rust
    /// use pixlab_ops::filter::Kernel;
    ///
    /// let k = Kernel::average(4).unwrap();
    /// assert_eq!(k.width(), 5);
    /// ```
    pub fn average(size: usize) -> OpsResult<Self> {
        let size = odd_size("average", size)?;
        let count = size * size;
        Ok(Self {
            data: vec![1.0 / count as f64; count],
            width: size,
            height: size,
        })
    }

    /// Normalized Gaussian kernel, built as the outer product of two 1D
    /// Gaussians. An even `size` is bumped to `size + 1`.
    pub fn gaussian(size: usize, sigma: f64) -> Self {
        let size = if size % 2 == 0 { size + 1 } else { size };
        let half = (size / 2) as i64;
        let sigma2 = 2.0 * sigma * sigma;

        let row: Vec<f64> = (-half..=half)
            .map(|i| (-((i * i) as f64) / sigma2).exp())
            .collect();
        let total: f64 = row.iter().sum();
        let row: Vec<f64> = row.iter().map(|w| w / total).collect();
        Self::outer(&row)
    }

    /// Gaussian kernel with the sigma derived from `size`.
    ///
    /// Sizes 3, 5 and 7 use the fixed rows OpenCV substitutes
    /// when no sigma is given; larger sizes sample the Gaussian with
    /// [`gaussian_sigma`].
    ///
    /// ```rust
    /// use pixlab_ops::filter::Kernel;
    ///
    /// let k = Kernel::gaussian_auto(3);
    /// assert_eq!(k.data()[4], 0.25);
    /// assert_eq!(k.data()[0], 0.0625);
    /// ```
    pub fn gaussian_auto(size: usize) -> Self {
        let size = if size % 2 == 0 { size + 1 } else { size };
        match size {
            1 => Self::outer(&[1.0]),
            3 => Self::outer(&[0.25, 0.5, 0.25]),
            5 => Self::outer(&[0.0625, 0.25, 0.375, 0.25, 0.0625]),
            7 => Self::outer(&[
                0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
            ]),
            _ => Self::gaussian(size, gaussian_sigma(size)),
        }
    }

    /// Square kernel `row^T * row`; `row` has odd length.
    fn outer(row: &[f64]) -> Self {
        let size = row.len();
        let mut data = Vec::with_capacity(size * size);
        for wy in row {
            for wx in row {
                data.push(wy * wx);
            }
        }
        Self { data, width: size, height: size }
    }

    /// 4-neighbor Laplacian `[[0,1,0],[1,-4,1],[0,1,0]]`.
    pub fn laplacian() -> Self {
        Self {
            data: vec![
                0.0, 1.0, 0.0,
                1.0, -4.0, 1.0,
                0.0, 1.0, 0.0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Kernel weights, row-major.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Kernel width (odd).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Kernel height (odd).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

/// How taps outside the image are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
    /// Outside taps read 0.
    Zero,
    /// Outside taps read the nearest edge sample (`aaa|abcd|ddd`).
    Replicate,
    /// Mirror without repeating the edge sample (`dcb|abcd|cba`).
    #[default]
    Reflect101,
}

impl Border {
    /// Maps a possibly out-of-range index into `0..len`.
    ///
    /// Returns `None` when the tap should read zero.
    #[inline]
    pub fn resolve(self, i: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&i) {
            return Some(i as usize);
        }
        match self {
            Self::Zero => None,
            Self::Replicate => Some(i.clamp(0, n - 1) as usize),
            Self::Reflect101 => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * n - 2;
                let m = i.rem_euclid(period);
                let folded = if m >= n { period - m } else { m };
                Some(folded as usize)
            }
        }
    }
}

/// Filter behavior shared by the derived filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// Border mode for kernel taps.
    pub border: Border,
    /// Run rows on the rayon pool (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            border: Border::Reflect101,
            parallel: true,
        }
    }
}

impl FilterConfig {
    /// Returns a config with the given border mode.
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    /// Returns a config with parallel execution switched on or off.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

fn odd_size(op: &'static str, size: usize) -> OpsResult<usize> {
    if size == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "{}: kernel size must be > 0",
            op
        )));
    }
    if size % 2 == 0 {
        debug!(op, requested = size, used = size + 1, "Even kernel size bumped to odd");
        return Ok(size + 1);
    }
    Ok(size)
}

/// Correlates every channel of `src` with `kernel`.
pub(crate) fn correlate(
    src: &[f64],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
    cfg: &FilterConfig,
) -> Vec<f64> {
    let (rx, ry) = kernel.radius();
    let border = cfg.border;

    collect_rows(src.len(), width * channels, cfg.parallel, |y, row| {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0;
                for ky in 0..kernel.height {
                    let Some(sy) = border.resolve(y as isize + ky as isize - ry as isize, height)
                    else {
                        continue;
                    };
                    for kx in 0..kernel.width {
                        let Some(sx) = border.resolve(x as isize + kx as isize - rx as isize, width)
                        else {
                            continue;
                        };
                        let kw = kernel.data[ky * kernel.width + kx];
                        sum += kw * src[(sy * width + sx) * channels + c];
                    }
                }
                row[x * channels + c] = sum;
            }
        }
    })
}

/// Zero-padded convolution, unclamped.
///
/// Output sample `(x, y, c)` is `sum(kernel[i, j] * padded[x + i, y + j])`
/// with the kernel centered on the pixel. The kernel is not flipped.
///
/// ```rust
/// use pixlab_core::{Channels, Image};
/// use pixlab_ops::filter::{convolve, Kernel};
///
/// let img = Image::filled(4, 4, Channels::Gray, 10).unwrap();
/// let out = convolve(&img, &Kernel::average(3).unwrap()).unwrap();
/// // Corners see four of nine taps.
/// assert!((out.sample(0, 0, 0) - 40.0 / 9.0).abs() < 1e-9);
/// assert!((out.sample(1, 1, 0) - 10.0).abs() < 1e-9);
/// ```
pub fn convolve(image: &Image, kernel: &Kernel) -> OpsResult<FloatImage> {
    convolve_with(image, kernel, &FilterConfig::default().with_border(Border::Zero))
}

/// Convolution with an explicit border mode and execution strategy.
pub fn convolve_with(image: &Image, kernel: &Kernel, cfg: &FilterConfig) -> OpsResult<FloatImage> {
    ensure_not_empty("convolve", image)?;
    let (width, height) = image.dimensions();
    trace!(
        width,
        height,
        channels = image.channel_count(),
        kernel_w = kernel.width,
        kernel_h = kernel.height,
        border = ?cfg.border,
        parallel = cfg.parallel,
        "convolve"
    );

    let src = FloatImage::from_image(image);
    let out = correlate(
        src.data(),
        width as usize,
        height as usize,
        image.channel_count(),
        kernel,
        cfg,
    );
    Ok(FloatImage::from_data(width, height, image.channels(), out)?)
}

/// k×k mean filter, rounded back to 8 bits.
///
/// An even `size` becomes `size + 1`; zero is an error.
pub fn average(image: &Image, size: usize, cfg: &FilterConfig) -> OpsResult<Image> {
    trace!(size, "average");
    let kernel = Kernel::average(size)?;
    Ok(convolve_with(image, &kernel, cfg)?.round_to_u8())
}

/// k×k median filter with edge replication.
///
/// An even `size` becomes `size + 1`; zero is an error.
///
/// ```rust
/// use pixlab_core::{Channels, Image};
/// use pixlab_ops::filter::{median, FilterConfig};
///
/// // A single hot pixel disappears.
/// let img = Image::from_fn(5, 5, Channels::Gray, |x, y, _| if (x, y) == (2, 2) { 255 } else { 0 }).unwrap();
/// let out = median(&img, 3, &FilterConfig::default()).unwrap();
/// assert!(out.data().iter().all(|&v| v == 0));
/// ```
pub fn median(image: &Image, size: usize, cfg: &FilterConfig) -> OpsResult<Image> {
    ensure_not_empty("median", image)?;
    let size = odd_size("median", size)?;
    let (width, height) = (image.width() as usize, image.height() as usize);
    let channels = image.channel_count();
    trace!(width, height, channels, size, parallel = cfg.parallel, "median");

    let radius = (size / 2) as isize;
    let src = image.data();
    let out = collect_rows(src.len(), width * channels, cfg.parallel, |y, row| {
        let mut window = Vec::with_capacity(size * size);
        for x in 0..width {
            for c in 0..channels {
                window.clear();
                for dy in -radius..=radius {
                    let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                    for dx in -radius..=radius {
                        let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                        window.push(src[(sy * width + sx) * channels + c]);
                    }
                }
                window.sort_unstable();
                row[x * channels + c] = window[window.len() / 2];
            }
        }
    });
    Ok(Image::from_data(image.width(), image.height(), image.channels(), out)?)
}

/// Sigma for a Gaussian kernel of `ksize` taps when none is given.
///
/// [`Kernel::gaussian_auto`] only falls back to this above 7 taps.
#[inline]
pub fn gaussian_sigma(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Gaussian blur with kernel size `2 * level + 1`.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `level` is 0.
pub fn smooth(image: &Image, level: u32, cfg: &FilterConfig) -> OpsResult<Image> {
    if level == 0 {
        return Err(OpsError::InvalidParameter(
            "smooth: level must be >= 1".into(),
        ));
    }
    let ksize = 2 * level as usize + 1;
    debug!(level, ksize, "Gaussian smoothing");
    let kernel = Kernel::gaussian_auto(ksize);
    Ok(convolve_with(image, &kernel, cfg)?.round_to_u8())
}

/// Laplacian response, unclamped.
pub fn laplacian(image: &Image, cfg: &FilterConfig) -> OpsResult<FloatImage> {
    convolve_with(image, &Kernel::laplacian(), cfg)
}

/// Laplacian response clipped to [0, 255] for display.
pub fn laplacian_image(image: &Image, cfg: &FilterConfig) -> OpsResult<Image> {
    Ok(laplacian(image, cfg)?.clip_to_u8())
}

/// Which samples [`sharpen`] operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharpenMode {
    /// Every channel independently.
    #[default]
    Rgb,
    /// Intensity only: hue and saturation are kept.
    Hsi,
}

/// Laplacian sharpening: `clip(image - strength * L, 0, 255)`.
///
/// Gray input always takes the per-channel path.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `strength` is 0.
pub fn sharpen(
    image: &Image,
    strength: u32,
    mode: SharpenMode,
    cfg: &FilterConfig,
) -> OpsResult<Image> {
    if strength == 0 {
        return Err(OpsError::InvalidParameter(
            "sharpen: strength must be >= 1".into(),
        ));
    }
    ensure_not_empty("sharpen", image)?;
    trace!(strength, ?mode, "sharpen");
    let s = strength as f64;

    match (mode, image.channels()) {
        (SharpenMode::Hsi, Channels::Rgb) => {
            let mut planes = HsvPlanes::from_image(image)?;
            let (w, h) = (image.width() as usize, image.height() as usize);
            let lap = correlate(&planes.v, w, h, 1, &Kernel::laplacian(), cfg);
            for (v, l) in planes.v.iter_mut().zip(&lap) {
                *v = (*v - s * l).clamp(0.0, 255.0);
            }
            planes.to_image()
        }
        (SharpenMode::Hsi, Channels::Gray) => {
            debug!("HSI sharpening of a gray image uses the per-channel path");
            sharpen_channels(image, s, cfg)
        }
        (SharpenMode::Rgb, _) => sharpen_channels(image, s, cfg),
    }
}

fn sharpen_channels(image: &Image, strength: f64, cfg: &FilterConfig) -> OpsResult<Image> {
    let lap = laplacian(image, cfg)?;
    let mut out = FloatImage::from_image(image);
    for (v, l) in out.data_mut().iter_mut().zip(lap.data()) {
        *v -= strength * l;
    }
    Ok(out.clip_to_u8())
}
