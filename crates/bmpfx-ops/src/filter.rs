//! 3x3 neighbourhood filters.
//!
//! Provides the box blur and Sobel edge filters, both built on a single
//! neighbourhood routine ([`Window`]) that visits only the in-bounds cells
//! of the 3x3 window around a pixel. At a corner the window holds 4 cells,
//! on a non-corner edge 6, in the interior 9; out-of-bounds cells are
//! skipped rather than padded, replicated or wrapped.
//!
//! # Kernels
//!
//! - [`Kernel3::BOX`] - Uniform weights, divided by the in-bounds sample count
//! - [`Kernel3::SOBEL_X`] - Horizontal gradient
//! - [`Kernel3::SOBEL_Y`] - Vertical gradient
//!
//! # Snapshot discipline
//!
//! Outputs depend on unmodified neighbour values, so [`blurred`] and
//! [`edge_magnitude`] read from the source and write into a fresh buffer.
//! The in-place forms [`blur`] and [`edges`] swap that buffer in only after
//! every pixel has been computed.
//!
//! # Example
//!
//! ```rust
//! use bmpfx_core::{Image, Pixel};
//! use bmpfx_ops::filter::{blur, edges};
//!
//! let mut img = Image::filled(8, 8, Pixel::new(40, 80, 120)).unwrap();
//! blur(&mut img).unwrap();
//! assert_eq!(img.pixel(0, 0), Pixel::new(40, 80, 120));
//!
//! let mut img = Image::new(8, 8).unwrap();
//! edges(&mut img).unwrap();
//! assert_eq!(img.pixel(4, 4), Pixel::BLACK);
//! ```

use crate::OpsResult;
use bmpfx_core::{Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Offsets `(dy, dx)` of the 3x3 window, in kernel order.
#[rustfmt::skip]
static NEIGHBOURHOOD: [(i64, i64); 9] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 0), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

/// Immutable 3x3 integer convolution kernel.
///
/// `weights[ky][kx]` applies to the neighbour at row offset `ky - 1` and
/// column offset `kx - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel3 {
    /// Kernel weights, row-major.
    pub weights: [[i32; 3]; 3],
}

impl Kernel3 {
    /// Uniform weights for box blur.
    #[rustfmt::skip]
    pub const BOX: Kernel3 = Kernel3::new([
        [1, 1, 1],
        [1, 1, 1],
        [1, 1, 1],
    ]);

    /// Sobel horizontal-gradient kernel.
    #[rustfmt::skip]
    pub const SOBEL_X: Kernel3 = Kernel3::new([
        [-1, 0, 1],
        [-2, 0, 2],
        [-1, 0, 1],
    ]);

    /// Sobel vertical-gradient kernel.
    #[rustfmt::skip]
    pub const SOBEL_Y: Kernel3 = Kernel3::new([
        [-1, -2, -1],
        [0, 0, 0],
        [1, 2, 1],
    ]);

    /// Creates a kernel from row-major weights.
    pub const fn new(weights: [[i32; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Returns the weight at kernel row `ky`, column `kx` (both `0..3`).
    #[inline]
    pub fn weight(&self, ky: usize, kx: usize) -> i32 {
        self.weights[ky][kx]
    }
}

/// The in-bounds part of the 3x3 neighbourhood around one pixel.
///
/// # Example
///
/// ```rust
/// use bmpfx_core::Image;
/// use bmpfx_ops::filter::{Kernel3, Window};
///
/// let img = Image::new(3, 3).unwrap();
/// assert_eq!(Window::around(&img, 0, 0).len(), 4);
/// assert_eq!(Window::around(&img, 1, 0).len(), 6);
/// assert_eq!(Window::around(&img, 1, 1).len(), 9);
///
/// let (sums, count) = Window::around(&img, 2, 2).convolve(&Kernel3::BOX);
/// assert_eq!((sums, count), ([0, 0, 0], 4));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    image: &'a Image,
    x: u32,
    y: u32,
}

impl<'a> Window<'a> {
    /// Creates the window centred on (x, y).
    #[inline]
    pub fn around(image: &'a Image, x: u32, y: u32) -> Self {
        debug_assert!(x < image.width() && y < image.height(), "window centre out of bounds");
        Self { image, x, y }
    }

    /// Iterates over in-bounds cells as `(ky, kx, pixel)`.
    pub fn samples(&self) -> impl Iterator<Item = (usize, usize, Pixel)> + 'a {
        let image = self.image;
        let (cx, cy) = (self.x as i64, self.y as i64);
        NEIGHBOURHOOD.iter().filter_map(move |&(dy, dx)| {
            let (sx, sy) = (cx + dx, cy + dy);
            image
                .contains(sx, sy)
                .then(|| ((dy + 1) as usize, (dx + 1) as usize, image.pixel(sx as u32, sy as u32)))
        })
    }

    /// Number of in-bounds cells (4, 6 or 9; fewer for 1-pixel-wide images).
    pub fn len(&self) -> u32 {
        self.samples().count() as u32
    }

    /// Always `false`: the centre pixel is in bounds.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Weighted per-channel sums over in-bounds cells, plus the cell count.
    ///
    /// Channels are in [`Pixel::channels`] order. Weights for out-of-bounds
    /// positions are dropped.
    pub fn convolve(&self, kernel: &Kernel3) -> ([i32; 3], u32) {
        let mut sums = [0i32; 3];
        let mut count = 0u32;
        for (ky, kx, px) in self.samples() {
            let w = kernel.weight(ky, kx);
            for (sum, v) in sums.iter_mut().zip(px.channels()) {
                *sum += w * v as i32;
            }
            count += 1;
        }
        (sums, count)
    }
}

/// Applies a per-pixel function over every window of `src` into a new image.
fn map_windows<F>(src: &Image, mut f: F) -> OpsResult<Image>
where
    F: FnMut(Window<'_>) -> Pixel,
{
    let mut dst = src.blank_like()?;
    for y in 0..src.height() {
        for x in 0..src.width() {
            dst.set_pixel(x, y, f(Window::around(src, x, y)));
        }
    }
    Ok(dst)
}

/// Returns a box-blurred copy of `src`.
///
/// Each output channel is the mean of that channel over the in-bounds 3x3
/// window, rounded half away from zero.
///
/// # Errors
///
/// Fails only if the output buffer cannot be allocated.
pub fn blurred(src: &Image) -> OpsResult<Image> {
    trace!(width = src.width(), height = src.height(), "blurred");
    map_windows(src, |window| {
        let (sums, count) = window.convolve(&Kernel3::BOX);
        Pixel::from_channels(sums.map(|s| mean(s, count)))
    })
}

/// Box-blurs an image in place.
///
/// # Example
///
/// ```rust
/// use bmpfx_core::{Image, Pixel};
/// use bmpfx_ops::filter::blur;
///
/// let mut img = Image::new(3, 3).unwrap();
/// img.set_pixel(0, 0, Pixel::gray(255));
/// blur(&mut img).unwrap();
/// assert_eq!(img.pixel(0, 0), Pixel::gray(64)); // 255 / 4 = 63.75
/// assert_eq!(img.pixel(1, 1), Pixel::gray(28)); // 255 / 9 = 28.3
/// ```
pub fn blur(image: &mut Image) -> OpsResult<()> {
    debug!(width = image.width(), height = image.height(), "Applying box blur");
    let out = blurred(image)?;
    image.replace_with(out)?;
    Ok(())
}

/// Returns the Sobel gradient magnitude of `src`.
///
/// For each channel independently: `min(255, round(sqrt(gx^2 + gy^2)))`
/// where `gx` and `gy` are the [`Kernel3::SOBEL_X`] and
/// [`Kernel3::SOBEL_Y`] weighted sums over in-bounds neighbours.
///
/// # Errors
///
/// Fails only if the output buffer cannot be allocated.
pub fn edge_magnitude(src: &Image) -> OpsResult<Image> {
    trace!(width = src.width(), height = src.height(), "edge_magnitude");
    map_windows(src, |window| {
        let (gx, _) = window.convolve(&Kernel3::SOBEL_X);
        let (gy, _) = window.convolve(&Kernel3::SOBEL_Y);
        Pixel::from_channels([
            magnitude(gx[0], gy[0]),
            magnitude(gx[1], gy[1]),
            magnitude(gx[2], gy[2]),
        ])
    })
}

/// Replaces an image with its Sobel gradient magnitude.
pub fn edges(image: &mut Image) -> OpsResult<()> {
    debug!(width = image.width(), height = image.height(), "Applying Sobel edges");
    let out = edge_magnitude(image)?;
    image.replace_with(out)?;
    Ok(())
}

/// Rounded mean of `count` samples summing to `sum`.
#[inline]
fn mean(sum: i32, count: u32) -> u8 {
    (sum as f64 / count as f64).round().clamp(0.0, 255.0) as u8
}

/// Clamped Euclidean magnitude of a gradient pair.
#[inline]
fn magnitude(gx: i32, gy: i32) -> u8 {
    let sq = (gx as i64 * gx as i64 + gy as i64 * gy as i64) as f64;
    sq.sqrt().round().min(255.0) as u8
}
