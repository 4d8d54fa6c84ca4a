//! Pixel grid type.
//!
//! [`Image`] is a fixed-size, row-major container of [`Pixel`]s. Row 0 is
//! the top row of the picture; the BMP codec takes care of flipping
//! bottom-up files on the way in and out.
//!
//! # Memory Layout
//!
//! ```text
//! data: [P(0,0) P(1,0) ... P(w-1,0)]  <- row 0
//!       [P(0,1) P(1,1) ... P(w-1,1)]  <- row 1
//!       ...
//! ```
//!
//! There is no per-row padding in memory; padding exists only on disk.
//!
//! # Allocation
//!
//! Buffers are reserved with [`Vec::try_reserve_exact`], so a grid that does
//! not fit in memory is reported as [`Error::AllocationFailed`] instead of
//! aborting the process. Filters that need a scratch copy use
//! [`Image::blank_like`] for the same reason.
//!
//! # Usage
//!
//! ```rust
//! use bmpfx_core::{Image, Pixel};
//!
//! let mut img = Image::filled(3, 2, Pixel::gray(10)).unwrap();
//! img.set_pixel(2, 1, Pixel::new(1, 2, 3));
//!
//! for (x, y, px) in img.pixels() {
//!     if (x, y) != (2, 1) {
//!         assert_eq!(px, Pixel::gray(10));
//!     }
//! }
//! ```

use crate::{Error, Pixel, Result};

/// Owned, row-major grid of [`Pixel`]s with immutable dimensions.
///
/// Both dimensions are strictly positive and `data.len() == width * height`
/// holds for the lifetime of the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    /// Pixel data, row-major, top row first
    data: Vec<Pixel>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
}

impl Image {
    /// Creates a new image filled with black.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either dimension is zero
    /// - [`Error::AllocationFailed`] if the pixel buffer cannot be reserved
    ///
    /// # Example
    ///
    /// ```rust
    /// use bmpfx_core::Image;
    ///
    /// let img = Image::new(640, 480).unwrap();
    /// assert_eq!(img.width(), 640);
    /// assert_eq!(img.height(), 480);
    /// assert!(Image::new(0, 10).is_err());
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Pixel::BLACK)
    }

    /// Creates an image with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        let count = pixel_count(width, height)?;
        let mut data = try_alloc(count)?;
        data.resize(count, pixel);
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image from existing pixel data (row-major, top row first).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or the
    /// data length is not `width * height`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bmpfx_core::{Image, Pixel};
    ///
    /// let img = Image::from_pixels(2, 1, vec![Pixel::BLACK, Pixel::WHITE]).unwrap();
    /// assert_eq!(img.pixel(1, 0), Pixel::WHITE);
    /// ```
    pub fn from_pixels(width: u32, height: u32, data: Vec<Pixel>) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Allocates a black image with the same dimensions as `self`.
    ///
    /// This is the scratch buffer for filters that must read the original
    /// grid while producing a new one.
    pub fn blank_like(&self) -> Result<Self> {
        Self::new(self.width, self.height)
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if (x, y) lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Returns the pixel data, row-major.
    #[inline]
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    /// Returns the pixel data mutably, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[self.offset(x, y)]
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        self.data[offset] = pixel;
    }

    /// Sets the pixel at (x, y), failing instead of panicking when out of bounds.
    pub fn try_set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        self.set_pixel(x, y, pixel);
        Ok(())
    }

    /// Returns row `y` as a slice of `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if y >= height.
    #[inline]
    pub fn row(&self, y: u32) -> &[Pixel] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Returns row `y` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if y >= height.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [Pixel] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize;
        let end = start + self.width as usize;
        &mut self.data[start..end]
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Pixel]> + ExactSizeIterator + '_ {
        self.data.chunks_exact(self.width as usize)
    }

    /// Iterates mutably over rows, top to bottom.
    pub fn rows_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = &mut [Pixel]> + ExactSizeIterator + '_ {
        self.data.chunks_exact_mut(self.width as usize)
    }

    /// Iterates over all pixels with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Applies a function to each pixel in place.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bmpfx_core::{Image, Pixel};
    ///
    /// let mut img = Image::filled(2, 2, Pixel::new(10, 20, 30)).unwrap();
    /// img.map_pixels(|px| Pixel::gray(px.g));
    /// assert_eq!(img.pixel(1, 1), Pixel::gray(20));
    /// ```
    pub fn map_pixels<F>(&mut self, mut f: F)
    where
        F: FnMut(Pixel) -> Pixel,
    {
        for px in &mut self.data {
            *px = f(*px);
        }
    }

    /// Replaces this image's pixels with those of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ; `self` is
    /// left untouched in that case.
    pub fn replace_with(&mut self, other: Image) -> Result<()> {
        if other.dimensions() != self.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()));
        }
        self.data = other.data;
        Ok(())
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Validates dimensions and returns `width * height`.
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "dimensions must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}

fn try_alloc(count: usize) -> Result<Vec<Pixel>> {
    let mut data = Vec::new();
    data.try_reserve_exact(count).map_err(|e| {
        Error::allocation_failed(count.saturating_mul(std::mem::size_of::<Pixel>()), e.to_string())
    })?;
    Ok(data)
}
