//! Geometric transformations.
//!
//! # Operations
//!
//! - [`reflect`] - Horizontal mirror, in place
//!
//! # Example
//!
//! ```rust
//! use bmpfx_core::{Image, Pixel};
//! use bmpfx_ops::transform::reflect;
//!
//! let mut img = Image::from_pixels(2, 1, vec![Pixel::new(255, 0, 0), Pixel::new(0, 255, 0)]).unwrap();
//! reflect(&mut img);
//! assert_eq!(img.pixel(0, 0), Pixel::new(0, 255, 0)); // Was right, now left
//! assert_eq!(img.pixel(1, 0), Pixel::new(255, 0, 0)); // Was left, now right
//! ```

use bmpfx_core::Image;
use tracing::trace;

/// Mirrors every row left-to-right, in place.
///
/// Column `x` is swapped with column `width - 1 - x` for `x < width / 2`;
/// the middle column of an odd-width row stays where it is. Applying the
/// operation twice restores the original image.
pub fn reflect(image: &mut Image) {
    trace!(width = image.width(), height = image.height(), "reflect");
    for row in image.rows_mut() {
        row.reverse();
    }
}
