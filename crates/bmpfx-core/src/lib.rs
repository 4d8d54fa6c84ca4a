//! # bmpfx-core
//!
//! Core types for bmpfx image filtering.
//!
//! This crate provides the foundational types shared by the other bmpfx crates:
//!
//! - [`Pixel`] - One 24-bit pixel stored in blue-green-red order
//! - [`Image`] - Fixed-size, row-major grid of pixels
//! - [`Error`] / [`Result`] - Failures raised while building grids
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. Every other bmpfx crate depends
//! on `bmpfx-core`:
//!
//! ```text
//! bmpfx-core (this crate)
//!    ^
//!    |
//!    +-- bmpfx-ops (filter engine)
//!    +-- bmpfx-io (BMP codec)
//!    +-- bmpfx-cli (command line)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bmpfx_core::{Image, Pixel};
//!
//! let mut img = Image::new(4, 3).unwrap();
//! img.set_pixel(1, 2, Pixel::new(255, 0, 0));
//! assert_eq!(img.pixel(1, 2).r, 255);
//! assert_eq!(img.dimensions(), (4, 3));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

// Re-exports for convenience
pub use error::{Error, Result};
pub use image::Image;
pub use pixel::Pixel;

/// Prelude module for convenient imports.
///
/// ```
/// use bmpfx_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::pixel::Pixel;
}
