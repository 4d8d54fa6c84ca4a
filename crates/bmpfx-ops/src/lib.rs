//! # bmpfx-ops
//!
//! The filter engine: four pixel-level transformations over a
//! [`bmpfx_core::Image`].
//!
//! # Modules
//!
//! - [`color`] - Grayscale (pointwise, in place)
//! - [`transform`] - Horizontal reflection (permutation, in place)
//! - [`filter`] - 3x3 neighbourhood filters: box blur and Sobel edges
//! - [`selector`] - The [`Filter`] enum tying a one-letter selector to an operation
//!
//! Every operation preserves the image dimensions and never reads or writes
//! outside the grid. Blur and edges read only from the original pixels and
//! write into a separate buffer that is swapped in once complete.
//!
//! # Example
//!
//! ```rust
//! use bmpfx_core::{Image, Pixel};
//! use bmpfx_ops::Filter;
//!
//! let mut img = Image::filled(4, 4, Pixel::new(255, 0, 0)).unwrap();
//! Filter::Grayscale.apply(&mut img).unwrap();
//! assert_eq!(img.pixel(0, 0), Pixel::gray(85));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color;
pub mod filter;
pub mod selector;
pub mod transform;

pub use error::{OpsError, OpsResult};
pub use filter::{Kernel3, Window};
pub use selector::Filter;
