//! # bmpfx-io
//!
//! Reading and writing of uncompressed 24-bit BMP files.
//!
//! The decoder turns a file into a [`Bitmap`]: its 54 bytes of headers plus
//! an unpadded, top-down [`bmpfx_core::Image`]. The encoder writes the
//! headers back and re-applies the on-disk row order and row padding.
//!
//! # Architecture
//!
//! - [`FormatReader`] / [`FormatWriter`] - Traits for format readers and writers
//! - [`bmp::BmpReader`] / [`bmp::BmpWriter`] - The BMP implementations
//! - [`read`] / [`write`] - High-level functions with default options
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bmpfx_io::{read, write};
//!
//! let mut bitmap = read("input.bmp")?;
//! // ... modify bitmap.image ...
//! write("output.bmp", &bitmap)?;
//! ```
//!
//! # Errors
//!
//! Every failure maps to exactly one [`IoError`] variant: the input could not
//! be opened, the output could not be created, the header was truncated or
//! describes an unsupported variant, pixel data could not be read or written,
//! or the pixel grid could not be allocated.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bmp;
mod error;
pub mod traits;

pub use bmp::{
    Bitmap, BmpFileHeader, BmpHeader, BmpInfoHeader, BmpReader, BmpReaderOptions, BmpWriter,
    BmpWriterOptions, HeaderMode,
};
pub use error::{IoError, IoResult};
pub use traits::{FormatReader, FormatWriter};

use std::path::Path;

/// Reads a BMP file.
///
/// # Errors
///
/// See [`IoError`].
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    bmp::read(path)
}

/// Decodes a BMP file held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<Bitmap> {
    BmpReader::new().read_from_memory(data)
}

/// Writes a BMP file, creating or truncating `path`.
///
/// The output file is not created if the bitmap's header and image
/// disagree on dimensions.
pub fn write<P: AsRef<Path>>(path: P, bitmap: &Bitmap) -> IoResult<()> {
    bmp::write(path, bitmap)
}

/// Encodes a BMP file into memory.
pub fn write_to_memory(bitmap: &Bitmap) -> IoResult<Vec<u8>> {
    BmpWriter::new().write_to_memory(bitmap)
}
