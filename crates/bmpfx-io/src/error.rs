//! Error types for BMP I/O.
//!
//! Each variant is one failure category, so callers can map them to
//! distinct exit statuses.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// BMP I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// The input file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// Input path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The output file could not be created.
    #[error("cannot create {}: {source}", path.display())]
    Create {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The 54 header bytes could not be read in full.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The header parsed but describes something other than an
    /// uncompressed 24-bit BMP.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The header does not describe the image it is paired with.
    #[error("header describes {header_width}x{header_height}, image is {image_width}x{image_height}")]
    HeaderMismatch {
        /// Header width.
        header_width: u32,
        /// Header height.
        header_height: u32,
        /// Image width.
        image_width: u32,
        /// Image height.
        image_height: u32,
    },

    /// Pixel data or padding could not be read.
    #[error("read error: {0}")]
    Read(#[source] io::Error),

    /// Header, pixel data or padding could not be written.
    #[error("write error: {0}")]
    Write(#[source] io::Error),

    /// The pixel grid could not be allocated.
    #[error("pixel buffer: {0}")]
    Allocation(#[from] bmpfx_core::Error),
}

/// Result type for BMP I/O.
pub type IoResult<T> = Result<T, IoError>;
