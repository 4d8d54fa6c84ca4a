//! I/O traits for format readers and writers.

use crate::{Bitmap, IoResult};
use std::path::Path;

/// Trait for format readers.
///
/// `O` is the reader's options type.
pub trait FormatReader<O>: Sized {
    /// Short format name, e.g. `"BMP"`.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Returns `true` if `header` (the first bytes of a file) looks like
    /// this format.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads and decodes a file.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Bitmap>;

    /// Decodes an in-memory file.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<Bitmap>;

    /// Creates a reader with the given options.
    fn with_options(options: O) -> Self;
}

/// Trait for format writers.
///
/// `O` is the writer's options type.
pub trait FormatWriter<O>: Sized {
    /// Short format name, e.g. `"BMP"`.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Encodes and writes a file, creating or truncating it.
    fn write<P: AsRef<Path>>(&self, path: P, bitmap: &Bitmap) -> IoResult<()>;

    /// Encodes into a byte vector.
    fn write_to_memory(&self, bitmap: &Bitmap) -> IoResult<Vec<u8>>;

    /// Creates a writer with the given options.
    fn with_options(options: O) -> Self;
}
