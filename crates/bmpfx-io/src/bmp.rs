//! BMP (Windows bitmap) format support.
//!
//! Only the uncompressed 24-bit variant with a 40-byte `BITMAPINFOHEADER`
//! is handled: the 14-byte file header and the info header are followed
//! directly by the pixel array at offset 54.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bmpfx_io::bmp;
//!
//! let bitmap = bmp::read("input.bmp")?;
//! bmp::write("output.bmp", &bitmap)?;
//! ```
//!
//! # Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 14 | File header (`"BM"`, file size, reserved, data offset) |
//! | 14 | 40 | Info header (size, width, height, planes, bit count, ...) |
//! | 54 | stride x height | Pixel rows, BGR, each padded to a multiple of 4 bytes |
//!
//! Rows are stored bottom-up when `bi_height > 0` and top-down when it is
//! negative. The decoded [`Image`] is always top-down; the writer restores
//! the orientation recorded in the header, so decoding then encoding
//! reproduces the header and pixel rows byte for byte.

use crate::{FormatReader, FormatWriter, IoError, IoResult};
use bmpfx_core::{Image, Pixel};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use tracing::{debug, trace};

// === Constants ===

/// `"BM"` read as a little-endian u16.
pub const MAGIC: u16 = 0x4D42;
/// Size of the file header in bytes.
pub const FILE_HEADER_SIZE: u32 = 14;
/// Size of `BITMAPINFOHEADER` in bytes.
pub const INFO_HEADER_SIZE: u32 = 40;
/// Offset of the pixel array in a supported file.
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// Bits per pixel of a supported file.
pub const BIT_COUNT: u16 = 24;
/// `BI_RGB`: no compression.
pub const COMPRESSION_NONE: u32 = 0;
/// 72 dpi in pixels per metre.
const DEFAULT_PELS_PER_METER: i32 = 2835;

/// Zero bytes appended to a row of `width` pixels.
#[inline]
pub fn row_padding(width: u32) -> usize {
    (4 - (width as usize * 3) % 4) % 4
}

/// Bytes per on-disk row of `width` pixels, padding included.
#[inline]
pub fn row_stride(width: u32) -> usize {
    width as usize * 3 + row_padding(width)
}

// === Headers ===

/// The 14-byte `BITMAPFILEHEADER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpFileHeader {
    /// Magic, `"BM"`.
    pub bf_type: u16,
    /// Total file size in bytes.
    pub bf_size: u32,
    /// Reserved.
    pub bf_reserved1: u16,
    /// Reserved.
    pub bf_reserved2: u16,
    /// Offset of the pixel array.
    pub bf_off_bits: u32,
}

impl BmpFileHeader {
    /// Reads the header fields in file order.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Self {
            bf_type: r.read_u16::<LittleEndian>()?,
            bf_size: r.read_u32::<LittleEndian>()?,
            bf_reserved1: r.read_u16::<LittleEndian>()?,
            bf_reserved2: r.read_u16::<LittleEndian>()?,
            bf_off_bits: r.read_u32::<LittleEndian>()?,
        })
    }

    /// Writes the header fields in file order.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u16::<LittleEndian>(self.bf_type)?;
        w.write_u32::<LittleEndian>(self.bf_size)?;
        w.write_u16::<LittleEndian>(self.bf_reserved1)?;
        w.write_u16::<LittleEndian>(self.bf_reserved2)?;
        w.write_u32::<LittleEndian>(self.bf_off_bits)
    }
}

/// The 40-byte `BITMAPINFOHEADER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpInfoHeader {
    /// Size of this header, 40.
    pub bi_size: u32,
    /// Width in pixels.
    pub bi_width: i32,
    /// Height in pixels; negative for top-down rows.
    pub bi_height: i32,
    /// Colour planes, always 1.
    pub bi_planes: u16,
    /// Bits per pixel.
    pub bi_bit_count: u16,
    /// Compression scheme.
    pub bi_compression: u32,
    /// Size of the pixel array, may be 0 for uncompressed files.
    pub bi_size_image: u32,
    /// Horizontal resolution.
    pub bi_x_pels_per_meter: i32,
    /// Vertical resolution.
    pub bi_y_pels_per_meter: i32,
    /// Palette entries used.
    pub bi_clr_used: u32,
    /// Important palette entries.
    pub bi_clr_important: u32,
}

impl BmpInfoHeader {
    /// Reads the header fields in file order.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Self {
            bi_size: r.read_u32::<LittleEndian>()?,
            bi_width: r.read_i32::<LittleEndian>()?,
            bi_height: r.read_i32::<LittleEndian>()?,
            bi_planes: r.read_u16::<LittleEndian>()?,
            bi_bit_count: r.read_u16::<LittleEndian>()?,
            bi_compression: r.read_u32::<LittleEndian>()?,
            bi_size_image: r.read_u32::<LittleEndian>()?,
            bi_x_pels_per_meter: r.read_i32::<LittleEndian>()?,
            bi_y_pels_per_meter: r.read_i32::<LittleEndian>()?,
            bi_clr_used: r.read_u32::<LittleEndian>()?,
            bi_clr_important: r.read_u32::<LittleEndian>()?,
        })
    }

    /// Writes the header fields in file order.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.bi_size)?;
        w.write_i32::<LittleEndian>(self.bi_width)?;
        w.write_i32::<LittleEndian>(self.bi_height)?;
        w.write_u16::<LittleEndian>(self.bi_planes)?;
        w.write_u16::<LittleEndian>(self.bi_bit_count)?;
        w.write_u32::<LittleEndian>(self.bi_compression)?;
        w.write_u32::<LittleEndian>(self.bi_size_image)?;
        w.write_i32::<LittleEndian>(self.bi_x_pels_per_meter)?;
        w.write_i32::<LittleEndian>(self.bi_y_pels_per_meter)?;
        w.write_u32::<LittleEndian>(self.bi_clr_used)?;
        w.write_u32::<LittleEndian>(self.bi_clr_important)
    }
}

/// File header and info header together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    /// File header.
    pub file: BmpFileHeader,
    /// Info header.
    pub info: BmpInfoHeader,
}

impl BmpHeader {
    /// Builds a fresh bottom-up header for a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// [`IoError::UnsupportedFormat`] if the dimensions or the resulting
    /// file size do not fit the header fields.
    pub fn for_dimensions(width: u32, height: u32) -> IoResult<Self> {
        let too_large = || {
            IoError::UnsupportedFormat(format!("{width}x{height} does not fit in a BMP header"))
        };
        let bi_width = i32::try_from(width).map_err(|_| too_large())?;
        let bi_height = i32::try_from(height).map_err(|_| too_large())?;
        let image_size = (row_stride(width) as u64)
            .checked_mul(height as u64)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(too_large)?;
        let file_size = image_size.checked_add(PIXEL_DATA_OFFSET).ok_or_else(too_large)?;

        Ok(Self {
            file: BmpFileHeader {
                bf_type: MAGIC,
                bf_size: file_size,
                bf_reserved1: 0,
                bf_reserved2: 0,
                bf_off_bits: PIXEL_DATA_OFFSET,
            },
            info: BmpInfoHeader {
                bi_size: INFO_HEADER_SIZE,
                bi_width,
                bi_height,
                bi_planes: 1,
                bi_bit_count: BIT_COUNT,
                bi_compression: COMPRESSION_NONE,
                bi_size_image: image_size,
                bi_x_pels_per_meter: DEFAULT_PELS_PER_METER,
                bi_y_pels_per_meter: DEFAULT_PELS_PER_METER,
                bi_clr_used: 0,
                bi_clr_important: 0,
            },
        })
    }

    /// Reads both headers.
    ///
    /// Does not validate; see [`BmpHeader::validate`].
    ///
    /// # Errors
    ///
    /// [`IoError::MalformedHeader`] if fewer than 54 bytes are available.
    pub fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        let file = BmpFileHeader::read_from(r)
            .map_err(|e| IoError::MalformedHeader(format!("file header: {e}")))?;
        let info = BmpInfoHeader::read_from(r)
            .map_err(|e| IoError::MalformedHeader(format!("info header: {e}")))?;
        Ok(Self { file, info })
    }

    /// Writes both headers unchanged.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.file.write_to(w)?;
        self.info.write_to(w)
    }

    /// Checks that the header describes a supported file.
    ///
    /// Requires magic `"BM"`, pixel offset 54, info header size 40, 24 bits
    /// per pixel, no compression, positive width and non-zero height.
    pub fn validate(&self) -> IoResult<()> {
        let (file, info) = (&self.file, &self.info);
        let unsupported = |msg: String| -> IoResult<()> { Err(IoError::UnsupportedFormat(msg)) };

        if file.bf_type != MAGIC {
            return unsupported(format!("bad magic {:#06x}, expected \"BM\"", file.bf_type));
        }
        if file.bf_off_bits != PIXEL_DATA_OFFSET {
            return unsupported(format!("pixel data offset {}, expected {PIXEL_DATA_OFFSET}", file.bf_off_bits));
        }
        if info.bi_size != INFO_HEADER_SIZE {
            return unsupported(format!("info header size {}, expected {INFO_HEADER_SIZE}", info.bi_size));
        }
        if info.bi_bit_count != BIT_COUNT {
            return unsupported(format!("{} bits per pixel, expected {BIT_COUNT}", info.bi_bit_count));
        }
        if info.bi_compression != COMPRESSION_NONE {
            return unsupported(format!("compression {}, expected none", info.bi_compression));
        }
        if info.bi_width <= 0 {
            return unsupported(format!("width {}", info.bi_width));
        }
        if info.bi_height == 0 {
            return unsupported("height 0".to_string());
        }
        Ok(())
    }

    /// Width in pixels. Meaningful after [`BmpHeader::validate`].
    #[inline]
    pub fn width(&self) -> u32 {
        self.info.bi_width.unsigned_abs()
    }

    /// Height in pixels, regardless of row order.
    #[inline]
    pub fn height(&self) -> u32 {
        self.info.bi_height.unsigned_abs()
    }

    /// Returns `true` if rows are stored top row first.
    #[inline]
    pub fn is_top_down(&self) -> bool {
        self.info.bi_height < 0
    }

    /// Image row stored at on-disk row `disk_row`.
    #[inline]
    fn image_row(&self, disk_row: u32) -> u32 {
        if self.is_top_down() {
            disk_row
        } else {
            self.height() - 1 - disk_row
        }
    }
}

// === Bitmap ===

/// A decoded BMP: its headers plus a top-down pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Headers as read, or as built by [`Bitmap::new`].
    pub header: BmpHeader,
    /// Pixels, top row first.
    pub image: Image,
}

impl Bitmap {
    /// Wraps an image with a fresh bottom-up header.
    pub fn new(image: Image) -> IoResult<Self> {
        let header = BmpHeader::for_dimensions(image.width(), image.height())?;
        Ok(Self { header, image })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    fn check_dimensions(&self) -> IoResult<()> {
        let (hw, hh) = (self.header.width(), self.header.height());
        let (iw, ih) = self.image.dimensions();
        if (hw, hh) != (iw, ih) {
            return Err(IoError::HeaderMismatch {
                header_width: hw,
                header_height: hh,
                image_width: iw,
                image_height: ih,
            });
        }
        Ok(())
    }
}

// === Reader ===

/// Options for [`BmpReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpReaderOptions {
    /// Accept files with negative `bi_height`.
    pub allow_top_down: bool,
}

impl Default for BmpReaderOptions {
    fn default() -> Self {
        Self { allow_top_down: true }
    }
}

/// BMP format reader.
///
/// # Example
///
/// ```rust,ignore
/// use bmpfx_io::bmp::BmpReader;
/// use bmpfx_io::FormatReader;
///
/// let reader = BmpReader::new();
/// let bitmap = reader.read("photo.bmp")?;
/// println!("{}x{}", bitmap.width(), bitmap.height());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BmpReader {
    options: BmpReaderOptions,
}

impl BmpReader {
    /// Creates a reader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes headers and pixel rows from a source of `len` bytes.
    fn read_from<R: Read>(&self, reader: &mut R, len: u64) -> IoResult<Bitmap> {
        let header = BmpHeader::read_from(reader)?;
        header.validate()?;
        if header.is_top_down() && !self.options.allow_top_down {
            return Err(IoError::UnsupportedFormat("top-down rows".to_string()));
        }

        let (width, height) = (header.width(), header.height());
        debug!(width, height, top_down = header.is_top_down(), "BMP header");

        // The grid is sized from the header, so check the rows exist first
        let needed = (row_stride(width) as u64).saturating_mul(height as u64);
        let available = len.saturating_sub(PIXEL_DATA_OFFSET as u64);
        if available < needed {
            return Err(IoError::Read(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("pixel data needs {needed} bytes, {available} present"),
            )));
        }

        let mut image = Image::new(width, height)?;
        let mut row_buf = vec![0u8; row_stride(width)];
        let pixel_bytes = width as usize * 3;

        for disk_row in 0..height {
            reader.read_exact(&mut row_buf).map_err(IoError::Read)?;
            let row = image.row_mut(header.image_row(disk_row));
            for (px, bgr) in row.iter_mut().zip(row_buf[..pixel_bytes].chunks_exact(3)) {
                *px = Pixel::from_bgr([bgr[0], bgr[1], bgr[2]]);
            }
        }
        trace!(rows = height, stride = row_buf.len(), "BMP pixel rows read");

        Ok(Bitmap { header, image })
    }
}

impl FormatReader<BmpReaderOptions> for BmpReader {
    fn format_name(&self) -> &'static str {
        "BMP"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["bmp", "dib"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.len() >= 2 && u16::from_le_bytes([header[0], header[1]]) == MAGIC
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Bitmap> {
        let path = path.as_ref();
        trace!(path = %path.display(), "BmpReader::read");
        let file = File::open(path).map_err(|source| IoError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let len = file.metadata().map_err(IoError::Read)?.len();
        self.read_from(&mut BufReader::new(file), len)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<Bitmap> {
        self.read_from(&mut Cursor::new(data), data.len() as u64)
    }

    fn with_options(options: BmpReaderOptions) -> Self {
        Self { options }
    }
}

// === Writer ===

/// Which header [`BmpWriter`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Write [`Bitmap::header`] unchanged, keeping its row order.
    #[default]
    Preserve,
    /// Write a fresh bottom-up header built from the image dimensions.
    Regenerate,
}

/// Options for [`BmpWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BmpWriterOptions {
    /// Header policy.
    pub header: HeaderMode,
}

/// BMP format writer.
///
/// Rows are padded with zero bytes.
///
/// # Example
///
/// ```rust,ignore
/// use bmpfx_io::bmp::{BmpWriter, BmpWriterOptions, HeaderMode};
/// use bmpfx_io::FormatWriter;
///
/// let writer = BmpWriter::with_options(BmpWriterOptions {
///     header: HeaderMode::Regenerate,
/// });
/// writer.write("output.bmp", &bitmap)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct BmpWriter {
    options: BmpWriterOptions,
}

impl BmpWriter {
    /// Creates a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the header that will be written for `bitmap`.
    fn header_for(&self, bitmap: &Bitmap) -> IoResult<BmpHeader> {
        match self.options.header {
            HeaderMode::Preserve => {
                bitmap.check_dimensions()?;
                Ok(bitmap.header)
            }
            HeaderMode::Regenerate => BmpHeader::for_dimensions(bitmap.width(), bitmap.height()),
        }
    }

    /// Encodes headers and pixel rows into any byte sink.
    fn write_to<W: Write>(&self, writer: &mut W, header: &BmpHeader, image: &Image) -> IoResult<()> {
        header.write_to(writer).map_err(IoError::Write)?;

        let (width, height) = image.dimensions();
        let mut row_buf = vec![0u8; row_stride(width)];
        for disk_row in 0..height {
            let row = image.row(header.image_row(disk_row));
            for (bgr, px) in row_buf.chunks_exact_mut(3).zip(row) {
                bgr.copy_from_slice(&px.to_bgr());
            }
            writer.write_all(&row_buf).map_err(IoError::Write)?;
        }
        trace!(rows = height, stride = row_buf.len(), "BMP pixel rows written");
        Ok(())
    }
}

impl FormatWriter<BmpWriterOptions> for BmpWriter {
    fn format_name(&self) -> &'static str {
        "BMP"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["bmp", "dib"]
    }

    fn write<P: AsRef<Path>>(&self, path: P, bitmap: &Bitmap) -> IoResult<()> {
        let path = path.as_ref();
        trace!(path = %path.display(), "BmpWriter::write");
        // Reject a bad header before the file is created
        let header = self.header_for(bitmap)?;
        let file = File::create(path).map_err(|source| IoError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, &header, &bitmap.image)?;
        writer.flush().map_err(IoError::Write)
    }

    fn write_to_memory(&self, bitmap: &Bitmap) -> IoResult<Vec<u8>> {
        let header = self.header_for(bitmap)?;
        let mut buf = Vec::with_capacity(
            PIXEL_DATA_OFFSET as usize + row_stride(bitmap.width()) * bitmap.height() as usize,
        );
        self.write_to(&mut buf, &header, &bitmap.image)?;
        Ok(buf)
    }

    fn with_options(options: BmpWriterOptions) -> Self {
        Self { options }
    }
}

// === Convenience ===

/// Reads a BMP file with default options.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    BmpReader::new().read(path)
}

/// Writes a BMP file with default options.
pub fn write<P: AsRef<Path>>(path: P, bitmap: &Bitmap) -> IoResult<()> {
    BmpWriter::new().write(path, bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(header: &BmpHeader) -> Vec<u8> {
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        buf
    }

    /// 2x2 bottom-up file: top row red, green; bottom row blue, white.
    fn two_by_two() -> Vec<u8> {
        let mut bytes = header_bytes(&BmpHeader::for_dimensions(2, 2).unwrap());
        // Bottom row first, 6 pixel bytes + 2 padding
        bytes.extend_from_slice(&[255, 0, 0, 255, 255, 255, 0, 0]);
        bytes.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0]);
        bytes
    }

    #[test]
    fn test_row_padding() {
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(5), 1);
        assert_eq!(row_stride(1), 4);
        assert_eq!(row_stride(3), 12);
        assert_eq!(row_stride(4), 12);
    }

    #[test]
    fn test_header_layout() {
        let header = BmpHeader::for_dimensions(3, 2).unwrap();
        let bytes = header_bytes(&header);
        assert_eq!(bytes.len(), PIXEL_DATA_OFFSET as usize);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]), 54 + 24);
        assert_eq!(u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]), 54);
        assert_eq!(u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]), 40);
        assert_eq!(i32::from_le_bytes([bytes[18], bytes[19], bytes[20], bytes[21]]), 3);
        assert_eq!(i32::from_le_bytes([bytes[22], bytes[23], bytes[24], bytes[25]]), 2);
        assert_eq!(u16::from_le_bytes([bytes[28], bytes[29]]), 24);

        let parsed = BmpHeader::read_from(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(parsed, header);
        parsed.validate().unwrap();
    }

    #[test]
    fn test_read_bottom_up() {
        let bitmap = BmpReader::new().read_from_memory(&two_by_two()).unwrap();
        assert_eq!(bitmap.image.dimensions(), (2, 2));
        assert_eq!(bitmap.image.pixel(0, 0), Pixel::new(255, 0, 0));
        assert_eq!(bitmap.image.pixel(1, 0), Pixel::new(0, 255, 0));
        assert_eq!(bitmap.image.pixel(0, 1), Pixel::new(0, 0, 255));
        assert_eq!(bitmap.image.pixel(1, 1), Pixel::WHITE);
        assert!(!bitmap.header.is_top_down());
    }

    #[test]
    fn test_read_top_down() {
        let mut header = BmpHeader::for_dimensions(1, 2).unwrap();
        header.info.bi_height = -2;
        let mut bytes = header_bytes(&header);
        bytes.extend_from_slice(&[10, 20, 30, 0]); // top row first
        bytes.extend_from_slice(&[40, 50, 60, 0]);

        let bitmap = BmpReader::new().read_from_memory(&bytes).unwrap();
        assert!(bitmap.header.is_top_down());
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.image.pixel(0, 0), Pixel::new(30, 20, 10));
        assert_eq!(bitmap.image.pixel(0, 1), Pixel::new(60, 50, 40));

        let out = BmpWriter::new().write_to_memory(&bitmap).unwrap();
        assert_eq!(out, bytes);

        let strict = BmpReader::with_options(BmpReaderOptions { allow_top_down: false });
        assert!(matches!(strict.read_from_memory(&bytes), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_write_matches_input() {
        let bytes = two_by_two();
        let bitmap = BmpReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(BmpWriter::new().write_to_memory(&bitmap).unwrap(), bytes);
    }

    #[test]
    fn test_padding_written_as_zero() {
        // Input padding bytes are nonzero; output padding must be zero
        let mut bytes = header_bytes(&BmpHeader::for_dimensions(1, 1).unwrap());
        bytes.extend_from_slice(&[1, 2, 3, 0xAA]);
        let bitmap = BmpReader::new().read_from_memory(&bytes).unwrap();
        let out = BmpWriter::new().write_to_memory(&bitmap).unwrap();
        assert_eq!(&out[54..], &[1, 2, 3, 0]);
    }

    #[test]
    fn test_short_header_is_malformed() {
        let bytes = two_by_two();
        for len in [0, 2, 13, 14, 30, 53] {
            let err = BmpReader::new().read_from_memory(&bytes[..len]).unwrap_err();
            assert!(matches!(err, IoError::MalformedHeader(_)), "len {len}: {err}");
        }
    }

    #[test]
    fn test_short_pixel_data_is_read_error() {
        let bytes = two_by_two();
        let err = BmpReader::new().read_from_memory(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, IoError::Read(_)));
    }

    #[test]
    fn test_claimed_size_checked_before_allocation() {
        // Header only, claiming 40000x40000 (about 4.8 GB of rows)
        let mut header = BmpHeader::for_dimensions(1, 1).unwrap();
        header.info.bi_width = 40_000;
        header.info.bi_height = 40_000;
        let bytes = header_bytes(&header);
        let err = BmpReader::new().read_from_memory(&bytes).unwrap_err();
        match err {
            IoError::Read(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected read error, got {other}"),
        }
    }

    #[test]
    fn test_validate_rejections() {
        let good = BmpHeader::for_dimensions(4, 4).unwrap();
        let cases: [fn(&mut BmpHeader); 7] = [
            |h| h.file.bf_type = 0x4D43,
            |h| h.file.bf_off_bits = 138,
            |h| h.info.bi_size = 124,
            |h| h.info.bi_bit_count = 32,
            |h| h.info.bi_compression = 1,
            |h| h.info.bi_width = 0,
            |h| h.info.bi_height = 0,
        ];
        for mutate in cases {
            let mut h = good;
            mutate(&mut h);
            assert!(matches!(h.validate(), Err(IoError::UnsupportedFormat(_))), "{h:?}");
        }
    }

    #[test]
    fn test_can_read() {
        let reader = BmpReader::new();
        assert!(reader.can_read(b"BM\x00\x00"));
        assert!(!reader.can_read(b"B"));
        assert!(!reader.can_read(b"\x89PNG"));
        assert_eq!(reader.format_name(), "BMP");
        assert!(reader.extensions().contains(&"bmp"));
    }

    #[test]
    fn test_header_mismatch() {
        let mut bitmap = Bitmap::new(Image::new(2, 2).unwrap()).unwrap();
        bitmap.image = Image::new(3, 2).unwrap();
        let err = BmpWriter::new().write_to_memory(&bitmap).unwrap_err();
        assert!(matches!(err, IoError::HeaderMismatch { header_width: 2, image_width: 3, .. }));

        let regen = BmpWriter::with_options(BmpWriterOptions { header: HeaderMode::Regenerate });
        let out = regen.write_to_memory(&bitmap).unwrap();
        assert_eq!(out.len(), 54 + 12 * 2);
    }

    #[test]
    fn test_for_dimensions_rejects_oversize() {
        assert!(matches!(
            BmpHeader::for_dimensions(u32::MAX, 1),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            BmpHeader::for_dimensions(60_000, 60_000),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
