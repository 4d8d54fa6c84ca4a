//! 24-bit pixel type.
//!
//! A [`Pixel`] holds three independent 8-bit channels and no alpha. Fields
//! are laid out blue, green, red to match the byte order of uncompressed
//! 24-bit BMP pixel data, so a row of pixels maps one-to-one onto a row of
//! file bytes (before padding).
//!
//! ```
//! use bmpfx_core::Pixel;
//!
//! let px = Pixel::new(255, 128, 0);
//! assert_eq!(px.to_bgr(), [0, 128, 255]);
//! assert_eq!(Pixel::from_bgr([0, 128, 255]), px);
//! ```

use std::fmt;

/// One pixel: three 8-bit channels in blue-green-red order.
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// Blue channel value.
    pub b: u8,
    /// Green channel value.
    pub g: u8,
    /// Red channel value.
    pub r: u8,
}

impl Pixel {
    /// Black (all channels zero).
    pub const BLACK: Pixel = Pixel::gray(0);

    /// White (all channels 255).
    pub const WHITE: Pixel = Pixel::gray(255);

    /// Creates a pixel from red, green and blue values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }

    /// Creates a gray pixel with all three channels set to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { b: v, g: v, r: v }
    }

    /// Creates a pixel from bytes in file order `[B, G, R]`.
    #[inline]
    pub const fn from_bgr(bytes: [u8; 3]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
        }
    }

    /// Returns the channels in file order `[B, G, R]`.
    #[inline]
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    /// Returns the channels as an array for per-channel arithmetic.
    ///
    /// The order is the same as [`to_bgr`](Self::to_bgr); filters that treat
    /// channels independently only need a stable order, not a named one.
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        self.to_bgr()
    }

    /// Inverse of [`channels`](Self::channels).
    #[inline]
    pub const fn from_channels(channels: [u8; 3]) -> Self {
        Self::from_bgr(channels)
    }

    /// Returns `true` if all three channels hold the same value.
    #[inline]
    pub fn is_gray(self) -> bool {
        self.b == self.g && self.g == self.r
    }
}

impl fmt::Debug for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pixel(r={}, g={}, b={})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Pixel {
    /// Interprets the array as `[B, G, R]`.
    #[inline]
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bgr(bytes)
    }
}

impl From<Pixel> for [u8; 3] {
    #[inline]
    fn from(px: Pixel) -> Self {
        px.to_bgr()
    }
}
