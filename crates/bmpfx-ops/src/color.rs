//! Pointwise color operations.
//!
//! # Example
//!
//! ```rust
//! use bmpfx_core::{Image, Pixel};
//! use bmpfx_ops::color::grayscale;
//!
//! let mut img = Image::filled(2, 2, Pixel::new(1, 2, 2)).unwrap();
//! grayscale(&mut img);
//! assert_eq!(img.pixel(1, 1), Pixel::gray(2)); // 5/3 = 1.67 -> 2
//! ```

use bmpfx_core::{Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Converts an image to grayscale in place.
///
/// Each pixel becomes the unweighted mean of its three channels, rounded
/// half away from zero, written to all three channels.
pub fn grayscale(image: &mut Image) {
    trace!(width = image.width(), height = image.height(), "grayscale");
    image.map_pixels(|px| Pixel::gray(channel_mean(px)));
}

/// Rounded mean of the three channels of `px`.
#[inline]
pub fn channel_mean(px: Pixel) -> u8 {
    let sum = px.r as u32 + px.g as u32 + px.b as u32;
    // Mean of three u8 values is already within 0..=255
    (sum as f64 / 3.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_mean_rounding() {
        assert_eq!(channel_mean(Pixel::new(255, 0, 0)), 85);
        assert_eq!(channel_mean(Pixel::new(1, 1, 2)), 1); // 1.33
        assert_eq!(channel_mean(Pixel::new(1, 2, 2)), 2); // 1.67
        assert_eq!(channel_mean(Pixel::new(255, 255, 255)), 255);
        assert_eq!(channel_mean(Pixel::new(0, 0, 0)), 0);
        assert_eq!(channel_mean(Pixel::new(0, 0, 1)), 0);
        assert_eq!(channel_mean(Pixel::new(0, 1, 1)), 1); // 0.67
    }

    #[test]
    fn test_grayscale_all_channels_equal() {
        let data = (0..16u8)
            .map(|i| Pixel::new(i * 13, i * 7, 255 - i * 11))
            .collect();
        let mut img = Image::from_pixels(4, 4, data).unwrap();
        let original = img.clone();
        grayscale(&mut img);

        assert_eq!(img.dimensions(), (4, 4));
        for (x, y, px) in img.pixels() {
            assert!(px.is_gray());
            assert_eq!(px.r, channel_mean(original.pixel(x, y)));
        }
    }

    #[test]
    fn test_grayscale_is_idempotent() {
        let mut img = Image::filled(3, 1, Pixel::new(10, 200, 31)).unwrap();
        grayscale(&mut img);
        let once = img.clone();
        grayscale(&mut img);
        assert_eq!(img, once);
    }
}
