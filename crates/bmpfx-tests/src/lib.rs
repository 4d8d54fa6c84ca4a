//! End-to-end tests for the bmpfx crates.
//!
//! Each test goes through real files: encode a synthetic bitmap, decode it,
//! run a filter, encode the result and decode it again.

#[cfg(test)]
mod tests {
    use bmpfx_core::{Image, Pixel};
    use bmpfx_io::{Bitmap, FormatWriter};
    use bmpfx_ops::Filter;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    /// Deterministic non-uniform test pattern.
    fn pattern(width: u32, height: u32) -> Image {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                Pixel::new(
                    (x * 37 + y * 11) as u8,
                    (x * 5 + y * 53) as u8,
                    (x * y * 3 + 17) as u8,
                )
            })
            .collect();
        Image::from_pixels(width, height, data).unwrap()
    }

    /// Writes `image`, runs `filter` through the files, returns the decoded output.
    fn filter_via_files(dir: &Path, image: Image, filter: Filter) -> Bitmap {
        let input = dir.join("in.bmp");
        let output = dir.join(format!("out_{}.bmp", filter.name()));
        bmpfx_io::write(&input, &Bitmap::new(image).unwrap()).unwrap();

        let mut bitmap = bmpfx_io::read(&input).unwrap();
        filter.apply(&mut bitmap.image).unwrap();
        bmpfx_io::write(&output, &bitmap).unwrap();

        bmpfx_io::read(&output).unwrap()
    }

    #[test]
    fn test_identity_roundtrip_bit_exact() {
        let dir = tempdir().unwrap();
        for (w, h) in [(1, 1), (2, 3), (3, 2), (4, 4), (5, 7), (17, 9)] {
            let path = dir.path().join("a.bmp");
            bmpfx_io::write(&path, &Bitmap::new(pattern(w, h)).unwrap()).unwrap();
            let original = fs::read(&path).unwrap();

            let bitmap = bmpfx_io::read(&path).unwrap();
            let copy = dir.path().join("b.bmp");
            bmpfx_io::write(&copy, &bitmap).unwrap();

            assert_eq!(fs::read(&copy).unwrap(), original, "{w}x{h}");
        }
    }

    #[test]
    fn test_top_down_roundtrip_bit_exact() {
        let dir = tempdir().unwrap();
        let mut bitmap = Bitmap::new(pattern(3, 4)).unwrap();
        bitmap.header.info.bi_height = -4;

        let path = dir.path().join("td.bmp");
        bmpfx_io::write(&path, &bitmap).unwrap();
        let decoded = bmpfx_io::read(&path).unwrap();
        assert_eq!(decoded, bitmap);

        let bytes = bmpfx_io::write_to_memory(&decoded).unwrap();
        assert_eq!(bytes, fs::read(&path).unwrap());
    }

    #[test]
    fn test_all_filters_preserve_dimensions() {
        let dir = tempdir().unwrap();
        for (w, h) in [(1, 1), (1, 5), (5, 1), (2, 2), (3, 3), (6, 4)] {
            for filter in Filter::ALL {
                let out = filter_via_files(dir.path(), pattern(w, h), filter);
                assert_eq!(out.image.dimensions(), (w, h), "{filter} {w}x{h}");
                assert_eq!(out.header.width(), w);
                assert_eq!(out.header.height(), h);
            }
        }
    }

    #[test]
    fn test_grayscale_through_files() {
        let dir = tempdir().unwrap();
        let src = pattern(5, 3);
        let out = filter_via_files(dir.path(), src.clone(), Filter::Grayscale);
        for (x, y, px) in out.image.pixels() {
            let orig = src.pixel(x, y);
            let sum = orig.r as f64 + orig.g as f64 + orig.b as f64;
            assert!(px.is_gray());
            assert_eq!(px.r, (sum / 3.0).round() as u8);
        }
    }

    #[test]
    fn test_reflect_twice_restores_file() {
        let dir = tempdir().unwrap();
        let src = pattern(7, 3);
        let once = filter_via_files(dir.path(), src.clone(), Filter::Reflect);
        for y in 0..3 {
            for x in 0..7 {
                assert_eq!(once.image.pixel(x, y), src.pixel(6 - x, y));
            }
        }
        let twice = filter_via_files(dir.path(), once.image, Filter::Reflect);
        assert_eq!(twice.image, src);
    }

    #[test]
    fn test_blur_uniform_through_files() {
        let dir = tempdir().unwrap();
        let color = Pixel::new(12, 130, 250);
        for (w, h) in [(1, 1), (3, 3), (8, 5)] {
            let out = filter_via_files(dir.path(), Image::filled(w, h, color).unwrap(), Filter::Blur);
            assert!(out.image.data().iter().all(|&px| px == color), "{w}x{h}");
        }
    }

    #[test]
    fn test_edges_vertical_boundary_through_files() {
        let dir = tempdir().unwrap();
        let mut src = Image::filled(10, 6, Pixel::gray(30)).unwrap();
        for y in 0..6 {
            for x in 5..10 {
                src.set_pixel(x, y, Pixel::gray(200));
            }
        }
        let out = filter_via_files(dir.path(), src, Filter::Edges);
        for y in 1..5 {
            assert_eq!(out.image.pixel(4, y), Pixel::WHITE);
            assert_eq!(out.image.pixel(5, y), Pixel::WHITE);
            assert_eq!(out.image.pixel(2, y), Pixel::BLACK);
            assert_eq!(out.image.pixel(7, y), Pixel::BLACK);
        }
    }

    #[test]
    fn test_filtered_output_keeps_input_header() {
        let dir = tempdir().unwrap();
        let mut bitmap = Bitmap::new(pattern(3, 3)).unwrap();
        bitmap.header.info.bi_x_pels_per_meter = 3780;
        bitmap.header.file.bf_reserved1 = 7;
        let input = dir.path().join("in.bmp");
        bmpfx_io::BmpWriter::new().write(&input, &bitmap).unwrap();

        let mut decoded = bmpfx_io::read(&input).unwrap();
        Filter::Blur.apply(&mut decoded.image).unwrap();
        let output = dir.path().join("out.bmp");
        bmpfx_io::write(&output, &decoded).unwrap();

        let out_bytes = fs::read(&output).unwrap();
        let in_bytes = fs::read(&input).unwrap();
        assert_eq!(out_bytes.len(), in_bytes.len());
        assert_eq!(&out_bytes[..54], &in_bytes[..54]);
    }
}
