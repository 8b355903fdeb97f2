//! Tests for grayscale image loading and export

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use mrf_inpaint::InpaintError;
    use mrf_inpaint::io::image::{export_grayscale, load_grayscale, to_gray_image};
    use ndarray::{Array2, array};
    use tempfile::TempDir;

    // Tests matrices are indexed [row, col] against image (x, y)
    // Verified by swapping width and height in the conversion
    #[test]
    fn test_to_gray_image_orientation() {
        let intensities = array![[1_u8, 2, 3], [4, 5, 6]];
        let img = to_gray_image(intensities.view()).unwrap();

        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 0).0[0], 3);
        assert_eq!(img.get_pixel(0, 1).0[0], 4);
    }

    #[test]
    fn test_export_then_load_preserves_pixels() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sub").join("matrix.png");
        let intensities = Array2::from_shape_fn((7, 4), |(r, c)| (r * 30 + c) as u8);

        export_grayscale(&intensities, &path).unwrap();
        assert_eq!(load_grayscale(&path).unwrap(), intensities);
    }

    // Tests color input is reduced to luma
    // Verified by reading only the red channel
    #[test]
    fn test_load_converts_color_to_gray() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("color.png");
        let mut color = RgbImage::new(2, 1);
        color.put_pixel(0, 0, Rgb([200, 200, 200]));
        color.put_pixel(1, 0, Rgb([255, 0, 0]));
        color.save(&path).unwrap();

        let intensities = load_grayscale(&path).unwrap();
        assert_eq!(intensities.dim(), (1, 2));
        assert_eq!(intensities[[0, 0]], 200);
        assert!(intensities[[0, 1]] < 255);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_grayscale(&temp_dir.path().join("absent.png"));

        assert!(matches!(result, Err(InpaintError::ImageLoad { .. })));
    }

    #[test]
    fn test_export_empty_matrix() {
        let temp_dir = TempDir::new().unwrap();
        let empty: Array2<u8> = Array2::zeros((0, 3));

        let result = export_grayscale(&empty, &temp_dir.path().join("empty.png"));
        assert!(matches!(result, Err(InpaintError::InvalidSourceData { .. })));
    }
}
