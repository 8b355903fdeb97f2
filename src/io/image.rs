//! Grayscale image loading and PNG export

use crate::io::error::{InpaintError, Result};
use image::{GrayImage, Luma};
use ndarray::{Array2, ArrayView2};
use std::path::Path;

/// Load any image the `image` crate can decode as an 8-bit intensity matrix
///
/// The matrix is indexed `[row, col]`, i.e. `[y, x]`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_grayscale(path: &Path) -> Result<Array2<u8>> {
    let img = image::open(path).map_err(|e| InpaintError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    let mut intensities = Array2::zeros((height as usize, width as usize));
    for (x, y, pixel) in luma.enumerate_pixels() {
        if let Some(value) = intensities.get_mut([y as usize, x as usize]) {
            *value = pixel.0[0];
        }
    }

    Ok(intensities)
}

/// Convert an intensity matrix into an 8-bit grayscale image
///
/// # Errors
///
/// Returns an error if a dimension does not fit in `u32`.
pub fn to_gray_image(intensities: ArrayView2<'_, u8>) -> Result<GrayImage> {
    let (rows, cols) = intensities.dim();
    let height = u32::try_from(rows).map_err(|e| InpaintError::InvalidSourceData {
        reason: format!("image height {rows} is too large: {e}"),
    })?;
    let width = u32::try_from(cols).map_err(|e| InpaintError::InvalidSourceData {
        reason: format!("image width {cols} is too large: {e}"),
    })?;

    Ok(GrayImage::from_fn(width, height, |x, y| {
        Luma([intensities
            .get([y as usize, x as usize])
            .copied()
            .unwrap_or(0)])
    }))
}

/// Save an intensity matrix as an image, creating parent directories
///
/// The format follows the path extension.
///
/// # Errors
///
/// Returns an error if:
/// - The matrix has a zero dimension
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_grayscale(intensities: &Array2<u8>, output_path: &Path) -> Result<()> {
    if intensities.is_empty() {
        return Err(InpaintError::InvalidSourceData {
            reason: "Cannot export an empty image".to_string(),
        });
    }

    let img = to_gray_image(intensities.view())?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| InpaintError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| InpaintError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
