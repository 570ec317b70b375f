//! Affine georeferencing transform
//!
//! Maps pixel row/column indices to world coordinates. Built either
//! from the ModelPixelScale + ModelTiepoint tag pair or from the full
//! ModelTransformation matrix of a GeoTIFF.

use crate::errors::{MaskError, MaskResult};
use super::point::Point;

/// Affine mapping from pixel space to world space
///
/// Coefficient layout follows the GDAL geotransform convention:
/// `[origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height]`,
/// where `pixel_height` is negative for north-up rasters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// World X of the raster's top-left corner
    pub origin_x: f64,
    /// Pixel width in world units
    pub pixel_width: f64,
    /// Row rotation term (0 for axis-aligned rasters)
    pub rot_x: f64,
    /// World Y of the raster's top-left corner
    pub origin_y: f64,
    /// Column rotation term (0 for axis-aligned rasters)
    pub rot_y: f64,
    /// Pixel height in world units (negative for north-up)
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Create a transform from raw coefficients
    pub fn new(origin_x: f64, pixel_width: f64, rot_x: f64,
               origin_y: f64, rot_y: f64, pixel_height: f64) -> Self {
        GeoTransform { origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height }
    }

    /// Build a transform from ModelPixelScale and ModelTiepoint values
    ///
    /// The tiepoint anchors raster position (i, j) at world position
    /// (x, y); the scale's Y component is negated per the GeoTIFF
    /// convention that scales are stored positive for north-up files.
    pub fn from_scale_and_tiepoint(scale: &[f64], tiepoint: &[f64]) -> MaskResult<Self> {
        if scale.len() < 2 || tiepoint.len() < 6 {
            return Err(MaskError::MissingGeoreference);
        }

        let (i, j) = (tiepoint[0], tiepoint[1]);
        let (x, y) = (tiepoint[3], tiepoint[4]);
        let pixel_width = scale[0];
        let pixel_height = -scale[1];

        Ok(GeoTransform::new(
            x - i * pixel_width,
            pixel_width,
            0.0,
            y - j * pixel_height,
            0.0,
            pixel_height,
        ))
    }

    /// Build a transform from a 4x4 ModelTransformation matrix
    pub fn from_matrix(matrix: &[f64]) -> MaskResult<Self> {
        if matrix.len() < 16 {
            return Err(MaskError::MissingGeoreference);
        }

        Ok(GeoTransform::new(
            matrix[3], matrix[0], matrix[1],
            matrix[7], matrix[4], matrix[5],
        ))
    }

    /// Map a pixel-space position to world coordinates
    ///
    /// Accepts fractional positions so polygon vertices at pixel
    /// corners map exactly.
    pub fn apply(&self, col: f64, row: f64) -> Point {
        Point::new(
            self.origin_x + col * self.pixel_width + row * self.rot_x,
            self.origin_y + col * self.rot_y + row * self.pixel_height,
        )
    }

    /// Absolute area covered by one pixel in world units
    pub fn pixel_area(&self) -> f64 {
        (self.pixel_width * self.pixel_height - self.rot_x * self.rot_y).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scale_and_tiepoint() {
        // 10m pixels anchored at (500000, 4600000)
        let scale = [10.0, 10.0, 0.0];
        let tiepoint = [0.0, 0.0, 0.0, 500000.0, 4600000.0, 0.0];
        let gt = GeoTransform::from_scale_and_tiepoint(&scale, &tiepoint).unwrap();

        assert_eq!(gt.apply(0.0, 0.0), Point::new(500000.0, 4600000.0));
        assert_eq!(gt.apply(2.0, 3.0), Point::new(500020.0, 4599970.0));
        assert_eq!(gt.pixel_area(), 100.0);
    }

    #[test]
    fn test_nonzero_tiepoint_offset() {
        let scale = [1.0, 1.0, 0.0];
        let tiepoint = [5.0, 5.0, 0.0, 105.0, 205.0, 0.0];
        let gt = GeoTransform::from_scale_and_tiepoint(&scale, &tiepoint).unwrap();

        // Pixel (5,5) must land on the tiepoint's world position
        assert_eq!(gt.apply(5.0, 5.0), Point::new(105.0, 205.0));
        assert_eq!(gt.apply(0.0, 0.0), Point::new(100.0, 210.0));
    }

    #[test]
    fn test_from_matrix() {
        let mut matrix = [0.0; 16];
        matrix[0] = 2.0;   // pixel width
        matrix[3] = 10.0;  // origin x
        matrix[5] = -2.0;  // pixel height
        matrix[7] = 20.0;  // origin y
        let gt = GeoTransform::from_matrix(&matrix).unwrap();

        assert_eq!(gt.apply(1.0, 1.0), Point::new(12.0, 18.0));
    }

    #[test]
    fn test_short_inputs_rejected() {
        assert!(GeoTransform::from_scale_and_tiepoint(&[1.0], &[0.0; 6]).is_err());
        assert!(GeoTransform::from_matrix(&[0.0; 4]).is_err());
    }
}
