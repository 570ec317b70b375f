//! Scoped raster acquisition
//!
//! Opens a raster, reads band 1 and captures the georeferencing, then
//! releases the file handle. Everything downstream works on the
//! in-memory snapshot, so the input file is closed before any output
//! is written.

use std::io::BufReader;
use log::{debug, info};

use crate::coordinate::{CoordinateSystem, CoordinateSystemFactory, GeoTransform};
use crate::errors::{MaskError, MaskResult};
use crate::tiff::geo_key_parser::GeoKeyParser;
use crate::tiff::TiffReader;

use super::band::Band;
use super::strip_reader::StripReader;
use super::tile_reader::TileReader;

/// Band 1 of a raster together with its georeferencing
#[derive(Debug, Clone)]
pub struct RasterSource {
    /// Band 1 sample values
    pub band: Band,
    /// Affine pixel-to-world transform
    pub transform: GeoTransform,
    /// Coordinate reference system, when the raster declares one
    pub crs: Option<CoordinateSystem>,
}

impl RasterSource {
    /// Open a raster file and capture band 1, transform and CRS
    ///
    /// # Arguments
    /// * `path` - Path to a readable GeoTIFF
    ///
    /// # Returns
    /// The captured raster snapshot, or an error when the file cannot
    /// be opened, has no readable band, or carries no georeferencing
    pub fn open(path: &str) -> MaskResult<Self> {
        let mut tiff_reader = TiffReader::new();
        let tiff = tiff_reader.load(path)?;

        let ifd = tiff.main_ifd().ok_or(MaskError::MissingBand)?;

        let band = {
            let file = tiff_reader.create_reader()?;
            let buffered = BufReader::with_capacity(1024 * 1024, file);

            if ifd.is_tiled() {
                debug!("Reading tiled band data");
                TileReader::new(buffered, ifd, &tiff_reader).read_band()?
            } else {
                debug!("Reading stripped band data");
                StripReader::new(buffered, ifd, &tiff_reader).read_band()?
            }
        };

        let handler = tiff_reader.get_byte_order_handler()
            .ok_or_else(|| MaskError::GenericError("Byte order not yet determined".to_string()))?;

        // Pixel scale + tiepoint is the common encoding; fall back to
        // the transformation matrix before giving up.
        let transform = match (
            GeoKeyParser::read_model_pixel_scale_values(ifd, handler, path),
            GeoKeyParser::read_model_tiepoint_values(ifd, handler, path),
        ) {
            (Ok(scale), Ok(tiepoint)) => GeoTransform::from_scale_and_tiepoint(&scale, &tiepoint)?,
            _ => match GeoKeyParser::read_model_transformation_values(ifd, handler, path) {
                Ok(matrix) => GeoTransform::from_matrix(&matrix)?,
                Err(_) => return Err(MaskError::MissingGeoreference),
            },
        };

        let crs = GeoKeyParser::read_epsg_code(ifd, handler, path)?
            .map(CoordinateSystemFactory::from_epsg)
            .transpose()?;

        info!("Opened raster {}: {}x{} band, CRS {}",
              path, band.width, band.height,
              crs.map(|c| c.description()).unwrap_or_else(|| "unknown".to_string()));

        Ok(RasterSource { band, transform, crs })
    }
}
