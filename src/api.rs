//! High-level mask vectorization
//!
//! Ties the pipeline together: open the raster, trace same-valued
//! regions, keep the mask regions, and write them out as a shapefile.

use std::path::PathBuf;
use std::time::Instant;

use log::info;

use crate::errors::MaskResult;
use crate::raster::RasterSource;
use crate::shapefile::ShapefileWriter;
use crate::utils::logger::Logger;
use crate::utils::path_utils::resolve_output_path;
use crate::vector::{ShapeTracer, TracedShape};

/// Pixel value that marks mask membership
const MASK_VALUE: f64 = 1.0;

/// Log file written next to the working directory by default
const DEFAULT_LOG_FILE: &str = "maskvec.log";

/// Mask vectorization pipeline
///
/// Owns the file logger so repeated runs append to one log. For
/// one-shot use, [`raster_mask_to_shapefile`] wraps this with the
/// default log file.
pub struct MaskVec {
    logger: Logger,
}

impl MaskVec {
    /// Create a pipeline logging to `log_file`, or the default
    pub fn new(log_file: Option<&str>) -> MaskResult<Self> {
        let logger = Logger::new(log_file.unwrap_or(DEFAULT_LOG_FILE))?;
        Ok(MaskVec { logger })
    }

    /// Vectorize the mask band of a raster into a polygon shapefile
    ///
    /// Reads band 1 of `raster`, traces regions of same-valued pixels,
    /// keeps those valued 1, and writes them with their planar areas
    /// to `outname` inside `outdir` (or next to the raster when no
    /// directory is given). Prints the elapsed seconds when done.
    ///
    /// # Arguments
    /// * `raster` - Path to the input GeoTIFF
    /// * `outname` - Output shapefile name, `.shp` appended if bare
    /// * `outdir` - Output directory, defaults to the raster's own
    ///
    /// # Returns
    /// The path of the written `.shp` file
    pub fn vectorize(&self, raster: &str, outname: &str,
                     outdir: Option<&str>) -> MaskResult<String> {
        let started = Instant::now();
        self.logger.log(&format!("Vectorizing {} into {}", raster, outname))?;

        let output = ensure_shp_extension(resolve_output_path(raster, outname, outdir));

        let source = RasterSource::open(raster)?;
        let shapes = ShapeTracer::new(&source.band, &source.transform).trace();

        let mask_shapes: Vec<TracedShape> = shapes.into_iter()
            .filter(|shape| shape.value == MASK_VALUE)
            .collect();
        info!("Kept {} mask regions", mask_shapes.len());

        ShapefileWriter::new(&mask_shapes, source.crs.as_ref()).write(&output)?;

        println!("{}", started.elapsed().as_secs_f64());
        Ok(output.to_string_lossy().into_owned())
    }
}

/// Vectorize a mask raster with default logging
///
/// Convenience wrapper around [`MaskVec::vectorize`].
pub fn raster_mask_to_shapefile(raster: &str, outname: &str,
                                outdir: Option<&str>) -> MaskResult<String> {
    MaskVec::new(None)?.vectorize(raster, outname, outdir)
}

/// Append `.shp` when the output name carries no extension
fn ensure_shp_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("shp");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name_gets_shp_extension() {
        let path = ensure_shp_extension(PathBuf::from("/data/out/mask"));
        assert_eq!(path, PathBuf::from("/data/out/mask.shp"));
    }

    #[test]
    fn test_existing_extension_kept() {
        let path = ensure_shp_extension(PathBuf::from("/data/out/mask.shp"));
        assert_eq!(path, PathBuf::from("/data/out/mask.shp"));
    }
}
