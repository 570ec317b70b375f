//! GeoTIFF metadata and GeoKey parsing functionality
//!
//! Parses the geographic metadata stored in TIFF files according to the
//! GeoTIFF standard: the GeoKey directory, the model pixel scale and
//! tiepoint tags, and the optional transformation matrix.

use std::fs::File;
use std::io::{Seek, SeekFrom};
use log::debug;

use crate::errors::{MaskError, MaskResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::constants::{geo_keys, tags};
use crate::tiff::geotags::{
    get_geographic_cs_name, get_key_name, get_linear_unit_name, get_model_type_name,
    get_projected_cs_name, get_raster_type_name, GeoKeyEntry,
};
use crate::tiff::ifd::IFD;

/// Parser for GeoTIFF geographic metadata
pub struct GeoKeyParser;

impl GeoKeyParser {
    /// Parse the GeoKey directory from an IFD
    ///
    /// The directory is a header of 4 shorts (version, revision,
    /// minor revision, key count) followed by 4 shorts per key.
    ///
    /// # Arguments
    /// * `ifd` - The IFD containing the GeoKey directory
    /// * `byte_order_handler` - Handler for the file's byte order
    /// * `file_path` - Path to the TIFF file
    ///
    /// # Returns
    /// A vector of GeoKey entries, empty when the tag is absent
    pub fn parse_geo_key_directory(
        ifd: &IFD,
        byte_order_handler: &Box<dyn ByteOrderHandler>,
        file_path: &str
    ) -> MaskResult<Vec<GeoKeyEntry>> {
        let geo_key_dir_entry = match ifd.get_entry(tags::GEO_KEY_DIRECTORY_TAG) {
            Some(entry) => entry,
            None => return Ok(Vec::new()), // No GeoKey directory
        };

        let key_dir_offset = geo_key_dir_entry.value_offset;
        let key_dir_count = geo_key_dir_entry.count;

        // GeoKey directory should have at least 4 values (header)
        if key_dir_count < 4 {
            return Err(MaskError::GenericError("Invalid GeoKey directory header".to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = file;
        reader.seek(SeekFrom::Start(key_dir_offset))?;

        let _key_dir_version = byte_order_handler.read_u16(&mut reader)?;
        let _key_revision = byte_order_handler.read_u16(&mut reader)?;
        let _minor_revision = byte_order_handler.read_u16(&mut reader)?;
        let num_keys = byte_order_handler.read_u16(&mut reader)?;

        debug!("GeoKey directory: version={}, revision={}.{}, keys={}",
               _key_dir_version, _key_revision, _minor_revision, num_keys);

        let mut entries = Vec::with_capacity(num_keys as usize);

        for _ in 0..num_keys {
            let key_id = byte_order_handler.read_u16(&mut reader)?;
            let tiff_tag_location = byte_order_handler.read_u16(&mut reader)?;
            let count = byte_order_handler.read_u16(&mut reader)?;
            let value_offset = byte_order_handler.read_u16(&mut reader)?;

            debug!("GeoKey: id={} ({}), location={}, count={}, offset={}",
                   key_id, get_key_name(key_id), tiff_tag_location, count, value_offset);

            if tiff_tag_location == 0 {
                match key_id {
                    geo_keys::GT_MODEL_TYPE =>
                        debug!("  Model type: {}", get_model_type_name(value_offset)),
                    geo_keys::GT_RASTER_TYPE =>
                        debug!("  Raster space: {}", get_raster_type_name(value_offset)),
                    geo_keys::PROJ_LINEAR_UNITS =>
                        debug!("  Linear units: {}", get_linear_unit_name(value_offset)),
                    _ => {}
                }
            }

            entries.push(GeoKeyEntry::new(key_id, tiff_tag_location, count, value_offset));
        }

        Ok(entries)
    }

    /// Recover the raster's EPSG code from its GeoKey directory
    ///
    /// A projected CS code (key 3072) wins over a geographic one
    /// (key 2048). Codes are only meaningful when stored inline
    /// (tag location 0). Returns None when neither key is present or
    /// the stored code is a placeholder (0, 32767 = user-defined).
    pub fn read_epsg_code(
        ifd: &IFD,
        byte_order_handler: &Box<dyn ByteOrderHandler>,
        file_path: &str
    ) -> MaskResult<Option<u32>> {
        let entries = Self::parse_geo_key_directory(ifd, byte_order_handler, file_path)?;

        let mut geographic = None;
        let mut projected = None;

        for entry in &entries {
            if entry.tiff_tag_location != 0 {
                continue;
            }
            match entry.key_id {
                geo_keys::PROJECTED_CS_TYPE => projected = Some(entry.value_offset),
                geo_keys::GEOGRAPHIC_TYPE => geographic = Some(entry.value_offset),
                _ => {}
            }
        }

        let code = projected.or(geographic)
            .filter(|&c| c != 0 && c != 32767);

        match (code, projected.is_some()) {
            (Some(c), true) => debug!("Projected CS from GeoKeys: {}", get_projected_cs_name(c)),
            (Some(c), false) => debug!("Geographic CS from GeoKeys: {}", get_geographic_cs_name(c)),
            (None, _) => debug!("No usable CS code in GeoKey directory"),
        }

        Ok(code.map(|c| c as u32))
    }

    /// Read model pixel scale values (x_scale, y_scale, z_scale)
    ///
    /// ModelPixelScaleTag (33550) contains the pixel size in map units.
    pub fn read_model_pixel_scale_values(
        ifd: &IFD,
        byte_order_handler: &Box<dyn ByteOrderHandler>,
        file_path: &str
    ) -> MaskResult<Vec<f64>> {
        Self::read_f64_tag_values(ifd, byte_order_handler, file_path, tags::MODEL_PIXEL_SCALE_TAG)
    }

    /// Read model tiepoint values (i,j,k,x,y,z, repeated per tiepoint)
    ///
    /// ModelTiepointTag (33922) links raster coordinates to world
    /// coordinates.
    pub fn read_model_tiepoint_values(
        ifd: &IFD,
        byte_order_handler: &Box<dyn ByteOrderHandler>,
        file_path: &str
    ) -> MaskResult<Vec<f64>> {
        Self::read_f64_tag_values(ifd, byte_order_handler, file_path, tags::MODEL_TIEPOINT_TAG)
    }

    /// Read the 4x4 model transformation matrix (16 doubles)
    ///
    /// ModelTransformationTag (34264) is the alternative to the pixel
    /// scale + tiepoint pair.
    pub fn read_model_transformation_values(
        ifd: &IFD,
        byte_order_handler: &Box<dyn ByteOrderHandler>,
        file_path: &str
    ) -> MaskResult<Vec<f64>> {
        Self::read_f64_tag_values(ifd, byte_order_handler, file_path, tags::MODEL_TRANSFORMATION_TAG)
    }

    /// Read an array of doubles stored at a tag's offset
    fn read_f64_tag_values(
        ifd: &IFD,
        byte_order_handler: &Box<dyn ByteOrderHandler>,
        file_path: &str,
        tag: u16
    ) -> MaskResult<Vec<f64>> {
        let entry = ifd.get_entry(tag)
            .ok_or(MaskError::TagNotFound(tag))?;

        let file = File::open(file_path)?;
        let mut reader = file;
        reader.seek(SeekFrom::Start(entry.value_offset))?;

        let mut values = Vec::with_capacity(entry.count as usize);
        for _ in 0..entry.count {
            values.push(byte_order_handler.read_f64(&mut reader)?);
        }

        Ok(values)
    }
}
