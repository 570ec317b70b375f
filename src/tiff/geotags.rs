//! GeoTIFF tag and key name registry
//!
//! Names for GeoTIFF tags, GeoKeys and coordinate system codes, loaded
//! from an embedded TOML table. The names only feed logging and
//! diagnostics; parsing never depends on them.

use std::collections::HashMap;
use lazy_static::lazy_static;
use crate::errors::{MaskError, MaskResult};
use crate::tiff::constants::tags;

lazy_static! {
    // Parse the embedded TOML registry at first use
    static ref GEOTIFF_DEFINITIONS: GeoTiffDefinitions = {
        let content = include_str!("../../geotiff_tags.toml");
        GeoTiffDefinitions::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse GeoTIFF tag definitions: {}", e);
            GeoTiffDefinitions::default()
        })
    };
}

/// Container for GeoTIFF tag and key definitions
#[derive(Debug, Default)]
pub struct GeoTiffDefinitions {
    /// Maps tag IDs to tag names
    pub tag_names: HashMap<u16, String>,
    /// Maps GeoKey IDs to key names
    pub key_names: HashMap<u16, String>,
    /// Maps model type codes to names
    pub model_type_names: HashMap<u16, String>,
    /// Maps raster type codes to names
    pub raster_type_names: HashMap<u16, String>,
    /// Maps linear unit codes to names
    pub linear_unit_names: HashMap<u16, String>,
    /// Maps geographic CS codes to names
    pub geographic_cs_names: HashMap<u16, String>,
    /// Maps projected CS codes to names
    pub projected_cs_names: HashMap<u16, String>,
}

impl GeoTiffDefinitions {
    /// Parse GeoTIFF definitions from a TOML string
    pub fn from_str(content: &str) -> MaskResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(MaskError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut defs = GeoTiffDefinitions::default();

        Self::parse_code_table(&toml_value, "tag_ids", &mut defs.tag_names);
        Self::parse_code_table(&toml_value, "key_ids", &mut defs.key_names);
        Self::parse_code_table(&toml_value, "model_type_codes", &mut defs.model_type_names);
        Self::parse_code_table(&toml_value, "raster_type_codes", &mut defs.raster_type_names);
        Self::parse_code_table(&toml_value, "linear_unit_codes", &mut defs.linear_unit_names);
        Self::parse_code_table(&toml_value, "geographic_cs_codes", &mut defs.geographic_cs_names);
        Self::parse_code_table(&toml_value, "projected_cs_codes", &mut defs.projected_cs_names);

        Ok(defs)
    }

    /// Parse one code table from the TOML document into a map
    fn parse_code_table(toml_value: &toml::Value, table: &str, target: &mut HashMap<u16, String>) {
        if let Some(table) = toml_value.get(table).and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(id), Some(name)) = (k.parse::<u16>(), v.as_str()) {
                    target.insert(id, name.to_string());
                }
            }
        }
    }
}

/// A single entry in a GeoKey directory
#[derive(Debug, Clone, Copy)]
pub struct GeoKeyEntry {
    /// GeoKey ID
    pub key_id: u16,
    /// TIFF tag holding the value (0 = inline in value_offset)
    pub tiff_tag_location: u16,
    /// Number of values
    pub count: u16,
    /// Value or offset into the referenced tag
    pub value_offset: u16,
}

impl GeoKeyEntry {
    /// Create a new GeoKey entry
    pub fn new(key_id: u16, tiff_tag_location: u16, count: u16, value_offset: u16) -> Self {
        GeoKeyEntry { key_id, tiff_tag_location, count, value_offset }
    }
}

/// Get the name of a GeoTIFF tag, or "Unknown" if not registered
pub fn get_tag_name(tag: u16) -> String {
    GEOTIFF_DEFINITIONS.tag_names.get(&tag)
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Get the name of a GeoKey, or "Unknown" if not registered
pub fn get_key_name(key_id: u16) -> String {
    GEOTIFF_DEFINITIONS.key_names.get(&key_id)
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Get the name of a GTModelType code, or "Unknown" if not registered
pub fn get_model_type_name(code: u16) -> String {
    GEOTIFF_DEFINITIONS.model_type_names.get(&code)
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Get the name of a GTRasterType code, or "Unknown" if not registered
pub fn get_raster_type_name(code: u16) -> String {
    GEOTIFF_DEFINITIONS.raster_type_names.get(&code)
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Get the name of a linear unit code, or "Unknown" if not registered
pub fn get_linear_unit_name(code: u16) -> String {
    GEOTIFF_DEFINITIONS.linear_unit_names.get(&code)
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Get a description for a geographic CS code
pub fn get_geographic_cs_name(code: u16) -> String {
    GEOTIFF_DEFINITIONS.geographic_cs_names.get(&code)
        .cloned()
        .unwrap_or_else(|| format!("EPSG:{}", code))
}

/// Get a description for a projected CS code
pub fn get_projected_cs_name(code: u16) -> String {
    GEOTIFF_DEFINITIONS.projected_cs_names.get(&code)
        .cloned()
        .unwrap_or_else(|| format!("EPSG:{}", code))
}

/// Check whether a tag carries GeoTIFF metadata
pub fn is_geotiff_tag(tag: u16) -> bool {
    matches!(tag,
        tags::MODEL_PIXEL_SCALE_TAG
        | tags::MODEL_TIEPOINT_TAG
        | tags::MODEL_TRANSFORMATION_TAG
        | tags::GEO_KEY_DIRECTORY_TAG
        | tags::GEO_DOUBLE_PARAMS_TAG
        | tags::GEO_ASCII_PARAMS_TAG)
}
