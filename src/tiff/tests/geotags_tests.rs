//! Tests for the GeoTIFF name registry

use crate::tiff::geotags::{
    get_key_name, get_linear_unit_name, get_model_type_name, get_raster_type_name,
    get_tag_name,
};

#[test]
fn test_tag_and_key_names_resolve() {
    assert_eq!(get_tag_name(33550), "ModelPixelScale");
    assert_eq!(get_key_name(2048), "GeographicType");
    assert_eq!(get_tag_name(1), "Unknown");
}

#[test]
fn test_geokey_code_names_resolve() {
    assert_eq!(get_model_type_name(2), "Geographic");
    assert_eq!(get_raster_type_name(1), "PixelIsArea");
    assert_eq!(get_linear_unit_name(9001), "Meter");
    assert_eq!(get_model_type_name(0), "Unknown");
}
