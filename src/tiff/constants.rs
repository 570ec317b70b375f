//! TIFF format constants
//!
//! Constants used throughout the TIFF processing code, trimmed to the
//! tags and codes that band decoding and georeferencing actually touch.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43)
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// BigTIFF offset size (8 bytes)
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const LONG8: u16 = 16;     // BigTIFF 64-bit unsigned integer
    pub const SLONG8: u16 = 17;    // BigTIFF 64-bit signed integer
    pub const IFD8: u16 = 18;      // BigTIFF 64-bit IFD offset
}

/// Standard TIFF tags
pub mod tags {
    // Basic image structure tags
    pub const IMAGE_WIDTH: u16 = 256;              // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257;             // Height of the image in pixels
    pub const BITS_PER_SAMPLE: u16 = 258;          // Bits per component
    pub const COMPRESSION: u16 = 259;              // Compression scheme
    pub const SAMPLES_PER_PIXEL: u16 = 277;        // Number of components per pixel
    pub const ROWS_PER_STRIP: u16 = 278;           // Rows per strip of data
    pub const STRIP_OFFSETS: u16 = 273;            // Offsets to the data strips
    pub const STRIP_BYTE_COUNTS: u16 = 279;        // Byte counts for strips
    pub const PLANAR_CONFIGURATION: u16 = 284;     // How components are stored
    pub const SAMPLE_FORMAT: u16 = 339;            // Interpretation of sample data
    pub const PREDICTOR: u16 = 317;                // Prediction scheme used on image data

    pub const TILE_WIDTH: u16 = 322;               // Width of a tile
    pub const TILE_LENGTH: u16 = 323;              // Length of a tile
    pub const TILE_OFFSETS: u16 = 324;             // Offsets to the data tiles
    pub const TILE_BYTE_COUNTS: u16 = 325;         // Byte counts for tiles

    // GeoTIFF tags
    pub const MODEL_PIXEL_SCALE_TAG: u16 = 33550;   // Pixel size in map units
    pub const MODEL_TIEPOINT_TAG: u16 = 33922;      // Links raster to world coordinates
    pub const MODEL_TRANSFORMATION_TAG: u16 = 34264; // Full transformation matrix
    pub const GEO_KEY_DIRECTORY_TAG: u16 = 34735;   // GeoTIFF keys structure
    pub const GEO_DOUBLE_PARAMS_TAG: u16 = 34736;   // GeoTIFF double parameters
    pub const GEO_ASCII_PARAMS_TAG: u16 = 34737;    // GeoTIFF ASCII parameters
}

/// Compression types
pub mod compression {
    pub const NONE: u64 = 1;              // No compression
    pub const DEFLATE: u64 = 8;           // Adobe Deflate (zlib)
    pub const ZSTD: u64 = 14;             // Zstandard compression
}

/// Predictor values for strip/tile data
pub mod predictor {
    pub const NONE: u64 = 1;                      // No prediction
    pub const HORIZONTAL_DIFFERENCING: u64 = 2;   // Horizontal differencing
}

/// SampleFormat tag values
pub mod sample_format {
    pub const UNSIGNED: u64 = 1;    // Unsigned integer data
    pub const SIGNED: u64 = 2;      // Signed integer data
    pub const IEEE_FLOAT: u64 = 3;  // IEEE floating point data
}

/// PlanarConfiguration tag values
pub mod planar_config {
    pub const CHUNKY: u64 = 1;      // Samples interleaved per pixel
    pub const PLANAR: u64 = 2;      // Samples stored in separate planes
}

/// GeoKey IDs from the GeoTIFF specification
pub mod geo_keys {
    pub const GT_MODEL_TYPE: u16 = 1024;        // Model type (projected/geographic)
    pub const GT_RASTER_TYPE: u16 = 1025;       // Raster space (area/point)
    pub const GEOGRAPHIC_TYPE: u16 = 2048;      // Geographic CS code
    pub const PROJECTED_CS_TYPE: u16 = 3072;    // Projected CS code
    pub const PROJ_LINEAR_UNITS: u16 = 3076;    // Linear unit code
}
