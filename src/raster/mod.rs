//! Band extraction from raster files
//!
//! Reads band 1 of a strip- or tile-organized GeoTIFF into a numeric
//! buffer, together with the georeferencing needed to place it.

mod band;
mod decode;
mod strip_reader;
mod tile_reader;
mod source;

pub use band::Band;
pub use decode::SampleLayout;
pub use strip_reader::StripReader;
pub use tile_reader::TileReader;
pub use source::RasterSource;
