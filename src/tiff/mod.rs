//! TIFF file format parsing module
//!
//! Structures and functions for reading TIFF and BigTIFF format files,
//! including the GeoTIFF georeferencing tags.

pub mod ifd;
pub(crate) mod types;
pub mod reader;
#[cfg(test)]
mod tests;
pub mod geotags;
pub(crate) mod constants;
pub(crate) mod validation;
pub mod geo_key_parser;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use ifd::{IFD, IFDEntry};
pub use reader::TiffReader;
pub use types::Tiff;
pub use geotags::{GeoKeyEntry, get_key_name, get_tag_name, is_geotiff_tag};
