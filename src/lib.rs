pub mod errors;
pub mod io;
pub mod tiff;
pub mod utils;
pub mod compression;
pub mod raster;
pub mod coordinate;
pub mod vector;
pub mod shapefile;
pub mod api;

pub use crate::api::{raster_mask_to_shapefile, MaskVec};

pub use errors::{MaskError, MaskResult};
pub use tiff::TiffReader;
pub use raster::Band;
pub use coordinate::{CoordinateSystem, GeoTransform, Point};
pub use vector::{Polygon, TracedShape};
