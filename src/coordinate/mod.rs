//! Coordinate handling for geospatial data
//!
//! Affine georeferencing and coordinate reference system handling.

mod point;
mod transform;
mod crs;

// Re-export key types
pub use self::crs::{CoordinateSystem, CoordinateSystemFactory};
pub use self::point::Point;
pub use self::transform::GeoTransform;
