//! ESRI shapefile output
//!
//! Writes traced shapes as a polygon shapefile: the `.shp` geometry
//! file, its `.shx` index, the `.dbf` attribute table and, when the
//! coordinate system is known, a `.prj` sidecar.

mod dbf;
mod writer;

pub use writer::ShapefileWriter;
