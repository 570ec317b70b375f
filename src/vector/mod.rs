//! Vector geometry and raster-to-polygon tracing
//!
//! Converts contiguous same-valued raster regions into polygon
//! boundaries in world coordinates.

mod geometry;
mod tracer;

pub use geometry::{Polygon, Ring};
pub use tracer::{ShapeTracer, TracedShape};
