//! Polygon geometry primitives
//!
//! Rings and polygons in world coordinates, with planar (shoelace)
//! area. Area semantics match what a GeoDataFrame reports: exterior
//! area minus the area of any interior holes, in CRS units squared.

use crate::coordinate::Point;

/// A closed ring of points (first point equals last)
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Ring vertices; closure is enforced on construction
    pub points: Vec<Point>,
}

impl Ring {
    /// Create a ring, closing it if the input is open
    pub fn new(mut points: Vec<Point>) -> Self {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if first != last {
                points.push(first);
            }
        }
        Ring { points }
    }

    /// Signed shoelace area
    ///
    /// Positive for counter-clockwise rings in a y-up coordinate
    /// system, negative for clockwise ones.
    pub fn signed_area(&self) -> f64 {
        if self.points.len() < 4 {
            return 0.0;
        }

        let mut sum = 0.0;
        for pair in self.points.windows(2) {
            sum += pair[0].x * pair[1].y - pair[1].x * pair[0].y;
        }
        sum / 2.0
    }

    /// Absolute enclosed area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Whether the ring winds clockwise (negative signed area)
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Reverse the winding direction in place
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Number of vertices including the closing point
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the ring holds no vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Ray-casting containment test
    ///
    /// Points exactly on the boundary may land on either side; the
    /// tracer only probes with vertices that are strictly inside or
    /// outside.
    pub fn contains(&self, point: &Point) -> bool {
        let mut inside = false;
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// A polygon with one exterior ring and any number of holes
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Outer boundary
    pub exterior: Ring,
    /// Interior holes
    pub interiors: Vec<Ring>,
}

impl Polygon {
    /// Create a polygon from an exterior ring and holes
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Polygon { exterior, interiors }
    }

    /// Planar area: exterior minus holes
    pub fn area(&self) -> f64 {
        let holes: f64 = self.interiors.iter().map(|r| r.area()).sum();
        self.exterior.area() - holes
    }

    /// Axis-aligned bounding box as (min_x, min_y, max_x, max_y)
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for point in &self.exterior.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        (min_x, min_y, max_x, max_y)
    }

    /// Total vertex count across all rings, closing points included
    pub fn point_count(&self) -> usize {
        self.exterior.len() + self.interiors.iter().map(|r| r.len()).sum::<usize>()
    }

    /// Number of rings (exterior plus holes)
    pub fn ring_count(&self) -> usize {
        1 + self.interiors.len()
    }
}
