//! Raster-to-polygon tracing
//!
//! Partitions a band into 4-connected regions of equal value and traces
//! each region's boundary into polygon rings. Vertices sit on pixel
//! corners and are mapped through the raster's affine transform, so the
//! output outlines the pixels exactly rather than approximating them.
//!
//! Regions are emitted in row-major discovery order, one traced shape
//! per region, carrying the pixel value the region was built from.

use std::collections::HashMap;
use log::{debug, info};

use crate::coordinate::{GeoTransform, Point};
use crate::raster::Band;
use crate::utils::progress::RowProgress;
use super::geometry::{Polygon, Ring};

/// Rasters below this row count trace fast enough that a progress bar
/// is just noise.
const PROGRESS_ROW_THRESHOLD: u32 = 1024;

/// A corner of the pixel grid (column, row), ranging to (width, height)
type Corner = (u32, u32);

/// A directed boundary edge between two adjacent corners
#[derive(Debug, Clone, Copy)]
struct Edge {
    from: Corner,
    to: Corner,
}

impl Edge {
    fn direction(&self) -> (i64, i64) {
        (self.to.0 as i64 - self.from.0 as i64,
         self.to.1 as i64 - self.from.1 as i64)
    }
}

/// A polygon traced from the raster, tagged with its source value
#[derive(Debug, Clone)]
pub struct TracedShape {
    /// Region outline in world coordinates
    pub polygon: Polygon,
    /// Pixel value the region was traced from
    pub value: f64,
}

/// Traces same-valued raster regions into polygons
pub struct ShapeTracer<'a> {
    band: &'a Band,
    transform: &'a GeoTransform,
}

impl<'a> ShapeTracer<'a> {
    /// Create a tracer over a band and its georeferencing
    pub fn new(band: &'a Band, transform: &'a GeoTransform) -> Self {
        ShapeTracer { band, transform }
    }

    /// Trace all regions of the band into shapes
    pub fn trace(&self) -> Vec<TracedShape> {
        if self.band.is_empty() {
            return Vec::new();
        }

        let (labels, values) = self.label_regions();
        info!("Labeled {} regions in {}x{} band",
              values.len(), self.band.width, self.band.height);

        let edges = self.collect_edges(&labels, values.len());

        let mut shapes = Vec::new();
        for (region, region_edges) in edges.into_iter().enumerate() {
            let rings = chain_rings(region_edges);
            shapes.extend(self.build_shapes(rings, values[region]));
        }

        debug!("Traced {} shapes", shapes.len());
        shapes
    }

    /// Label 4-connected regions of equal value
    ///
    /// Values are compared by bit pattern so distinct float classes
    /// never merge and NaN regions stay coherent. Labels are assigned
    /// in row-major discovery order, starting at 1.
    fn label_regions(&self) -> (Vec<u32>, Vec<f64>) {
        let width = self.band.width as usize;
        let height = self.band.height as usize;

        let mut labels = vec![0u32; width * height];
        let mut values = Vec::new();
        let mut stack = Vec::new();

        for start in 0..labels.len() {
            if labels[start] != 0 {
                continue;
            }

            let value = self.band.data[start];
            let value_bits = value.to_bits();
            let label = values.len() as u32 + 1;
            values.push(value);

            stack.push(start);
            labels[start] = label;

            while let Some(idx) = stack.pop() {
                let x = idx % width;
                let y = idx / width;

                let mut visit = |nidx: usize| {
                    if labels[nidx] == 0 && self.band.data[nidx].to_bits() == value_bits {
                        labels[nidx] = label;
                        stack.push(nidx);
                    }
                };

                if x > 0 { visit(idx - 1); }
                if x + 1 < width { visit(idx + 1); }
                if y > 0 { visit(idx - width); }
                if y + 1 < height { visit(idx + width); }
            }
        }

        (labels, values)
    }

    /// Collect directed boundary edges for every region
    ///
    /// Edges are oriented so traversal runs clockwise on screen
    /// (y-down) around region interiors: exteriors close into
    /// positive-area rings in pixel space, holes into negative ones.
    fn collect_edges(&self, labels: &[u32], region_count: usize) -> Vec<Vec<Edge>> {
        let width = self.band.width as usize;
        let height = self.band.height as usize;

        let progress = if self.band.height >= PROGRESS_ROW_THRESHOLD {
            Some(RowProgress::new(self.band.height as u64, "Tracing region boundaries"))
        } else {
            None
        };

        let mut edges: Vec<Vec<Edge>> = vec![Vec::new(); region_count];

        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                let label = labels[idx];
                let bucket = &mut edges[label as usize - 1];

                let (cx, cy) = (x as u32, y as u32);
                let differs = |nidx: usize| labels[nidx] != label;

                // Top
                if y == 0 || differs(idx - width) {
                    bucket.push(Edge { from: (cx, cy), to: (cx + 1, cy) });
                }
                // Right
                if x + 1 == width || differs(idx + 1) {
                    bucket.push(Edge { from: (cx + 1, cy), to: (cx + 1, cy + 1) });
                }
                // Bottom
                if y + 1 == height || differs(idx + width) {
                    bucket.push(Edge { from: (cx + 1, cy + 1), to: (cx, cy + 1) });
                }
                // Left
                if x == 0 || differs(idx - 1) {
                    bucket.push(Edge { from: (cx, cy + 1), to: (cx, cy) });
                }
            }

            if let Some(bar) = &progress {
                bar.row_done();
            }
        }

        if let Some(bar) = &progress {
            bar.finish();
        }

        edges
    }

    /// Turn one region's rings into shapes in world coordinates
    ///
    /// In pixel space, positive-area rings are exteriors and
    /// negative-area rings are holes. A region pinched at a corner can
    /// split into several exteriors; each hole is attached to the
    /// exterior that contains it.
    fn build_shapes(&self, rings: Vec<Vec<Corner>>, value: f64) -> Vec<TracedShape> {
        let mut exteriors: Vec<(Ring, Vec<Ring>)> = Vec::new();
        let mut holes: Vec<Ring> = Vec::new();

        for corners in rings {
            let pixel_ring = Ring::new(
                corners.iter()
                    .map(|&(x, y)| Point::new(x as f64, y as f64))
                    .collect()
            );
            if pixel_ring.signed_area() > 0.0 {
                exteriors.push((pixel_ring, Vec::new()));
            } else {
                holes.push(pixel_ring);
            }
        }

        for hole in holes {
            let probe = hole.points[0];
            let target = exteriors.iter_mut()
                .find(|(exterior, _)| exterior.contains(&probe));
            match target {
                Some((_, hole_list)) => hole_list.push(hole),
                // A hole with no containing exterior means the edge
                // chaining broke; drop it rather than emit garbage.
                None => debug!("Dropping orphan hole ring of {} points", hole.len()),
            }
        }

        exteriors.into_iter()
            .map(|(exterior, hole_list)| {
                let world_exterior = self.to_world(&exterior);
                let world_holes = hole_list.iter().map(|h| self.to_world(h)).collect();
                TracedShape {
                    polygon: Polygon::new(world_exterior, world_holes),
                    value,
                }
            })
            .collect()
    }

    /// Map a pixel-space ring through the affine transform
    fn to_world(&self, ring: &Ring) -> Ring {
        Ring::new(
            ring.points.iter()
                .map(|p| self.transform.apply(p.x, p.y))
                .collect()
        )
    }
}

/// Chain directed edges into closed rings
///
/// Walks unused edges end-to-start until each loop closes. At corners
/// where the boundary touches itself, the walk prefers the sharpest
/// clockwise turn, which keeps every ring simple.
fn chain_rings(edges: Vec<Edge>) -> Vec<Vec<Corner>> {
    let mut by_start: HashMap<Corner, Vec<usize>> = HashMap::new();
    for (i, edge) in edges.iter().enumerate() {
        by_start.entry(edge.from).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut rings = Vec::new();

    for i in 0..edges.len() {
        if used[i] {
            continue;
        }

        let first = edges[i].from;
        let mut corners = vec![first];
        let mut current = i;
        used[i] = true;

        loop {
            let end = edges[current].to;
            if end == first {
                break;
            }
            corners.push(end);

            match pick_next(&by_start, &used, end, edges[current].direction(), &edges) {
                Some(next) => {
                    used[next] = true;
                    current = next;
                }
                // Should not happen for edge sets built from pixel
                // boundaries; bail instead of looping forever.
                None => break,
            }
        }

        let simplified = simplify_ring(corners);
        if simplified.len() >= 4 {
            rings.push(simplified);
        }
    }

    rings
}

/// Pick the next edge at a corner, preferring the sharpest clockwise
/// turn relative to the incoming direction
fn pick_next(
    by_start: &HashMap<Corner, Vec<usize>>,
    used: &[bool],
    corner: Corner,
    incoming: (i64, i64),
    edges: &[Edge],
) -> Option<usize> {
    let candidates = by_start.get(&corner)?;

    // Clockwise turn on a y-down grid, then straight, then
    // counter-clockwise.
    let preference = [
        (-incoming.1, incoming.0),
        incoming,
        (incoming.1, -incoming.0),
    ];

    for wanted in preference {
        for &idx in candidates {
            if !used[idx] && edges[idx].direction() == wanted {
                return Some(idx);
            }
        }
    }

    candidates.iter().copied().find(|&idx| !used[idx])
}

/// Remove collinear corners, treating the ring as cyclic
fn simplify_ring(corners: Vec<Corner>) -> Vec<Corner> {
    let n = corners.len();
    if n < 3 {
        return corners;
    }

    let dir = |a: Corner, b: Corner| -> (i64, i64) {
        let dx = b.0 as i64 - a.0 as i64;
        let dy = b.1 as i64 - a.1 as i64;
        // Boundary edges are axis-aligned, a sign pair is enough
        (dx.signum(), dy.signum())
    };

    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let prev = corners[(i + n - 1) % n];
        let curr = corners[i];
        let next = corners[(i + 1) % n];
        if dir(prev, curr) != dir(curr, next) {
            kept.push(curr);
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace_band(width: u32, height: u32, data: Vec<f64>) -> Vec<TracedShape> {
        let band = Band::from_data(width, height, data);
        // Identity-like transform: 1-unit pixels anchored at origin,
        // y growing downward stays downward
        let transform = GeoTransform::new(0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        ShapeTracer::new(&band, &transform).trace()
    }

    #[test]
    fn test_uniform_band_is_one_shape() {
        let shapes = trace_band(3, 2, vec![1.0; 6]);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].value, 1.0);
        assert_eq!(shapes[0].polygon.area(), 6.0);
        assert!(shapes[0].polygon.interiors.is_empty());
    }

    #[test]
    fn test_two_value_band_splits() {
        // Left column 1s, right column 0s
        let shapes = trace_band(2, 2, vec![1.0, 0.0, 1.0, 0.0]);
        assert_eq!(shapes.len(), 2);

        let values: Vec<f64> = shapes.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![1.0, 0.0]);
        for shape in &shapes {
            assert_eq!(shape.polygon.area(), 2.0);
        }
    }

    #[test]
    fn test_hole_is_traced_as_interior_ring() {
        // 3x3 of 1s with a 0 in the middle
        let mut data = vec![1.0; 9];
        data[4] = 0.0;
        let shapes = trace_band(3, 3, data);

        let ones: Vec<&TracedShape> = shapes.iter().filter(|s| s.value == 1.0).collect();
        assert_eq!(ones.len(), 1);
        assert_eq!(ones[0].polygon.interiors.len(), 1);
        assert_eq!(ones[0].polygon.area(), 8.0);

        // The hole itself also comes out as its own region
        let zeros: Vec<&TracedShape> = shapes.iter().filter(|s| s.value == 0.0).collect();
        assert_eq!(zeros.len(), 1);
        assert_eq!(zeros[0].polygon.area(), 1.0);
    }

    #[test]
    fn test_diagonal_pixels_are_separate_regions() {
        // 4-connectivity: diagonal neighbors do not merge
        let shapes = trace_band(2, 2, vec![1.0, 0.0, 0.0, 1.0]);
        let ones: Vec<&TracedShape> = shapes.iter().filter(|s| s.value == 1.0).collect();
        assert_eq!(ones.len(), 2);
        for shape in ones {
            assert_eq!(shape.polygon.area(), 1.0);
        }
    }

    #[test]
    fn test_row_major_discovery_order() {
        let shapes = trace_band(2, 1, vec![5.0, 7.0]);
        let values: Vec<f64> = shapes.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![5.0, 7.0]);
    }

    #[test]
    fn test_l_shaped_region_outline() {
        // L-shape of 1s: (0,0), (0,1), (1,1)
        let shapes = trace_band(2, 2, vec![1.0, 0.0, 1.0, 1.0]);
        let ones: Vec<&TracedShape> = shapes.iter().filter(|s| s.value == 1.0).collect();
        assert_eq!(ones.len(), 1);
        assert_eq!(ones[0].polygon.area(), 3.0);
        // Six corners plus the closing point
        assert_eq!(ones[0].polygon.exterior.len(), 7);
    }

    #[test]
    fn test_world_transform_applied() {
        let band = Band::from_data(2, 2, vec![1.0; 4]);
        // 10-unit pixels, north-up, origin at (100, 200)
        let transform = GeoTransform::new(100.0, 10.0, 0.0, 200.0, 0.0, -10.0);
        let shapes = ShapeTracer::new(&band, &transform).trace();

        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].polygon.area(), 400.0);
        let (min_x, min_y, max_x, max_y) = shapes[0].polygon.bounding_box();
        assert_eq!((min_x, min_y, max_x, max_y), (100.0, 180.0, 120.0, 200.0));
    }
}
