//! Shapefile geometry and index writing
//!
//! Produces the `.shp` and `.shx` pair for polygon records, plus the
//! optional `.prj` sidecar. The format mixes endianness: record
//! headers and file lengths are big-endian, geometry is little-endian,
//! and all lengths count 16-bit words.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use log::{debug, info};

use crate::coordinate::CoordinateSystem;
use crate::errors::MaskResult;
use crate::vector::{Polygon, Ring, TracedShape};

use super::dbf;

/// Shapefile format constants
mod format {
    /// Magic number at the start of every .shp and .shx file
    pub const FILE_CODE: i32 = 9994;
    /// Format version, always 1000
    pub const VERSION: i32 = 1000;
    /// Shape type code for polygons
    pub const POLYGON: i32 = 5;
    /// Header size in bytes, shared by .shp and .shx
    pub const HEADER_SIZE: usize = 100;
}

/// Writes traced shapes as an ESRI polygon shapefile
pub struct ShapefileWriter<'a> {
    shapes: &'a [TracedShape],
    crs: Option<&'a CoordinateSystem>,
}

impl<'a> ShapefileWriter<'a> {
    /// Create a writer over a set of shapes and an optional CRS
    pub fn new(shapes: &'a [TracedShape], crs: Option<&'a CoordinateSystem>) -> Self {
        ShapefileWriter { shapes, crs }
    }

    /// Write the .shp, .shx, .dbf and .prj files next to `shp_path`
    ///
    /// A shapefile with zero records is still valid and is written
    /// with headers only.
    pub fn write(&self, shp_path: &Path) -> MaskResult<()> {
        info!("Writing {} shapes to {}", self.shapes.len(), shp_path.display());

        let records: Vec<Vec<u8>> = self.shapes.iter()
            .map(|shape| encode_polygon(&shape.polygon))
            .collect::<MaskResult<_>>()?;

        let total_points: usize = self.shapes.iter()
            .map(|s| s.polygon.point_count())
            .sum();
        debug!("Encoded {} records, {} vertices total", records.len(), total_points);

        let bbox = self.file_bounding_box();
        self.write_shp(shp_path, &records, bbox)?;
        self.write_shx(&shp_path.with_extension("shx"), &records, bbox)?;
        dbf::write_attribute_table(&shp_path.with_extension("dbf"), self.shapes)?;
        self.write_prj(&shp_path.with_extension("prj"))?;

        Ok(())
    }

    /// Bounding box over every shape, zeroed when there are none
    fn file_bounding_box(&self) -> (f64, f64, f64, f64) {
        let mut boxes = self.shapes.iter().map(|s| s.polygon.bounding_box());
        let first = match boxes.next() {
            Some(b) => b,
            None => return (0.0, 0.0, 0.0, 0.0),
        };
        boxes.fold(first, |acc, b| {
            (acc.0.min(b.0), acc.1.min(b.1), acc.2.max(b.2), acc.3.max(b.3))
        })
    }

    fn write_shp(&self, path: &Path, records: &[Vec<u8>],
                 bbox: (f64, f64, f64, f64)) -> MaskResult<()> {
        let content_bytes: usize = records.iter().map(|r| r.len() + 8).sum();
        let file_words = ((format::HEADER_SIZE + content_bytes) / 2) as i32;

        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(1024 * 1024, file);
        write_file_header(&mut writer, file_words, bbox)?;

        for (number, record) in records.iter().enumerate() {
            // Record numbers are 1-based
            writer.write_i32::<BigEndian>(number as i32 + 1)?;
            writer.write_i32::<BigEndian>((record.len() / 2) as i32)?;
            writer.write_all(record)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_shx(&self, path: &Path, records: &[Vec<u8>],
                 bbox: (f64, f64, f64, f64)) -> MaskResult<()> {
        let file_words = ((format::HEADER_SIZE + records.len() * 8) / 2) as i32;

        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(1024 * 1024, file);
        write_file_header(&mut writer, file_words, bbox)?;

        let mut offset_words = (format::HEADER_SIZE / 2) as i32;
        for record in records {
            let content_words = (record.len() / 2) as i32;
            writer.write_i32::<BigEndian>(offset_words)?;
            writer.write_i32::<BigEndian>(content_words)?;
            // Advance past this record's header and content
            offset_words += 4 + content_words;
        }

        writer.flush()?;
        Ok(())
    }

    /// Write the .prj sidecar when the CRS maps to a known WKT
    fn write_prj(&self, path: &Path) -> MaskResult<()> {
        let wkt = match self.crs.and_then(|crs| crs.wkt()) {
            Some(wkt) => wkt,
            None => {
                debug!("No WKT for output CRS, skipping .prj");
                return Ok(());
            }
        };
        fs::write(path, wkt)?;
        Ok(())
    }
}

/// Write the 100-byte header shared by .shp and .shx
fn write_file_header<W: Write>(writer: &mut W, file_words: i32,
                               bbox: (f64, f64, f64, f64)) -> MaskResult<()> {
    writer.write_i32::<BigEndian>(format::FILE_CODE)?;
    for _ in 0..5 {
        writer.write_i32::<BigEndian>(0)?;
    }
    writer.write_i32::<BigEndian>(file_words)?;
    writer.write_i32::<LittleEndian>(format::VERSION)?;
    writer.write_i32::<LittleEndian>(format::POLYGON)?;

    let (min_x, min_y, max_x, max_y) = bbox;
    writer.write_f64::<LittleEndian>(min_x)?;
    writer.write_f64::<LittleEndian>(min_y)?;
    writer.write_f64::<LittleEndian>(max_x)?;
    writer.write_f64::<LittleEndian>(max_y)?;

    // Z and M ranges, unused for plain polygons
    for _ in 0..4 {
        writer.write_f64::<LittleEndian>(0.0)?;
    }

    Ok(())
}

/// Encode one polygon as shapefile record content
///
/// Rings follow the format's winding rule: the exterior runs clockwise
/// and holes counter-clockwise, regardless of how they were traced.
fn encode_polygon(polygon: &Polygon) -> MaskResult<Vec<u8>> {
    let rings = oriented_rings(polygon);
    let num_parts = rings.len() as i32;
    let num_points: i32 = rings.iter().map(|r| r.len() as i32).sum();
    let (min_x, min_y, max_x, max_y) = polygon.bounding_box();

    let mut buf = Vec::new();
    buf.write_i32::<LittleEndian>(format::POLYGON)?;
    buf.write_f64::<LittleEndian>(min_x)?;
    buf.write_f64::<LittleEndian>(min_y)?;
    buf.write_f64::<LittleEndian>(max_x)?;
    buf.write_f64::<LittleEndian>(max_y)?;
    buf.write_i32::<LittleEndian>(num_parts)?;
    buf.write_i32::<LittleEndian>(num_points)?;

    let mut part_start = 0i32;
    for ring in &rings {
        buf.write_i32::<LittleEndian>(part_start)?;
        part_start += ring.len() as i32;
    }

    for ring in &rings {
        for point in &ring.points {
            buf.write_f64::<LittleEndian>(point.x)?;
            buf.write_f64::<LittleEndian>(point.y)?;
        }
    }

    Ok(buf)
}

/// The polygon's rings in record order with winding enforced
fn oriented_rings(polygon: &Polygon) -> Vec<Ring> {
    let mut rings = Vec::with_capacity(polygon.ring_count());

    let mut exterior = polygon.exterior.clone();
    if !exterior.is_clockwise() {
        exterior.reverse();
    }
    rings.push(exterior);

    for hole in &polygon.interiors {
        let mut ring = hole.clone();
        if ring.is_clockwise() {
            ring.reverse();
        }
        rings.push(ring);
    }

    rings
}

#[cfg(test)]
mod tests {
    use byteorder::{ByteOrder, BigEndian, LittleEndian};
    use tempfile::tempdir;

    use crate::coordinate::{CoordinateSystemFactory, Point};
    use crate::vector::Polygon;
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        let exterior = Ring::new(vec![
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ]);
        Polygon::new(exterior, Vec::new())
    }

    #[test]
    fn test_empty_shapefile_is_headers_only() {
        let dir = tempdir().unwrap();
        let shp = dir.path().join("empty.shp");

        ShapefileWriter::new(&[], None).write(&shp).unwrap();

        let shp_bytes = std::fs::read(&shp).unwrap();
        assert_eq!(shp_bytes.len(), 100);
        assert_eq!(BigEndian::read_i32(&shp_bytes[0..4]), 9994);
        assert_eq!(BigEndian::read_i32(&shp_bytes[24..28]), 50);
        assert_eq!(LittleEndian::read_i32(&shp_bytes[32..36]), 5);

        let shx_bytes = std::fs::read(dir.path().join("empty.shx")).unwrap();
        assert_eq!(shx_bytes.len(), 100);
        assert!(dir.path().join("empty.dbf").exists());
        assert!(!dir.path().join("empty.prj").exists());
    }

    #[test]
    fn test_single_polygon_record_layout() {
        let dir = tempdir().unwrap();
        let shp = dir.path().join("one.shp");

        let shapes = [TracedShape { polygon: square(10.0, 20.0, 5.0), value: 1.0 }];
        ShapefileWriter::new(&shapes, None).write(&shp).unwrap();

        let bytes = std::fs::read(&shp).unwrap();

        // File bbox
        assert_eq!(LittleEndian::read_f64(&bytes[36..44]), 10.0);
        assert_eq!(LittleEndian::read_f64(&bytes[44..52]), 20.0);
        assert_eq!(LittleEndian::read_f64(&bytes[52..60]), 15.0);
        assert_eq!(LittleEndian::read_f64(&bytes[60..68]), 25.0);

        // Record header: number 1, content 22 words + 8 per point
        assert_eq!(BigEndian::read_i32(&bytes[100..104]), 1);
        let content_words = BigEndian::read_i32(&bytes[104..108]);
        assert_eq!(content_words, 22 + 2 + 8 * 5);

        // Record content: polygon type, one part of five points
        assert_eq!(LittleEndian::read_i32(&bytes[108..112]), 5);
        assert_eq!(LittleEndian::read_i32(&bytes[144..148]), 1);
        assert_eq!(LittleEndian::read_i32(&bytes[148..152]), 5);

        // File length covers header plus the record
        let file_words = BigEndian::read_i32(&bytes[24..28]);
        assert_eq!(file_words as usize * 2, bytes.len());
    }

    #[test]
    fn test_exterior_written_clockwise() {
        let dir = tempdir().unwrap();
        let shp = dir.path().join("cw.shp");

        // Counter-clockwise input must come out clockwise
        let shapes = [TracedShape { polygon: square(0.0, 0.0, 2.0), value: 1.0 }];
        ShapefileWriter::new(&shapes, None).write(&shp).unwrap();

        let bytes = std::fs::read(&shp).unwrap();
        let points_start = 108 + 44 + 4;
        let mut points = Vec::new();
        for i in 0..5 {
            let at = points_start + i * 16;
            points.push((
                LittleEndian::read_f64(&bytes[at..at + 8]),
                LittleEndian::read_f64(&bytes[at + 8..at + 16]),
            ));
        }

        let signed: f64 = points.windows(2)
            .map(|w| w[0].0 * w[1].1 - w[1].0 * w[0].1)
            .sum::<f64>() / 2.0;
        assert!(signed < 0.0, "exterior ring should be clockwise, area {}", signed);
    }

    #[test]
    fn test_shx_indexes_every_record() {
        let dir = tempdir().unwrap();
        let shp = dir.path().join("two.shp");

        let shapes = [
            TracedShape { polygon: square(0.0, 0.0, 1.0), value: 1.0 },
            TracedShape { polygon: square(5.0, 5.0, 1.0), value: 1.0 },
        ];
        ShapefileWriter::new(&shapes, None).write(&shp).unwrap();

        let shx = std::fs::read(dir.path().join("two.shx")).unwrap();
        assert_eq!(shx.len(), 100 + 2 * 8);

        let first_offset = BigEndian::read_i32(&shx[100..104]);
        let first_len = BigEndian::read_i32(&shx[104..108]);
        let second_offset = BigEndian::read_i32(&shx[108..112]);
        assert_eq!(first_offset, 50);
        assert_eq!(second_offset, first_offset + 4 + first_len);
    }

    #[test]
    fn test_prj_written_for_known_crs() {
        let dir = tempdir().unwrap();
        let shp = dir.path().join("geo.shp");

        let crs = CoordinateSystemFactory::from_epsg(4326).unwrap();
        let shapes = [TracedShape { polygon: square(0.0, 0.0, 1.0), value: 1.0 }];
        ShapefileWriter::new(&shapes, Some(&crs)).write(&shp).unwrap();

        let wkt = std::fs::read_to_string(dir.path().join("geo.prj")).unwrap();
        assert!(wkt.starts_with("GEOGCS"));
        assert!(wkt.contains("WGS"));
    }
}
