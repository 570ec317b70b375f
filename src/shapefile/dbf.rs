//! dBASE attribute table writing
//!
//! Every shapefile carries a `.dbf` sidecar with one row per geometry
//! record. The table here has two numeric columns: `val`, the pixel
//! value a shape was traced from, and `area`, its planar area in CRS
//! units.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use byteorder::{LittleEndian, WriteBytesExt};
use log::debug;

use crate::errors::MaskResult;
use crate::vector::TracedShape;

/// dBASE III without memo fields
const DBF_VERSION: u8 = 0x03;
const FIELD_DESCRIPTOR_SIZE: u16 = 32;
const HEADER_TERMINATOR: u8 = 0x0D;
const RECORD_ACTIVE: u8 = 0x20;
const FILE_TERMINATOR: u8 = 0x1A;

/// A numeric column definition
struct NumericField {
    name: &'static str,
    width: u8,
    decimals: u8,
}

const FIELDS: [NumericField; 2] = [
    NumericField { name: "val", width: 18, decimals: 6 },
    NumericField { name: "area", width: 24, decimals: 15 },
];

/// Write the attribute table with a `val` and `area` row per shape
pub fn write_attribute_table(path: &Path, shapes: &[TracedShape]) -> MaskResult<()> {
    debug!("Writing {} attribute rows to {}", shapes.len(), path.display());

    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);

    write_header(&mut writer, shapes.len() as u32)?;

    for shape in shapes {
        writer.write_u8(RECORD_ACTIVE)?;
        write_numeric(&mut writer, shape.value, &FIELDS[0])?;
        write_numeric(&mut writer, shape.polygon.area(), &FIELDS[1])?;
    }

    writer.write_u8(FILE_TERMINATOR)?;
    writer.flush()?;
    Ok(())
}

fn write_header<W: Write>(writer: &mut W, record_count: u32) -> MaskResult<()> {
    let header_size = 32 + FIELDS.len() as u16 * FIELD_DESCRIPTOR_SIZE + 1;
    let record_size = 1 + FIELDS.iter().map(|f| f.width as u16).sum::<u16>();

    writer.write_u8(DBF_VERSION)?;

    let (year, month, day) = today();
    writer.write_u8((year - 1900) as u8)?;
    writer.write_u8(month)?;
    writer.write_u8(day)?;

    writer.write_u32::<LittleEndian>(record_count)?;
    writer.write_u16::<LittleEndian>(header_size)?;
    writer.write_u16::<LittleEndian>(record_size)?;
    writer.write_all(&[0u8; 20])?;

    for field in &FIELDS {
        write_field_descriptor(writer, field)?;
    }
    writer.write_u8(HEADER_TERMINATOR)?;
    Ok(())
}

fn write_field_descriptor<W: Write>(writer: &mut W, field: &NumericField) -> MaskResult<()> {
    let mut name = [0u8; 11];
    name[..field.name.len()].copy_from_slice(field.name.as_bytes());
    writer.write_all(&name)?;

    writer.write_u8(b'N')?;
    writer.write_all(&[0u8; 4])?;
    writer.write_u8(field.width)?;
    writer.write_u8(field.decimals)?;
    writer.write_all(&[0u8; 14])?;
    Ok(())
}

/// Write a right-justified numeric cell
///
/// Values that overflow the column even with no decimals get the
/// dBASE overflow marker, a cell full of asterisks.
fn write_numeric<W: Write>(writer: &mut W, value: f64, field: &NumericField) -> MaskResult<()> {
    let width = field.width as usize;

    let mut decimals = field.decimals as usize;
    let text = loop {
        let candidate = format!("{:>width$.decimals$}", value,
                                width = width, decimals = decimals);
        if candidate.len() <= width {
            break candidate;
        }
        if decimals == 0 {
            break "*".repeat(width);
        }
        decimals -= 1;
    };

    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Current date as (year, month, day) for the header timestamp
fn today() -> (i32, u8, u8) {
    let days = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => (elapsed.as_secs() / 86_400) as i64,
        Err(_) => 0,
    };

    // Civil-from-days conversion for the proleptic Gregorian calendar
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = (yoe + era * 400 + if month <= 2 { 1 } else { 0 }) as i32;

    (year, month, day)
}
