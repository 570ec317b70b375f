//! TIFF tag utilities
//!
//! Helpers for reading tag value arrays and deciding where a tag's
//! payload lives.

use byteorder::ReadBytesExt;

use crate::errors::{MaskError, MaskResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::field_types;
use crate::tiff::ifd::IFDEntry;

/// Reads an array of tag values based on the field type
///
/// Values are widened to u64. RATIONAL payloads are packed as
/// numerator << 32 | denominator, same as the entry layout on disk.
pub fn read_tag_value_array(
    reader: &mut dyn SeekableReader,
    entry: &IFDEntry,
    handler: &Box<dyn ByteOrderHandler>,
    values: &mut Vec<u64>
) -> MaskResult<()> {
    for _ in 0..entry.count {
        let value = match entry.field_type {
            field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED => reader.read_u8()? as u64,
            field_types::SHORT | field_types::SSHORT => handler.read_u16(reader)? as u64,
            field_types::LONG | field_types::SLONG | field_types::FLOAT => handler.read_u32(reader)? as u64,
            field_types::RATIONAL | field_types::SRATIONAL => {
                let num = handler.read_u32(reader)?;
                let den = handler.read_u32(reader)?;
                ((num as u64) << 32) | (den as u64)
            },
            field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => handler.read_u64(reader)?,
            _ => return Err(MaskError::UnsupportedFieldType(entry.field_type)),
        };

        values.push(value);
    }

    Ok(())
}

/// Determines if a tag's value is stored inline or at an offset
pub fn is_value_inline(entry: &IFDEntry, is_big_tiff: bool) -> bool {
    entry.is_value_inline(is_big_tiff)
}
