//! TIFF validation utilities
//!
//! Validation of offsets and headers to keep malformed files from
//! sending the reader out of bounds.

use log::warn;
use std::io::SeekFrom;

use crate::errors::{MaskError, MaskResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;

/// Validates an IFD offset against the file size
pub fn validate_ifd_offset(offset: u64, file_size: u64) -> MaskResult<()> {
    if offset >= file_size || offset < 8 {
        return Err(MaskError::GenericError(format!(
            "Invalid IFD offset: {} (file size: {})",
            offset, file_size
        )));
    }

    Ok(())
}

/// Gets the file size for validation purposes
///
/// Returns u64::MAX if the size could not be determined, which
/// effectively disables the range checks rather than aborting the read.
pub fn get_file_size(reader: &mut dyn SeekableReader) -> MaskResult<u64> {
    let current_position = reader.seek(SeekFrom::Current(0))?;
    let file_size = match reader.seek(SeekFrom::End(0)) {
        Ok(size) => {
            reader.seek(SeekFrom::Start(current_position))?;
            size
        },
        Err(e) => {
            warn!("Could not determine file size: {}", e);
            reader.seek(SeekFrom::Start(current_position))?;
            u64::MAX
        }
    };

    Ok(file_size)
}

/// Validates the two reserved BigTIFF header fields after the version
pub fn validate_bigtiff_header(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &Box<dyn ByteOrderHandler>
) -> MaskResult<()> {
    let offset_size = byte_order_handler.read_u16(reader)?;
    let reserved = byte_order_handler.read_u16(reader)?;

    if offset_size != header::BIGTIFF_OFFSET_SIZE || reserved != 0 {
        return Err(MaskError::InvalidBigTiffHeader);
    }

    Ok(())
}
