//! IFD utilities
//!
//! Helpers for walking Image File Directories in TIFF files.

use log::debug;

use crate::errors::{MaskError, MaskResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::ifd::IFD;

/// Reads the first IFD offset from a TIFF file header
pub fn read_first_ifd_offset(
    reader: &mut dyn SeekableReader,
    is_big_tiff: bool,
    byte_order_handler: &Box<dyn ByteOrderHandler>
) -> MaskResult<u64> {
    if is_big_tiff {
        debug!("Reading BigTIFF first IFD offset");
        byte_order_handler.read_u64(reader).map_err(MaskError::IoError)
    } else {
        debug!("Reading standard TIFF first IFD offset");
        byte_order_handler.read_u32(reader)
            .map(|v| v as u64)
            .map_err(MaskError::IoError)
    }
}

/// Reads the next IFD offset, 0 meaning end of chain
pub fn read_next_ifd_offset(
    reader: &mut dyn SeekableReader,
    is_big_tiff: bool,
    byte_order_handler: &Box<dyn ByteOrderHandler>
) -> MaskResult<u64> {
    if is_big_tiff {
        byte_order_handler.read_u64(reader).map_err(MaskError::IoError)
    } else {
        byte_order_handler.read_u32(reader)
            .map(|v| v as u64)
            .map_err(MaskError::IoError)
    }
}

/// Calculates the size of an IFD in bytes
///
/// Used to determine where the next IFD offset is located.
pub fn calculate_ifd_size(ifd: &IFD, is_big_tiff: bool) -> u64 {
    if is_big_tiff {
        // 8 (entry count) + 20 (each entry) + 8 (next IFD offset)
        8 + (20 * ifd.entries.len() as u64) + 8
    } else {
        // 2 (entry count) + 12 (each entry) + 4 (next IFD offset)
        2 + (12 * ifd.entries.len() as u64) + 4
    }
}
