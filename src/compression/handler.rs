//! Compression handler trait definition

use crate::errors::MaskResult;

/// Strategy trait for decoding compressed strip/tile data
pub trait CompressionHandler: Send + Sync {
    /// Decompress the data
    fn decompress(&self, data: &[u8]) -> MaskResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// Get the TIFF compression code
    fn code(&self) -> u64;
}
