//! Factory for creating compression handlers

use crate::errors::{MaskError, MaskResult};
use crate::tiff::constants::compression;
use super::deflate::AdobeDeflateHandler;
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::zstd::ZstdHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create a compression handler for the given compression code
    pub fn create_handler(code: u64) -> MaskResult<Box<dyn CompressionHandler>> {
        match code {
            compression::NONE => Ok(Box::new(UncompressedHandler)),
            compression::DEFLATE => Ok(Box::new(AdobeDeflateHandler)),
            compression::ZSTD => Ok(Box::new(ZstdHandler)),
            _ => Err(MaskError::UnsupportedCompression(code))
        }
    }
}
