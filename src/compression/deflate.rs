//! Handler for Adobe Deflate compressed data

use std::io::Read;
use flate2::read::ZlibDecoder;

use crate::errors::{MaskError, MaskResult};
use crate::tiff::constants::compression;
use super::handler::CompressionHandler;

/// Adobe Deflate (Zlib) compression handler (compression code 8)
pub struct AdobeDeflateHandler;

impl CompressionHandler for AdobeDeflateHandler {
    fn decompress(&self, data: &[u8]) -> MaskResult<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed_data = Vec::new();
        match decoder.read_to_end(&mut decompressed_data) {
            Ok(_) => Ok(decompressed_data),
            Err(e) => Err(MaskError::IoError(e))
        }
    }

    fn name(&self) -> &'static str {
        "Adobe Deflate"
    }

    fn code(&self) -> u64 {
        compression::DEFLATE
    }
}
