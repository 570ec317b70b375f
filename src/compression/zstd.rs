//! Handler for ZSTD compressed data

use log::{debug, warn};

use crate::errors::{MaskError, MaskResult};
use crate::tiff::constants::compression;
use super::handler::CompressionHandler;

/// ZSTD compression handler (compression code 14)
pub struct ZstdHandler;

impl CompressionHandler for ZstdHandler {
    fn decompress(&self, data: &[u8]) -> MaskResult<Vec<u8>> {
        debug!("ZSTD decompressing {} bytes", data.len());
        if data.is_empty() {
            return Ok(Vec::new());
        }

        match zstd::decode_all(data) {
            Ok(decompressed_data) => {
                debug!("ZSTD decompressed to {} bytes", decompressed_data.len());
                Ok(decompressed_data)
            },
            Err(e) => {
                warn!("ZSTD decompression error: {}", e);
                Err(MaskError::GenericError(format!("ZSTD decompression error: {}", e)))
            }
        }
    }

    fn name(&self) -> &'static str {
        "ZSTD"
    }

    fn code(&self) -> u64 {
        compression::ZSTD
    }
}
