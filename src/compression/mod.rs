//! Compression handling for TIFF strip and tile data
//!
//! Strategies for the compression methods a GeoTIFF band can arrive in.
//! Only decompression is needed here; this crate never writes TIFFs.

mod handler;
mod uncompressed;
mod deflate;
mod factory;
mod zstd;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::AdobeDeflateHandler;
pub use factory::CompressionFactory;
pub use zstd::ZstdHandler;
