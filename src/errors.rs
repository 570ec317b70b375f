//! Custom error types for raster vectorization
//!
//! Failures from the underlying raster and vector I/O propagate
//! untranslated; there is no retry or recovery, a run either
//! completes or raises.

use std::fmt;
use std::io;

/// Errors raised while reading a raster or writing vector output
#[derive(Debug)]
pub enum MaskError {
    /// I/O error
    IoError(io::Error),
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Invalid BigTIFF header
    InvalidBigTiffHeader,
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Tag not found
    TagNotFound(u16),
    /// Unsupported field type
    UnsupportedFieldType(u16),
    /// Unsupported compression method
    UnsupportedCompression(u64),
    /// Unsupported sample layout (bits per sample / sample format)
    UnsupportedSampleFormat(u64, u64),
    /// Image dimensions not found
    MissingDimensions,
    /// Raster carries no usable georeferencing
    MissingGeoreference,
    /// No readable band in the raster
    MissingBand,
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::IoError(e) => write!(f, "I/O error: {}", e),
            MaskError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            MaskError::InvalidBigTiffHeader => write!(f, "Invalid BigTIFF header"),
            MaskError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            MaskError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            MaskError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            MaskError::UnsupportedCompression(c) => write!(f, "Unsupported compression method: {}", c),
            MaskError::UnsupportedSampleFormat(bits, format) =>
                write!(f, "Unsupported sample layout: {} bits, format {}", bits, format),
            MaskError::MissingDimensions => write!(f, "Image dimensions not found"),
            MaskError::MissingGeoreference => write!(f, "No usable georeferencing found"),
            MaskError::MissingBand => write!(f, "Raster has no readable band"),
            MaskError::GenericError(msg) => write!(f, "Vectorization error: {}", msg),
        }
    }
}

impl std::error::Error for MaskError {}

impl From<io::Error> for MaskError {
    fn from(error: io::Error) -> Self {
        MaskError::IoError(error)
    }
}

impl From<String> for MaskError {
    fn from(msg: String) -> Self {
        MaskError::GenericError(msg)
    }
}

/// Result type for vectorization operations
pub type MaskResult<T> = Result<T, MaskError>;
