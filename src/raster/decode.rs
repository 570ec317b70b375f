//! Sample decoding for strip and tile payloads
//!
//! Converts decompressed strip/tile bytes into f64 samples according
//! to the BitsPerSample and SampleFormat tags, using the file's byte
//! order.

use std::io::Cursor;
use byteorder::ReadBytesExt;
use log::warn;

use crate::errors::{MaskError, MaskResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::constants::{planar_config, sample_format, tags};
use crate::tiff::ifd::IFD;

/// Describes how samples are laid out in strip/tile data
#[derive(Debug, Clone, Copy)]
pub struct SampleLayout {
    /// Bits per sample (8, 16, 32 or 64)
    pub bits: u64,
    /// SampleFormat code (unsigned/signed/float)
    pub format: u64,
    /// Samples per pixel
    pub samples_per_pixel: u64,
    /// PlanarConfiguration code
    pub planar: u64,
}

impl SampleLayout {
    /// Build the layout from an IFD, applying TIFF defaults
    pub fn from_ifd(ifd: &IFD) -> Self {
        SampleLayout {
            bits: ifd.get_tag_value(tags::BITS_PER_SAMPLE).unwrap_or(8),
            format: ifd.get_tag_value(tags::SAMPLE_FORMAT).unwrap_or(sample_format::UNSIGNED),
            samples_per_pixel: ifd.get_samples_per_pixel(),
            planar: ifd.get_tag_value(tags::PLANAR_CONFIGURATION).unwrap_or(planar_config::CHUNKY),
        }
    }

    /// Bytes occupied by one sample
    pub fn bytes_per_sample(&self) -> usize {
        (self.bits as usize) / 8
    }

    /// Samples interleaved per pixel within strip/tile data
    ///
    /// Chunky files interleave all samples; planar files carry one
    /// sample per pixel per plane.
    pub fn interleave(&self) -> usize {
        if self.planar == planar_config::PLANAR {
            1
        } else {
            self.samples_per_pixel as usize
        }
    }
}

/// Decode `count` consecutive samples from raw bytes into f64
pub fn decode_samples(
    raw: &[u8],
    layout: &SampleLayout,
    handler: &Box<dyn ByteOrderHandler>,
    count: usize
) -> MaskResult<Vec<f64>> {
    let needed = count * layout.bytes_per_sample();
    if raw.len() < needed {
        return Err(MaskError::GenericError(format!(
            "Strip/tile data too short: {} bytes, expected {}", raw.len(), needed)));
    }

    let mut cursor = Cursor::new(raw);
    let mut samples = Vec::with_capacity(count);

    for _ in 0..count {
        let value = match (layout.bits, layout.format) {
            (8, sample_format::UNSIGNED) => cursor.read_u8()? as f64,
            (8, sample_format::SIGNED) => cursor.read_i8()? as f64,
            (16, sample_format::UNSIGNED) => handler.read_u16(&mut cursor)? as f64,
            (16, sample_format::SIGNED) => handler.read_i16(&mut cursor)? as f64,
            (32, sample_format::UNSIGNED) => handler.read_u32(&mut cursor)? as f64,
            (32, sample_format::SIGNED) => handler.read_i32(&mut cursor)? as f64,
            (32, sample_format::IEEE_FLOAT) => handler.read_f32(&mut cursor)? as f64,
            (64, sample_format::UNSIGNED) => handler.read_u64(&mut cursor)? as f64,
            (64, sample_format::SIGNED) => handler.read_i64(&mut cursor)? as f64,
            (64, sample_format::IEEE_FLOAT) => handler.read_f64(&mut cursor)?,
            (bits, format) => return Err(MaskError::UnsupportedSampleFormat(bits, format)),
        };
        samples.push(value);
    }

    Ok(samples)
}

/// Reverse horizontal differencing (predictor 2) in place
///
/// Only defined here for 8-bit data, where the differencing is
/// byte-wise per row. Wider samples with predictor 2 are rare in the
/// wild for mask rasters; they are reported rather than mis-decoded.
pub fn apply_horizontal_predictor(
    data: &mut [u8],
    layout: &SampleLayout,
    row_samples: usize,
    rows: usize
) -> MaskResult<()> {
    if layout.bits != 8 {
        warn!("Predictor 2 with {}-bit samples is not supported", layout.bits);
        return Err(MaskError::UnsupportedSampleFormat(layout.bits, layout.format));
    }

    for row in 0..rows {
        let start = row * row_samples;
        let end = (start + row_samples).min(data.len());
        for i in (start + 1)..end {
            data[i] = data[i].wrapping_add(data[i - 1]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::byte_order::ByteOrder;
    use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

    fn le_handler() -> Box<dyn ByteOrderHandler> {
        ByteOrder::LittleEndian.create_handler()
    }

    #[test]
    fn test_decode_u8_samples() {
        let layout = SampleLayout {
            bits: 8,
            format: sample_format::UNSIGNED,
            samples_per_pixel: 1,
            planar: planar_config::CHUNKY,
        };
        let raw = [0u8, 1, 1, 255];
        let samples = decode_samples(&raw, &layout, &le_handler(), 4).unwrap();
        assert_eq!(samples, vec![0.0, 1.0, 1.0, 255.0]);
    }

    #[test]
    fn test_decode_f32_samples() {
        let layout = SampleLayout {
            bits: 32,
            format: sample_format::IEEE_FLOAT,
            samples_per_pixel: 1,
            planar: planar_config::CHUNKY,
        };
        let mut raw = Vec::new();
        raw.write_f32::<LittleEndian>(1.0).unwrap();
        raw.write_f32::<LittleEndian>(-2.5).unwrap();
        let samples = decode_samples(&raw, &layout, &le_handler(), 2).unwrap();
        assert_eq!(samples, vec![1.0, -2.5]);
    }

    #[test]
    fn test_decode_i16_samples() {
        let layout = SampleLayout {
            bits: 16,
            format: sample_format::SIGNED,
            samples_per_pixel: 1,
            planar: planar_config::CHUNKY,
        };
        let mut raw = Vec::new();
        raw.write_i16::<LittleEndian>(-7).unwrap();
        raw.write_i16::<LittleEndian>(1).unwrap();
        let samples = decode_samples(&raw, &layout, &le_handler(), 2).unwrap();
        assert_eq!(samples, vec![-7.0, 1.0]);
    }

    #[test]
    fn test_decode_u64_samples() {
        let layout = SampleLayout {
            bits: 64,
            format: sample_format::UNSIGNED,
            samples_per_pixel: 1,
            planar: planar_config::CHUNKY,
        };
        let mut raw = Vec::new();
        raw.write_u64::<LittleEndian>(1).unwrap();
        raw.write_u64::<LittleEndian>(0).unwrap();
        let samples = decode_samples(&raw, &layout, &le_handler(), 2).unwrap();
        assert_eq!(samples, vec![1.0, 0.0]);
    }

    #[test]
    fn test_decode_i64_samples_big_endian() {
        let layout = SampleLayout {
            bits: 64,
            format: sample_format::SIGNED,
            samples_per_pixel: 1,
            planar: planar_config::CHUNKY,
        };
        let mut raw = Vec::new();
        raw.write_i64::<BigEndian>(-2).unwrap();
        raw.write_i64::<BigEndian>(1).unwrap();
        let handler = ByteOrder::BigEndian.create_handler();
        let samples = decode_samples(&raw, &layout, &handler, 2).unwrap();
        assert_eq!(samples, vec![-2.0, 1.0]);
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        let layout = SampleLayout {
            bits: 16,
            format: sample_format::UNSIGNED,
            samples_per_pixel: 1,
            planar: planar_config::CHUNKY,
        };
        let raw = [0u8; 3];
        assert!(decode_samples(&raw, &layout, &le_handler(), 2).is_err());
    }

    #[test]
    fn test_horizontal_predictor_accumulates_per_row() {
        let layout = SampleLayout {
            bits: 8,
            format: sample_format::UNSIGNED,
            samples_per_pixel: 1,
            planar: planar_config::CHUNKY,
        };
        // Two rows of 3 samples, stored as differences
        let mut data = vec![1, 1, 1, 5, 0, 251];
        apply_horizontal_predictor(&mut data, &layout, 3, 2).unwrap();
        assert_eq!(data, vec![1, 2, 3, 5, 5, 0]);
    }
}
