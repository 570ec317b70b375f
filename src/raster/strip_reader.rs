//! Strip-based band extraction
//!
//! Reads band 1 out of stripped TIFF files. Stripped TIFFs organize
//! image data in horizontal strips across the entire width of the
//! image, which suits the row-by-row fill of the band buffer.

use log::{debug, info};
use std::io::SeekFrom;

use crate::compression::CompressionFactory;
use crate::errors::{MaskError, MaskResult};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{planar_config, predictor as pred_consts, tags};
use crate::tiff::ifd::IFD;
use crate::tiff::TiffReader;

use super::band::Band;
use super::decode::{apply_horizontal_predictor, decode_samples, SampleLayout};

/// Reads band data from stripped TIFF files
pub struct StripReader<'a, R: SeekableReader> {
    /// Reader for accessing the TIFF file
    reader: R,
    /// IFD containing the image metadata
    ifd: &'a IFD,
    /// TIFF reader for accessing tag values
    tiff_reader: &'a TiffReader,
}

impl<'a, R: SeekableReader> StripReader<'a, R> {
    /// Create a new strip reader
    pub fn new(reader: R, ifd: &'a IFD, tiff_reader: &'a TiffReader) -> Self {
        StripReader { reader, ifd, tiff_reader }
    }

    /// Read band 1 of the image into a `Band`
    ///
    /// For chunky data the first sample of each pixel is taken; for
    /// planar data only the first plane's strips are read.
    pub fn read_band(&mut self) -> MaskResult<Band> {
        let (width, height) = self.ifd.get_dimensions()
            .ok_or(MaskError::MissingDimensions)?;
        let (width, height) = (width as u32, height as u32);

        let rows_per_strip = self.ifd.get_tag_value(tags::ROWS_PER_STRIP)
            .unwrap_or(height as u64) as u32;

        let compression = self.ifd.get_tag_value(tags::COMPRESSION).unwrap_or(1);
        let compression_handler = CompressionFactory::create_handler(compression)?;
        info!("Using compression: {}", compression_handler.name());

        let predictor = self.ifd.get_tag_value(tags::PREDICTOR).unwrap_or(pred_consts::NONE);
        let layout = SampleLayout::from_ifd(self.ifd);

        let strip_offsets = self.tiff_reader.read_tag_values(&mut self.reader, self.ifd, tags::STRIP_OFFSETS)?;
        let strip_byte_counts = self.tiff_reader.read_tag_values(&mut self.reader, self.ifd, tags::STRIP_BYTE_COUNTS)?;

        if strip_offsets.is_empty() || strip_offsets.len() != strip_byte_counts.len() {
            return Err(MaskError::MissingBand);
        }

        debug!("Rows per strip: {}, total strips: {}", rows_per_strip, strip_offsets.len());

        // Band 1 lives in the first plane; for planar files its strips
        // come first in the offsets array.
        let strips_for_band = if layout.planar == planar_config::PLANAR {
            (height as usize + rows_per_strip as usize - 1) / rows_per_strip as usize
        } else {
            strip_offsets.len()
        };

        let interleave = layout.interleave();
        let handler = self.tiff_reader.get_byte_order_handler()
            .ok_or_else(|| MaskError::GenericError("Byte order not yet determined".to_string()))?;

        let mut band = Band::new(width, height);

        for (strip_index, (&offset, &byte_count)) in strip_offsets.iter()
            .zip(strip_byte_counts.iter())
            .take(strips_for_band)
            .enumerate()
        {
            let row_start = strip_index as u32 * rows_per_strip;
            if row_start >= height {
                break;
            }
            let rows = rows_per_strip.min(height - row_start);

            self.reader.seek(SeekFrom::Start(offset))?;
            let mut compressed = vec![0u8; byte_count as usize];
            self.reader.read_exact(&mut compressed)?;

            let mut data = compression_handler.decompress(&compressed)?;

            if predictor == pred_consts::HORIZONTAL_DIFFERENCING {
                let row_bytes = width as usize * interleave * layout.bytes_per_sample();
                apply_horizontal_predictor(&mut data, &layout, row_bytes, rows as usize)?;
            }

            let sample_count = rows as usize * width as usize * interleave;
            let samples = decode_samples(&data, &layout, handler, sample_count)?;

            for y in 0..rows {
                for x in 0..width {
                    let idx = (y as usize * width as usize + x as usize) * interleave;
                    band.set(x, row_start + y, samples[idx]);
                }
            }
        }

        Ok(band)
    }
}
