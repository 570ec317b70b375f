//! Tile-based band extraction
//!
//! Reads band 1 out of tiled TIFF files. Tiled TIFFs organize image
//! data in rectangular tiles of equal size; edge tiles are padded to
//! the full tile dimensions and the padding is discarded on copy.

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

/// Reads band data from tiled TIFF files
pub struct TileReader<'a, R: SeekableReader> {
    /// Reader for accessing the TIFF file
    reader: R,
    /// IFD containing the image metadata
    ifd: &'a IFD,
    /// TIFF reader for accessing tag values
    tiff_reader: &'a TiffReader,
}

impl<'a, R: SeekableReader> TileReader<'a, R> {
    /// Create a new tile reader
    pub fn new(reader: R, ifd: &'a IFD, tiff_reader: &'a TiffReader) -> Self {
        TileReader { reader, ifd, tiff_reader }
    }

    /// Get tile dimensions from the IFD, defaulting to 256x256
    fn get_tile_dimensions(&self) -> (u32, u32) {
        let tile_width = self.ifd.get_tag_value(tags::TILE_WIDTH).unwrap_or(256) as u32;
        let tile_height = self.ifd.get_tag_value(tags::TILE_LENGTH).unwrap_or(256) as u32;

        (tile_width, tile_height)
    }

    /// Read band 1 of the image into a `Band`
    pub fn read_band(&mut self) -> MaskResult<Band> {
        let (width, height) = self.ifd.get_dimensions()
            .ok_or(MaskError::MissingDimensions)?;
        let (width, height) = (width as u32, height as u32);

        let (tile_width, tile_height) = self.get_tile_dimensions();
        let tiles_across = (width + tile_width - 1) / tile_width;
        let tiles_down = (height + tile_height - 1) / tile_height;

        let compression = self.ifd.get_tag_value(tags::COMPRESSION).unwrap_or(1);
        let compression_handler = CompressionFactory::create_handler(compression)?;
        info!("Using compression: {}", compression_handler.name());

        let predictor = self.ifd.get_tag_value(tags::PREDICTOR).unwrap_or(pred_consts::NONE);
        let layout = SampleLayout::from_ifd(self.ifd);

        let tile_offsets = self.tiff_reader.read_tag_values(&mut self.reader, self.ifd, tags::TILE_OFFSETS)?;
        let tile_byte_counts = self.tiff_reader.read_tag_values(&mut self.reader, self.ifd, tags::TILE_BYTE_COUNTS)?;

        if tile_offsets.is_empty() || tile_offsets.len() != tile_byte_counts.len() {
            return Err(MaskError::MissingBand);
        }

        debug!("Tiles: {}x{} of {}x{} pixels", tiles_across, tiles_down, tile_width, tile_height);

        // Band 1 is the first plane; planar files store each plane's
        // tiles consecutively, so the first grid of tiles is enough.
        let tiles_for_band = (tiles_across * tiles_down) as usize;
        if layout.planar != planar_config::PLANAR && tile_offsets.len() < tiles_for_band {
            return Err(MaskError::GenericError(format!(
                "Expected {} tiles, found {}", tiles_for_band, tile_offsets.len())));
        }

        let interleave = layout.interleave();
        let handler = self.tiff_reader.get_byte_order_handler()
            .ok_or_else(|| MaskError::GenericError("Byte order not yet determined".to_string()))?;

        let mut band = Band::new(width, height);

        for tile_index in 0..tiles_for_band.min(tile_offsets.len()) {
            let tx = tile_index as u32 % tiles_across;
            let ty = tile_index as u32 / tiles_across;
            let x0 = tx * tile_width;
            let y0 = ty * tile_height;

            self.reader.seek(SeekFrom::Start(tile_offsets[tile_index]))?;
            let mut compressed = vec![0u8; tile_byte_counts[tile_index] as usize];
            self.reader.read_exact(&mut compressed)?;

            let mut data = compression_handler.decompress(&compressed)?;

            if predictor == pred_consts::HORIZONTAL_DIFFERENCING {
                let row_bytes = tile_width as usize * interleave * layout.bytes_per_sample();
                apply_horizontal_predictor(&mut data, &layout, row_bytes, tile_height as usize)?;
            }

            let sample_count = tile_width as usize * tile_height as usize * interleave;
            let samples = decode_samples(&data, &layout, handler, sample_count)?;

            // Copy the valid region, discarding edge padding
            let copy_w = tile_width.min(width - x0);
            let copy_h = tile_height.min(height - y0);
            for y in 0..copy_h {
                for x in 0..copy_w {
                    let idx = (y as usize * tile_width as usize + x as usize) * interleave;
                    band.set(x0 + x, y0 + y, samples[idx]);
                }
            }
        }

        Ok(band)
    }
}
