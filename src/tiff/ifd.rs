//! Image File Directory (IFD) structures and methods
//!
//! Core TIFF IFD structures storing per-image metadata. An IFD is a
//! collection of tag entries; a TIFF file can hold several IFDs, but
//! only the first one matters here since band 1 of the main image is
//! the sole input to vectorization.

use std::collections::HashMap;
use std::fmt;
use log::{debug, trace};

use crate::tiff::constants::{field_types, tags};
use crate::tiff::geotags;

/// Represents an entry in an Image File Directory (IFD)
#[derive(Debug, Clone)]
pub struct IFDEntry {
    /// Tag number
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Value (if inline) or offset to the value data
    pub value_offset: u64,
}

impl IFDEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64) -> Self {
        Self { tag, field_type, count, value_offset }
    }

    /// Get the size in bytes for this entry's field type
    pub fn field_type_size(&self) -> usize {
        match self.field_type {
            field_types::BYTE | field_types::ASCII
            | field_types::SBYTE | field_types::UNDEFINED => 1,
            field_types::SHORT | field_types::SSHORT => 2,
            field_types::LONG | field_types::SLONG | field_types::FLOAT => 4,
            field_types::RATIONAL | field_types::SRATIONAL | field_types::DOUBLE => 8,
            field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => 8,
            _ => {
                debug!("Unknown field type: {}, assuming 1 byte", self.field_type);
                1
            }
        }
    }

    /// Determines if the value is stored inline in value_offset
    /// rather than at the offset location
    ///
    /// TIFF allows small values to live directly in the IFD entry: up to
    /// 4 bytes in standard TIFF, 8 bytes in BigTIFF.
    pub fn is_value_inline(&self, is_big_tiff: bool) -> bool {
        let total_size = self.field_type_size() * self.count as usize;
        let inline_size = if is_big_tiff { 8 } else { 4 };
        total_size <= inline_size
    }
}

/// Represents an Image File Directory (IFD) in a TIFF file
#[derive(Debug, Clone)]
pub struct IFD {
    /// Entries in this IFD
    pub entries: Vec<IFDEntry>,
    /// IFD number (0-based)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    /// Cached tag values for quick lookup
    tag_map: HashMap<u16, IFDEntry>,
}

impl IFD {
    /// Creates a new empty IFD
    pub fn new(number: usize, offset: u64) -> Self {
        debug!("Creating new IFD #{} at offset {}", number, offset);

        Self {
            entries: Vec::new(),
            number,
            offset,
            tag_map: HashMap::new(),
        }
    }

    /// Adds an entry and updates the tag lookup cache
    pub fn add_entry(&mut self, entry: IFDEntry) {
        trace!("Adding entry to IFD #{}: tag={}, type={}, count={}, value/offset={}",
               self.number, entry.tag, entry.field_type, entry.count, entry.value_offset);

        self.tag_map.insert(entry.tag, entry.clone());
        self.entries.push(entry);
    }

    /// Gets a tag value (value_offset) directly
    pub fn get_tag_value(&self, tag: u16) -> Option<u64> {
        self.tag_map.get(&tag).map(|entry| entry.value_offset)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Gets an IFD entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.tag_map.get(&tag)
    }

    /// Gets the dimensions of the image described by this IFD
    pub fn get_dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get_tag_value(tags::IMAGE_WIDTH)?;
        let height = self.get_tag_value(tags::IMAGE_LENGTH)?;

        debug!("Image dimensions from IFD #{}: {}x{}", self.number, width, height);

        Some((width, height))
    }

    /// Returns number of samples per pixel (default 1 if not specified)
    pub fn get_samples_per_pixel(&self) -> u64 {
        self.get_tag_value(tags::SAMPLES_PER_PIXEL).unwrap_or(1)
    }

    /// Whether the image data is organized in tiles rather than strips
    pub fn is_tiled(&self) -> bool {
        self.has_tag(tags::TILE_OFFSETS)
    }

    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;

        if let Some((width, height)) = self.get_dimensions() {
            writeln!(f, "  Dimensions: {}x{}", width, height)?;
        }

        writeln!(f, "  Samples per pixel: {}", self.get_samples_per_pixel())?;

        for entry in &self.entries {
            let marker = if geotags::is_geotiff_tag(entry.tag) { " (GeoTIFF)" } else { "" };
            writeln!(f, "  Tag: {}{}, Type: {}, Count: {}, Value/Offset: {}",
                     entry.tag, marker, entry.field_type, entry.count, entry.value_offset)?;
        }

        Ok(())
    }
}
