//! TIFF file reader implementation
//!
//! Implements the TIFF/BigTIFF file reader using the Strategy pattern
//! to handle different byte orders.

use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, SeekFrom};
use std::path::Path;

use crate::errors::{MaskError, MaskResult};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::geotags;
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::types::Tiff;
use crate::tiff::validation;
use crate::utils::format_utils;
use crate::utils::ifd_utils;
use crate::utils::tag_utils;

/// Reader for TIFF and BigTIFF files
pub struct TiffReader {
    /// Current byte order handler
    pub(crate) byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    /// Current file path
    current_file: Option<String>,
    /// Whether currently reading BigTIFF format
    pub(crate) is_big_tiff: bool,
}

impl TiffReader {
    /// Creates a new TIFF reader
    pub fn new() -> Self {
        TiffReader {
            byte_order_handler: None,
            current_file: None,
            is_big_tiff: false,
        }
    }

    /// Creates a file reader for the current file
    ///
    /// Used by methods that need a second handle into the file, such as
    /// GeoKey payload reads.
    pub(crate) fn create_reader(&self) -> MaskResult<File> {
        match &self.current_file {
            Some(path) => {
                let file = File::open(path)?;
                Ok(file)
            },
            None => Err(MaskError::GenericError("No file path specified".to_string()))
        }
    }

    /// Returns the byte order handler, with proper error handling for None case
    fn handler(&self) -> MaskResult<&Box<dyn ByteOrderHandler>> {
        self.byte_order_handler.as_ref()
            .ok_or_else(|| MaskError::GenericError("Byte order not yet determined".to_string()))
    }

    /// Loads a TIFF file from the given path
    ///
    /// Opens the file and delegates to the read() method.
    ///
    /// # Arguments
    /// * `filepath` - Path to the TIFF file to load
    ///
    /// # Returns
    /// A Tiff structure containing the file's directories
    pub fn load(&mut self, filepath: &str) -> MaskResult<Tiff> {
        info!("Loading TIFF file: {}", filepath);
        self.current_file = Some(filepath.to_string());

        let path = Path::new(filepath);
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(1024 * 1024, file); // 1MB buffer

        self.read(&mut reader)
    }

    /// Reads a TIFF file from the given reader
    ///
    /// 1. Detect byte order (little/big endian)
    /// 2. Check for TIFF or BigTIFF format
    /// 3. Read all IFDs (Image File Directories)
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> MaskResult<Tiff> {
        debug!("TiffReader::read starting");

        // Detect and set up byte order
        self.byte_order_handler = Some(format_utils::detect_byte_order(reader)?);

        let handler = self.byte_order_handler.as_ref().unwrap();
        let (is_big_tiff, _) = format_utils::detect_tiff_format(reader, handler)?;
        self.is_big_tiff = is_big_tiff;

        let mut tiff = Tiff::new(self.is_big_tiff);

        // Get a fresh reference to the handler after modifying self
        let handler = self.byte_order_handler.as_ref().unwrap();

        let first_ifd_offset = ifd_utils::read_first_ifd_offset(reader, self.is_big_tiff, handler)?;
        debug!("First IFD offset: {}", first_ifd_offset);

        let file_size = validation::get_file_size(reader)?;
        validation::validate_ifd_offset(first_ifd_offset, file_size)?;

        tiff.ifds = self.read_ifd_chain(reader, first_ifd_offset)?;

        info!("Read {} IFDs from TIFF file", tiff.ifds.len());
        debug!("{}", tiff);
        Ok(tiff)
    }

    /// Reads a chain of IFDs starting from the given offset
    fn read_ifd_chain(&self, reader: &mut dyn SeekableReader, first_ifd_offset: u64) -> MaskResult<Vec<IFD>> {
        let mut ifds = Vec::new();
        let mut ifd_offset = first_ifd_offset;
        let mut ifd_number = 0;
        let max_ifds = 100; // Reasonable limit to prevent infinite loops
        let handler = self.handler()?;

        while ifd_offset != 0 && ifd_number < max_ifds {
            debug!("Reading IFD at offset: {}", ifd_offset);

            let file_size = validation::get_file_size(reader)?;

            if ifd_offset >= file_size {
                warn!("IFD offset {} exceeds file size {}, stopping IFD chain",
                      ifd_offset, file_size);
                break;
            }

            match self.read_ifd(reader, ifd_offset, ifd_number) {
                Ok(ifd) => {
                    debug!("Successfully read IFD with {} entries", ifd.entries.len());

                    let next_offset_position = ifd_offset + ifd_utils::calculate_ifd_size(&ifd, self.is_big_tiff)
                        - if self.is_big_tiff { 8 } else { 4 };

                    if next_offset_position >= file_size {
                        warn!("Next IFD offset position {} exceeds file size {}",
                              next_offset_position, file_size);
                        ifds.push(ifd);
                        break;
                    }

                    if let Err(e) = reader.seek(SeekFrom::Start(next_offset_position)) {
                        warn!("Error seeking to next IFD offset: {}", e);
                        ifds.push(ifd);
                        break;
                    }

                    let next_ifd_offset = match ifd_utils::read_next_ifd_offset(reader, self.is_big_tiff, handler) {
                        Ok(offset) => offset,
                        Err(e) => {
                            warn!("Error reading next IFD offset: {}", e);
                            ifds.push(ifd);
                            break;
                        }
                    };

                    debug!("Next IFD offset: {}", next_ifd_offset);

                    // Sanity check for next IFD offset
                    if next_ifd_offset != 0 && (next_ifd_offset >= file_size || next_ifd_offset < 8) {
                        warn!("Invalid next IFD offset: {}, stopping IFD chain", next_ifd_offset);
                        ifds.push(ifd);
                        break;
                    }

                    ifds.push(ifd);
                    ifd_offset = next_ifd_offset;
                    ifd_number += 1;
                },
                Err(e) => {
                    warn!("Error reading IFD {}: {}", ifd_number, e);
                    break;
                }
            }
        }

        Ok(ifds)
    }

    /// Reads an IFD from the reader
    ///
    /// An IFD consists of an entry count followed by a series of entries,
    /// each describing one aspect of the image.
    pub fn read_ifd(&self, reader: &mut dyn SeekableReader, offset: u64, number: usize) -> MaskResult<IFD> {
        reader.seek(SeekFrom::Start(offset))?;

        let entry_count = self.read_ifd_entry_count(reader)?;
        debug!("IFD entry count: {}", entry_count);

        let mut ifd = IFD::new(number, offset);

        for _ in 0..entry_count {
            let entry = self.read_ifd_entry(reader)?;
            ifd.add_entry(entry);
        }

        debug!("Read IFD with {} entries", ifd.entries.len());
        Ok(ifd)
    }

    /// Reads the entry count from an IFD
    fn read_ifd_entry_count(&self, reader: &mut dyn SeekableReader) -> MaskResult<u64> {
        let handler = self.handler()?;
        if self.is_big_tiff {
            handler.read_u64(reader).map_err(MaskError::IoError)
        } else {
            handler.read_u16(reader)
                .map(|v| v as u64)
                .map_err(MaskError::IoError)
        }
    }

    /// Reads a single IFD entry
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader) -> MaskResult<IFDEntry> {
        let handler = self.handler()?;

        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;
        let count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        let value_offset = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        Ok(IFDEntry::new(tag, field_type, count, value_offset))
    }

    /// Reads a tag's value as a vector of u64
    ///
    /// Handles inline values and offset values transparently.
    pub fn read_tag_values(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> MaskResult<Vec<u64>> {
        let entry = ifd.get_entry(tag)
            .ok_or(MaskError::TagNotFound(tag))?;

        debug!("Reading tag {} ({}), count {}", tag, geotags::get_tag_name(tag), entry.count);

        let mut values = Vec::with_capacity(entry.count as usize);

        if tag_utils::is_value_inline(entry, self.is_big_tiff) {
            self.read_inline_values(entry, &mut values)?;
        } else {
            reader.seek(SeekFrom::Start(entry.value_offset))?;
            let handler = self.handler()?;
            tag_utils::read_tag_value_array(reader, entry, handler, &mut values)?;
        }

        Ok(values)
    }

    /// Unpacks inline values from an entry's value_offset field
    ///
    /// Multi-value inline entries (e.g. two SHORTs in four bytes) are
    /// split out of the packed representation. The value field was read
    /// as one integer in file byte order, so in big-endian files the
    /// first value occupies the high bits. Only unsigned integer field
    /// types are packed this way in the files this crate reads.
    fn read_inline_values(&self, entry: &IFDEntry, values: &mut Vec<u64>) -> MaskResult<()> {
        let order = self.handler()?.order();

        let size = entry.field_type_size();
        let bits = (size * 8) as u32;
        let mask = if size >= 8 { u64::MAX } else { (1u64 << bits) - 1 };
        let slots = if self.is_big_tiff { 8 } else { 4 } / size.max(1);

        for i in 0..entry.count as usize {
            let shift = match order {
                ByteOrder::LittleEndian => bits * i as u32,
                ByteOrder::BigEndian => bits * (slots.saturating_sub(1 + i)) as u32,
            };
            values.push((entry.value_offset >> shift) & mask);
        }

        Ok(())
    }

    /// Returns whether the current file is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.is_big_tiff
    }

    /// Gets the current byte order handler
    pub fn get_byte_order_handler(&self) -> Option<&Box<dyn ByteOrderHandler>> {
        self.byte_order_handler.as_ref()
    }
}

impl Default for TiffReader {
    fn default() -> Self {
        Self::new()
    }
}
