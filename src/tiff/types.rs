//! Core TIFF data structures

use std::fmt;
use crate::tiff::ifd::IFD;

/// Represents a TIFF file with its Image File Directories (IFDs)
#[derive(Debug)]
pub struct Tiff {
    /// Image File Directories in the TIFF file
    pub ifds: Vec<IFD>,
    /// Whether this is a BigTIFF format
    pub is_big_tiff: bool,
}

impl Tiff {
    /// Creates a new empty TIFF structure
    pub fn new(is_big_tiff: bool) -> Self {
        Tiff {
            ifds: Vec::new(),
            is_big_tiff,
        }
    }

    /// Returns the main (first) IFD if available
    pub fn main_ifd(&self) -> Option<&IFD> {
        self.ifds.first()
    }

    /// Returns the number of IFDs in the TIFF file
    pub fn ifd_count(&self) -> usize {
        self.ifds.len()
    }
}

impl fmt::Display for Tiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIFF File:")?;
        writeln!(f, "  Format: {}", if self.is_big_tiff { "BigTIFF" } else { "TIFF" })?;
        writeln!(f, "  Number of IFDs: {}", self.ifds.len())?;

        if let Some(ifd) = self.main_ifd() {
            write!(f, "{}", ifd)?;
        }

        Ok(())
    }
}
