//! Numeric band buffer
//!
//! A single raster band held as f64 samples in row-major order.
//! Integer sample types widen losslessly; tracing compares values by
//! bit pattern, so the widening never merges distinct classes.

/// A single band of raster data
#[derive(Debug, Clone)]
pub struct Band {
    /// Width of the band (columns)
    pub width: u32,
    /// Height of the band (rows)
    pub height: u32,
    /// Sample values in row-major order
    pub data: Vec<f64>,
}

impl Band {
    /// Create a zero-filled band
    pub fn new(width: u32, height: u32) -> Self {
        Band {
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize)],
        }
    }

    /// Create a band from existing row-major data
    ///
    /// Panics in debug builds if the buffer does not match the
    /// dimensions; callers construct these from checked reads.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        Band { width, height, data }
    }

    /// Get a sample, or None if out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Set a sample; out-of-bounds writes are ignored
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.data[idx] = value;
        }
    }

    /// Number of samples in the band
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the band holds no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_indexing() {
        let mut band = Band::new(3, 2);
        band.set(2, 1, 7.5);

        assert_eq!(band.get(2, 1), Some(7.5));
        assert_eq!(band.get(0, 0), Some(0.0));
        assert_eq!(band.data[5], 7.5);
        assert_eq!(band.len(), 6);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut band = Band::new(2, 2);
        band.set(5, 5, 1.0);

        assert_eq!(band.get(2, 0), None);
        assert_eq!(band.get(0, 2), None);
        assert!(band.data.iter().all(|&v| v == 0.0));
    }
}
