//! Progress reporting for long-running raster scans

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over raster rows
///
/// Tracing a large raster walks every row twice (labeling, then edge
/// collection); the bar is keyed to rows so both passes report against
/// the same total.
pub struct RowProgress {
    bar: ProgressBar,
}

impl RowProgress {
    /// Create a progress bar over `rows` raster rows
    pub fn new(rows: u64, description: &str) -> Self {
        let bar = ProgressBar::new(rows);
        bar.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"));
        bar.set_message(description.to_string());

        RowProgress { bar }
    }

    /// Advance by one row
    pub fn row_done(&self) {
        self.bar.inc(1);
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
