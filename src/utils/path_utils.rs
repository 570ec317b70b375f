//! Output path resolution

use std::path::{Path, PathBuf};

/// Resolves the output path for a generated vector file
///
/// When `outdir` is given the file lands there; otherwise it lands in
/// the same directory as the input raster.
pub fn resolve_output_path(raster: &str, outname: &str, outdir: Option<&str>) -> PathBuf {
    match outdir {
        Some(dir) => Path::new(dir).join(outname),
        None => {
            let parent = Path::new(raster).parent().unwrap_or_else(|| Path::new(""));
            parent.join(outname)
        }
    }
}
