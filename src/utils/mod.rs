//! Utility modules shared across the crate

pub mod logger;
pub mod progress;
pub mod format_utils;
pub mod ifd_utils;
pub mod tag_utils;
pub mod path_utils;
