//! TIFF parsing tests

mod test_utils;

mod geotags_tests;
mod reader_tests;
mod types_tests;
