//! Builders for in-memory TIFF buffers used across the parsing tests

use std::io::Cursor;
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

/// A minimal little-endian TIFF: header plus one IFD with dimensions
pub fn create_test_tiff_buffer() -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    buffer.write_u16::<LittleEndian>(0x4949).unwrap(); // II
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();      // IFD offset

    buffer.write_u16::<LittleEndian>(2).unwrap();      // entry count

    // ImageWidth
    buffer.write_u16::<LittleEndian>(256).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();      // LONG
    buffer.write_u32::<LittleEndian>(1).unwrap();
    buffer.write_u32::<LittleEndian>(800).unwrap();

    // ImageLength
    buffer.write_u16::<LittleEndian>(257).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();
    buffer.write_u32::<LittleEndian>(1).unwrap();
    buffer.write_u32::<LittleEndian>(600).unwrap();

    // No further IFDs
    buffer.write_u32::<LittleEndian>(0).unwrap();

    Cursor::new(buffer)
}

/// The same minimal image as a big-endian (MM) TIFF
pub fn create_big_endian_tiff_buffer() -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    buffer.write_u16::<BigEndian>(0x4D4D).unwrap();    // MM
    buffer.write_u16::<BigEndian>(42).unwrap();
    buffer.write_u32::<BigEndian>(8).unwrap();

    buffer.write_u16::<BigEndian>(2).unwrap();

    buffer.write_u16::<BigEndian>(256).unwrap();
    buffer.write_u16::<BigEndian>(4).unwrap();
    buffer.write_u32::<BigEndian>(1).unwrap();
    buffer.write_u32::<BigEndian>(800).unwrap();

    buffer.write_u16::<BigEndian>(257).unwrap();
    buffer.write_u16::<BigEndian>(4).unwrap();
    buffer.write_u32::<BigEndian>(1).unwrap();
    buffer.write_u32::<BigEndian>(600).unwrap();

    buffer.write_u32::<BigEndian>(0).unwrap();

    Cursor::new(buffer)
}

/// A minimal little-endian BigTIFF with the same dimensions
pub fn create_test_bigtiff_buffer() -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    buffer.write_u16::<LittleEndian>(0x4949).unwrap(); // II
    buffer.write_u16::<LittleEndian>(43).unwrap();     // BigTIFF
    buffer.write_u16::<LittleEndian>(8).unwrap();      // offset size
    buffer.write_u16::<LittleEndian>(0).unwrap();      // reserved
    buffer.write_u64::<LittleEndian>(16).unwrap();     // IFD offset

    buffer.write_u64::<LittleEndian>(2).unwrap();      // entry count

    buffer.write_u16::<LittleEndian>(256).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();
    buffer.write_u64::<LittleEndian>(1).unwrap();
    buffer.write_u64::<LittleEndian>(1024).unwrap();

    buffer.write_u16::<LittleEndian>(257).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();
    buffer.write_u64::<LittleEndian>(1).unwrap();
    buffer.write_u64::<LittleEndian>(768).unwrap();

    buffer.write_u64::<LittleEndian>(0).unwrap();

    Cursor::new(buffer)
}

/// A little-endian TIFF whose single IFD carries BitsPerSample with
/// two SHORT values packed inline
pub fn create_inline_shorts_tiff_buffer(first: u16, second: u16) -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();

    buffer.write_u16::<LittleEndian>(1).unwrap();

    buffer.write_u16::<LittleEndian>(258).unwrap();    // BitsPerSample
    buffer.write_u16::<LittleEndian>(3).unwrap();      // SHORT
    buffer.write_u32::<LittleEndian>(2).unwrap();
    buffer.write_u16::<LittleEndian>(first).unwrap();
    buffer.write_u16::<LittleEndian>(second).unwrap();

    buffer.write_u32::<LittleEndian>(0).unwrap();

    Cursor::new(buffer)
}

/// The big-endian twin of [`create_inline_shorts_tiff_buffer`]
pub fn create_inline_shorts_bigendian_buffer(first: u16, second: u16) -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    buffer.write_u16::<BigEndian>(0x4D4D).unwrap();
    buffer.write_u16::<BigEndian>(42).unwrap();
    buffer.write_u32::<BigEndian>(8).unwrap();

    buffer.write_u16::<BigEndian>(1).unwrap();

    buffer.write_u16::<BigEndian>(258).unwrap();
    buffer.write_u16::<BigEndian>(3).unwrap();
    buffer.write_u32::<BigEndian>(2).unwrap();
    buffer.write_u16::<BigEndian>(first).unwrap();
    buffer.write_u16::<BigEndian>(second).unwrap();

    buffer.write_u32::<BigEndian>(0).unwrap();

    Cursor::new(buffer)
}

/// A little-endian TIFF with a three-value LONG tag stored out of line
///
/// The values live after the IFD, at the offset the entry points to.
pub fn create_external_longs_tiff_buffer(values: [u32; 3]) -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();

    // IFD at 8: count (2) + one entry (12) + next offset (4) = 26
    buffer.write_u16::<LittleEndian>(1).unwrap();

    buffer.write_u16::<LittleEndian>(273).unwrap();    // StripOffsets
    buffer.write_u16::<LittleEndian>(4).unwrap();      // LONG
    buffer.write_u32::<LittleEndian>(3).unwrap();
    buffer.write_u32::<LittleEndian>(26).unwrap();     // data offset

    buffer.write_u32::<LittleEndian>(0).unwrap();

    for value in values {
        buffer.write_u32::<LittleEndian>(value).unwrap();
    }

    Cursor::new(buffer)
}
