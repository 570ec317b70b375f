//! Tests for TIFF header and IFD parsing

use std::io::Cursor;
use byteorder::{LittleEndian, WriteBytesExt};

use crate::tiff::TiffReader;
use super::test_utils;

#[test]
fn test_read_classic_tiff() {
    let mut cursor = test_utils::create_test_tiff_buffer();
    let mut reader = TiffReader::new();

    let tiff = reader.read(&mut cursor).unwrap();
    assert!(!tiff.is_big_tiff);
    assert_eq!(tiff.ifd_count(), 1);

    let ifd = tiff.main_ifd().unwrap();
    assert_eq!(ifd.get_dimensions(), Some((800, 600)));
}

#[test]
fn test_read_big_endian_tiff() {
    let mut cursor = test_utils::create_big_endian_tiff_buffer();
    let mut reader = TiffReader::new();

    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();
    assert_eq!(ifd.get_dimensions(), Some((800, 600)));
}

#[test]
fn test_read_bigtiff() {
    let mut cursor = test_utils::create_test_bigtiff_buffer();
    let mut reader = TiffReader::new();

    let tiff = reader.read(&mut cursor).unwrap();
    assert!(tiff.is_big_tiff);
    assert!(reader.is_big_tiff());

    let ifd = tiff.main_ifd().unwrap();
    assert_eq!(ifd.get_dimensions(), Some((1024, 768)));
}

#[test]
fn test_unsupported_version_rejected() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(99).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();
    let mut cursor = Cursor::new(buffer);

    let mut reader = TiffReader::new();
    assert!(reader.read(&mut cursor).is_err());
}

#[test]
fn test_truncated_header_rejected() {
    let mut cursor = Cursor::new(vec![0x49u8]);
    let mut reader = TiffReader::new();
    assert!(reader.read(&mut cursor).is_err());
}

#[test]
fn test_inline_multi_value_shorts_little_endian() {
    let mut cursor = test_utils::create_inline_shorts_tiff_buffer(8, 16);
    let mut reader = TiffReader::new();

    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    let values = reader.read_tag_values(&mut cursor, ifd, 258).unwrap();
    assert_eq!(values, vec![8, 16]);
}

#[test]
fn test_inline_multi_value_shorts_big_endian() {
    let mut cursor = test_utils::create_inline_shorts_bigendian_buffer(8, 16);
    let mut reader = TiffReader::new();

    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    // First declared value must come out first regardless of order
    let values = reader.read_tag_values(&mut cursor, ifd, 258).unwrap();
    assert_eq!(values, vec![8, 16]);
}

#[test]
fn test_external_tag_values() {
    let mut cursor = test_utils::create_external_longs_tiff_buffer([100, 200, 300]);
    let mut reader = TiffReader::new();

    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    let values = reader.read_tag_values(&mut cursor, ifd, 273).unwrap();
    assert_eq!(values, vec![100, 200, 300]);
}

#[test]
fn test_missing_tag_reported() {
    let mut cursor = test_utils::create_test_tiff_buffer();
    let mut reader = TiffReader::new();

    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    assert!(reader.read_tag_values(&mut cursor, ifd, 259).is_err());
}
