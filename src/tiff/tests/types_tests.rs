//! Tests for the TIFF structure types

use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::types::Tiff;

#[test]
fn test_tiff_creation() {
    let tiff = Tiff::new(false);
    assert!(!tiff.is_big_tiff);
    assert_eq!(tiff.ifd_count(), 0);
    assert!(tiff.main_ifd().is_none());
}

#[test]
fn test_main_ifd_is_the_first() {
    let mut tiff = Tiff::new(true);

    let mut first = IFD::new(0, 16);
    first.add_entry(IFDEntry::new(256, 4, 1, 1024));
    first.add_entry(IFDEntry::new(257, 4, 1, 768));
    tiff.ifds.push(first);

    let mut second = IFD::new(1, 100);
    second.add_entry(IFDEntry::new(256, 4, 1, 512));
    tiff.ifds.push(second);

    assert!(tiff.is_big_tiff);
    assert_eq!(tiff.ifd_count(), 2);
    assert_eq!(tiff.main_ifd().unwrap().get_dimensions(), Some((1024, 768)));
}

#[test]
fn test_ifd_entry_lookup() {
    let mut ifd = IFD::new(0, 8);
    ifd.add_entry(IFDEntry::new(259, 3, 1, 8));

    assert!(ifd.has_tag(259));
    assert!(!ifd.has_tag(258));
    assert_eq!(ifd.get_tag_value(259), Some(8));
    assert_eq!(ifd.entry_count(), 1);
    assert!(!ifd.is_tiled());
}

#[test]
fn test_entry_inline_rules() {
    // Three SHORTs need 6 bytes: external in TIFF, inline in BigTIFF
    let entry = IFDEntry::new(258, 3, 3, 170);
    assert_eq!(entry.field_type_size(), 2);
    assert!(!entry.is_value_inline(false));
    assert!(entry.is_value_inline(true));

    // A single DOUBLE never fits a classic value field
    let double_entry = IFDEntry::new(33550, 12, 1, 170);
    assert!(!double_entry.is_value_inline(false));
}

#[test]
fn test_display_marks_geotiff_tags() {
    let mut tiff = Tiff::new(false);
    let mut ifd = IFD::new(0, 8);
    ifd.add_entry(IFDEntry::new(256, 4, 1, 100));
    ifd.add_entry(IFDEntry::new(33550, 12, 3, 200));
    tiff.ifds.push(ifd);

    let rendered = format!("{}", tiff);
    assert!(rendered.contains("Format: TIFF"));
    assert!(rendered.contains("Tag: 256,"));
    assert!(rendered.contains("Tag: 33550 (GeoTIFF)"));
}
