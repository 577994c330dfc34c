//! Tests for the TIFF and IFD containers

extern crate std;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::tags;
use crate::tiff::field::{FieldType, FieldValue, TypedField, ValueStorage};
use crate::tiff::header::{FileHeader, TiffVariant};
use crate::tiff::ifd::IFD;
use crate::tiff::types::TIFF;

fn long_field(tag: u16, value: u32) -> TypedField {
    TypedField {
        tag,
        field_type: FieldType::Long,
        count: 1,
        value_offset: value as u64,
        storage: ValueStorage::Inline,
        value: FieldValue::Long(vec![value]),
    }
}

fn header(identifier: u16) -> FileHeader {
    FileHeader { byte_order: ByteOrder::LittleEndian, identifier, first_directory_offset: 8 }
}

#[test]
fn test_tiff_creation() {
    let tiff = TIFF::new(header(42));
    std::assert!(!tiff.is_big_tiff());
    std::assert_eq!(tiff.ifd_count(), 0);
    std::assert!(tiff.main_ifd().is_none());
    std::assert!(tiff.fields.is_empty());
}

#[test]
fn test_tiff_with_ifds() {
    let mut tiff = TIFF::new(header(43));

    let mut main_ifd = IFD::new(0, 16);
    main_ifd.add_entry(long_field(tags::IMAGE_WIDTH, 1024));
    main_ifd.add_entry(long_field(tags::IMAGE_LENGTH, 768));
    tiff.push_ifd(main_ifd);

    // Reduced resolution image
    let mut overview_ifd = IFD::new(1, 100);
    overview_ifd.add_entry(long_field(tags::NEW_SUBFILE_TYPE, 1));
    overview_ifd.add_entry(long_field(tags::IMAGE_WIDTH, 512));
    tiff.push_ifd(overview_ifd);

    std::assert!(tiff.is_big_tiff());
    std::assert_eq!(tiff.ifd_count(), 2);
    std::assert_eq!(tiff.main_ifd().unwrap().get_dimensions(), Some((1024, 768)));

    // The later directory wins for a repeated tag, others are kept
    std::assert_eq!(tiff.fields.len(), 3);
    std::assert_eq!(tiff.field(tags::IMAGE_WIDTH).unwrap().as_long().unwrap(), 512);
    std::assert_eq!(tiff.field(tags::IMAGE_LENGTH).unwrap().as_long().unwrap(), 768);
    std::assert_eq!(tiff.field(tags::NEW_SUBFILE_TYPE).unwrap().as_long().unwrap(), 1);
}

#[test]
fn test_flattened_fields_are_ordered_by_tag() {
    let mut tiff = TIFF::new(header(42));
    let mut ifd = IFD::new(0, 8);
    ifd.add_entry(long_field(tags::ROWS_PER_STRIP, 16));
    ifd.add_entry(long_field(tags::IMAGE_WIDTH, 4));
    tiff.push_ifd(ifd);

    let order: Vec<u16> = tiff.fields.keys().copied().collect();
    std::assert_eq!(order, vec![tags::IMAGE_WIDTH, tags::ROWS_PER_STRIP]);
}

#[test]
fn test_ifd_lookup() {
    let mut ifd = IFD::new(0, 8);
    ifd.add_entry(long_field(tags::IMAGE_WIDTH, 10));
    ifd.add_entry(long_field(tags::SAMPLES_PER_PIXEL, 3));

    std::assert!(ifd.has_tag(tags::IMAGE_WIDTH));
    std::assert!(!ifd.has_tag(tags::IMAGE_LENGTH));
    std::assert_eq!(ifd.get_dimensions(), None);
    std::assert_eq!(ifd.get_samples_per_pixel(), 3);
    std::assert_eq!(ifd.entry_count(), 2);
    std::assert_eq!(ifd.byte_size(TiffVariant::Classic), 2 + 2 * 12 + 4);
    std::assert_eq!(ifd.byte_size(TiffVariant::Big), 8 + 2 * 20 + 8);
}

#[test]
fn test_ifd_display_names_tags() {
    let mut ifd = IFD::new(0, 8);
    ifd.add_entry(long_field(tags::IMAGE_WIDTH, 10));
    ifd.add_entry(long_field(tags::IMAGE_LENGTH, 20));

    let text = ifd.to_string();
    std::assert!(text.contains("IFD #0"));
    std::assert!(text.contains("Dimensions: 10x20"));
    std::assert!(text.contains("ImageWidth"));
}
