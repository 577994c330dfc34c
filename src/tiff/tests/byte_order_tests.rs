//! Tests for the byte order module

extern crate std;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
use crate::tiff::errors::TiffError;

#[test]
fn test_byte_order_detection_little_endian() {
    let result = ByteOrder::from_marker(*b"II");
    std::assert_eq!(result.unwrap(), ByteOrder::LittleEndian);
}

#[test]
fn test_byte_order_detection_big_endian() {
    let result = ByteOrder::from_marker(*b"MM");
    std::assert_eq!(result.unwrap(), ByteOrder::BigEndian);
}

#[test]
fn test_byte_order_detection_invalid() {
    let result = ByteOrder::from_marker([0x12, 0x34]);
    std::assert!(matches!(result, Err(TiffError::InvalidByteOrder(0x1234))));

    // Mixed markers are not a byte order either
    std::assert!(ByteOrder::from_marker(*b"IM").is_err());
}

#[test]
fn test_little_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x1234).unwrap();
    buffer.write_u32::<LittleEndian>(0x12345678).unwrap();
    buffer.write_u64::<LittleEndian>(0x1234567890ABCDEF).unwrap();
    buffer.write_f64::<LittleEndian>(-2.5).unwrap();

    let handler = LittleEndianHandler;

    std::assert_eq!(handler.read_u16(&buffer[0..]), 0x1234);
    std::assert_eq!(handler.read_u32(&buffer[2..]), 0x12345678);
    std::assert_eq!(handler.read_u64(&buffer[6..]), 0x1234567890ABCDEF);
    std::assert_eq!(handler.read_f64(&buffer[14..]), -2.5);
}

#[test]
fn test_big_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x1234).unwrap();
    buffer.write_u32::<BigEndian>(0x12345678).unwrap();
    buffer.write_i16::<BigEndian>(-2).unwrap();

    let handler = BigEndianHandler;

    std::assert_eq!(handler.read_u16(&buffer[0..]), 0x1234);
    std::assert_eq!(handler.read_u32(&buffer[2..]), 0x12345678);
    std::assert_eq!(handler.read_i16(&buffer[6..]), -2);
}

#[test]
fn test_handler_writes_in_its_own_order() {
    let mut le = [0u8; 4];
    let mut be = [0u8; 4];
    LittleEndianHandler.write_u32(&mut le, 0x01020304);
    BigEndianHandler.write_u32(&mut be, 0x01020304);

    std::assert_eq!(le, [4, 3, 2, 1]);
    std::assert_eq!(be, [1, 2, 3, 4]);
}

#[test]
fn test_rational_reading() {
    let mut buffer = Vec::new();
    buffer.write_u32::<BigEndian>(300).unwrap();
    buffer.write_u32::<BigEndian>(4).unwrap();
    buffer.write_i32::<BigEndian>(-7).unwrap();
    buffer.write_i32::<BigEndian>(2).unwrap();

    let handler = ByteOrder::BigEndian.handler();
    std::assert_eq!(handler.read_rational(&buffer), (300, 4));
    std::assert_eq!(handler.read_srational(&buffer[8..]), (-7, 2));
}

#[test]
fn test_read_uint_widths() {
    let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
    let order = ByteOrder::BigEndian;

    std::assert_eq!(order.read_uint(&bytes, 1).unwrap(), 0x01);
    std::assert_eq!(order.read_uint(&bytes, 2).unwrap(), 0x0102);
    std::assert_eq!(order.read_uint(&bytes, 4).unwrap(), 0x01020304);
    std::assert_eq!(order.read_uint(&bytes, 8).unwrap(), 0x0102030405060708);
    std::assert_eq!(ByteOrder::LittleEndian.read_uint(&bytes, 2).unwrap(), 0x0201);

    std::assert!(order.read_uint(&bytes, 3).is_err());
    std::assert!(matches!(order.read_uint(&bytes[..2], 4), Err(TiffError::TruncatedData { .. })));
}
