//! Tests for compression handler selection

extern crate std;

use crate::compression::{CompressionFactory, CompressionHandler, LzwHandler};
use crate::tiff::errors::TiffError;

#[test]
fn test_supported_codes() {
    std::assert!(CompressionFactory::is_supported(1));
    std::assert!(CompressionFactory::is_supported(5));
    std::assert!(!CompressionFactory::is_supported(8));
    std::assert!(!CompressionFactory::is_supported(0x1_0005));
}

#[test]
fn test_uncompressed_handler() {
    let handler = CompressionFactory::create_handler(1, false).unwrap();
    std::assert_eq!(handler.code(), 1);
    std::assert_eq!(handler.decompress(&[1, 2, 3]).unwrap(), std::vec![1, 2, 3]);
}

#[test]
fn test_lzw_handler_round_trip() {
    let handler = CompressionFactory::create_handler(5, false).unwrap();
    std::assert_eq!(handler.name(), "LZW");

    let data: Vec<u8> = (0..1000u32).map(|i| (i * 7 % 13) as u8).collect();
    let stream = handler.compress(&data).unwrap();
    std::assert_eq!(handler.decompress(&stream).unwrap(), data);
}

#[test]
fn test_lzw_handler_leniency() {
    // CLEAR, 'A' and no END
    let stream = [0x80, 0x10, 0x40];

    std::assert!(matches!(LzwHandler::new(false).decompress(&stream), Err(TiffError::MissingEndOfInformation)));
    std::assert_eq!(LzwHandler::new(true).decompress(&stream).unwrap(), b"A".to_vec());
}

#[test]
fn test_unsupported_compression() {
    let result = CompressionFactory::create_handler(8, false);
    std::assert!(matches!(result, Err(TiffError::UnsupportedCompression(8))));
}
