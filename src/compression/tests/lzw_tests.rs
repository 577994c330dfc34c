//! Tests for the LZW codec

extern crate std;

use crate::compression::lzw::{self, BitReader, BitWriter, LzwDecoder, LzwEncoder, CLEAR_CODE, END_CODE};
use crate::tiff::errors::{ErrorKind, TiffError};

const SAMPLE_INPUT: [u8; 9] = [7, 7, 7, 8, 8, 7, 7, 6, 6];
const SAMPLE_STREAM: [u8; 11] = [0x80, 0x01, 0xE0, 0x40, 0x80, 0x44, 0x08, 0x0C, 0x06, 0x80, 0x80];

/// Deterministic noise so the tests need no extra crates
fn pseudo_random(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect()
}

/// Packs 9-bit codes into a stream
fn stream_of(codes: &[u16]) -> Vec<u8> {
    let mut writer = BitWriter::new();
    for &code in codes {
        writer.write_code(code, 9);
    }
    if !writer.is_aligned() {
        writer.write_code(0, 9);
    }
    writer.into_bytes()
}

#[test]
fn test_encode_known_vector() {
    std::assert_eq!(lzw::compress(&SAMPLE_INPUT), SAMPLE_STREAM.to_vec());
}

#[test]
fn test_decode_known_vector() {
    std::assert_eq!(lzw::decompress(&SAMPLE_STREAM).unwrap(), SAMPLE_INPUT.to_vec());
}

#[test]
fn test_encode_empty_input() {
    let stream = LzwEncoder::new().encode(&[]);
    std::assert_eq!(stream, std::vec![0x80, 0x40, 0x40]);
    std::assert!(lzw::decompress(&stream).unwrap().is_empty());
}

#[test]
fn test_short_round_trips() {
    for len in 0..64 {
        let data = pseudo_random(len, len as u32 + 1);
        let stream = lzw::compress(&data);
        std::assert_eq!(lzw::decompress(&stream).unwrap(), data, "length {}", len);
    }
}

#[test]
fn test_round_trip_through_every_code_width() {
    // Noise fills the table quickly, so the stream crosses 10, 11 and 12 bit
    // codes and several table resets
    let data = pseudo_random(40_000, 42);
    let stream = lzw::compress(&data);
    std::assert_eq!(lzw::decompress(&stream).unwrap(), data);
}

#[test]
fn test_round_trip_around_table_boundaries() {
    // Inputs sized so the encoder stops right around each width change
    for len in [250, 253, 254, 255, 256, 510, 511, 512, 1022, 1024, 2046, 2048, 3834, 3836, 3838, 3840] {
        let data = pseudo_random(len, 7);
        std::assert_eq!(lzw::decompress(&lzw::compress(&data)).unwrap(), data, "length {}", len);
    }
}

#[test]
fn test_round_trip_repetitive_data() {
    let runs = std::vec![0xABu8; 100_000];
    let stream = lzw::compress(&runs);
    std::assert!(stream.len() < runs.len() / 10);
    std::assert_eq!(lzw::decompress(&stream).unwrap(), runs);

    let ramp: Vec<u8> = (0..60_000u32).map(|i| (i % 251) as u8).collect();
    std::assert_eq!(lzw::decompress(&lzw::compress(&ramp)).unwrap(), ramp);
}

#[test]
fn test_stream_without_leading_clear() {
    let stream = stream_of(&[7, 258, 8, END_CODE]);
    std::assert_eq!(lzw::decompress(&stream).unwrap(), std::vec![7, 7, 7, 8]);
}

#[test]
fn test_clear_in_the_middle_of_a_stream() {
    let stream = stream_of(&[CLEAR_CODE, 65, 66, 258, CLEAR_CODE, 67, 67, END_CODE]);
    std::assert_eq!(lzw::decompress(&stream).unwrap(), b"ABABCC".to_vec());
}

#[test]
fn test_repeated_clear_codes_are_skipped() {
    let stream = stream_of(&[CLEAR_CODE, CLEAR_CODE, CLEAR_CODE, 65, 66, END_CODE]);
    std::assert_eq!(lzw::decompress(&stream).unwrap(), b"AB".to_vec());

    let stream = stream_of(&[CLEAR_CODE, END_CODE]);
    std::assert!(lzw::decompress(&stream).unwrap().is_empty());
}

#[test]
fn test_bytes_after_end_are_ignored() {
    let mut stream = SAMPLE_STREAM.to_vec();
    stream.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
    std::assert_eq!(lzw::decompress(&stream).unwrap(), SAMPLE_INPUT.to_vec());
}

#[test]
fn test_code_beyond_table_is_rejected() {
    let stream = stream_of(&[CLEAR_CODE, 7, 300, END_CODE]);
    let err = lzw::decompress(&stream).unwrap_err();

    std::assert!(matches!(err, TiffError::InvalidLzwCode { code: 300, next_code: 258 }));
    std::assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_first_code_must_be_a_literal() {
    let stream = stream_of(&[CLEAR_CODE, 258, END_CODE]);
    std::assert!(matches!(lzw::decompress(&stream), Err(TiffError::InvalidLzwCode { code: 258, .. })));
}

#[test]
fn test_missing_end_of_information() {
    // CLEAR, 7, 8 and the first bits of another 8: 36 bits, 4 whole bytes
    let mut writer = BitWriter::new();
    for code in [CLEAR_CODE, 7, 8, 8] {
        writer.write_code(code, 9);
    }
    let stream = writer.into_bytes();
    std::assert_eq!(stream.len(), 4);

    let err = LzwDecoder::new().decode(&stream).unwrap_err();
    std::assert!(matches!(err, TiffError::MissingEndOfInformation));
    std::assert_eq!(err.kind(), ErrorKind::TruncatedData);

    let lenient = LzwDecoder::new().lenient_end_of_information(true).decode(&stream).unwrap();
    std::assert_eq!(lenient, std::vec![7, 8]);
}

#[test]
fn test_empty_stream() {
    std::assert!(matches!(lzw::decompress(&[]), Err(TiffError::MissingEndOfInformation)));
    std::assert!(LzwDecoder::new().lenient_end_of_information(true).decode(&[]).unwrap().is_empty());
}

#[test]
fn test_bit_reader_msb_first() {
    let data = [0b1000_0000, 0b0100_0000, 0b0100_0000];
    let mut reader = BitReader::new(&data);

    std::assert_eq!(reader.read_code(9), Some(256));
    std::assert_eq!(reader.read_code(9), Some(257));
    std::assert_eq!(reader.position(), 3);
    std::assert_eq!(reader.read_code(9), None);
}

#[test]
fn test_bit_writer_mixed_widths() {
    let mut writer = BitWriter::new();
    writer.write_code(0x1FF, 9);
    writer.write_code(0x3FF, 10);
    writer.write_code(0x1F, 5);
    std::assert!(writer.is_aligned());

    let bytes = writer.into_bytes();
    std::assert_eq!(bytes, std::vec![0xFF, 0xFF, 0xFF]);

    let mut reader = BitReader::new(&bytes);
    std::assert_eq!(reader.read_code(9), Some(0x1FF));
    std::assert_eq!(reader.read_code(10), Some(0x3FF));
    std::assert_eq!(reader.read_code(5), Some(0x1F));
}

/// Bytes whose adjacent pairs never repeat, so every byte becomes a literal code
fn distinct_pairs(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    'outer: for i in 0..=255u8 {
        for j in (i as u16 + 1)..=255 {
            if out.len() + 2 > len {
                break 'outer;
            }
            out.push(i);
            out.push(j as u8);
        }
    }
    out.truncate(len);
    out
}

/// Width of the k-th literal code after a CLEAR
fn literal_width(k: usize) -> u32 {
    match k {
        1..=254 => 9,
        255..=766 => 10,
        767..=1790 => 11,
        _ => 12,
    }
}

#[test]
fn test_code_width_thresholds_match_reference_stream() {
    let data = distinct_pairs(3840);
    std::assert_eq!(data.len(), 3840);

    let mut expected = BitWriter::new();
    expected.write_code(CLEAR_CODE, 9);
    for (i, &byte) in data[..3836].iter().enumerate() {
        expected.write_code(byte as u16, literal_width(i + 1));
    }
    // The table is full at code 4094: CLEAR goes out at 12 bits, then back to 9
    expected.write_code(CLEAR_CODE, 12);
    for &byte in &data[3836..] {
        expected.write_code(byte as u16, 9);
    }
    expected.write_code(END_CODE, 9);
    if !expected.is_aligned() {
        expected.write_code(0, 9);
    }
    let expected = expected.into_bytes();

    let stream = lzw::compress(&data);
    std::assert_eq!(stream.len(), expected.len());
    std::assert!(stream == expected, "encoder output differs from the reference stream");
    std::assert_eq!(lzw::decompress(&expected).unwrap(), data);
}
