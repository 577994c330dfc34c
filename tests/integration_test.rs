//! Integration tests for parsing files and decoding their strips

extern crate std;

use std::fs;
use std::thread;

use byteorder::{BigEndian, ByteOrder as ByteOrderTrait, LittleEndian, WriteBytesExt};

use stripkit::compression::lzw;
use stripkit::io::ByteOrder;
use stripkit::tiff::errors::ErrorKind;
use stripkit::{PlanarConfiguration, Predictor, ReaderConfig, SampleLayout, TiffError, TiffReader};

const WIDTH: u32 = 4;
const HEIGHT: u32 = 5;
const ROWS_PER_STRIP: u32 = 2;

fn pixel(x: u32, y: u32) -> u16 {
    (y * 1000 + x * 300) as u16
}

/// Decoded bytes of rows `first..last` in the file byte order
fn expected_rows<B: ByteOrderTrait>(first: u32, last: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    for y in first..last {
        for x in 0..WIDTH {
            buf.write_u16::<B>(pixel(x, y)).unwrap();
        }
    }
    buf
}

/// Rows `first..last` with horizontal differencing applied
fn differenced_rows<B: ByteOrderTrait>(first: u32, last: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    for y in first..last {
        let mut previous = 0u16;
        for x in 0..WIDTH {
            let value = pixel(x, y);
            buf.write_u16::<B>(if x == 0 { value } else { value.wrapping_sub(previous) }).unwrap();
            previous = value;
        }
    }
    buf
}

fn write_entry<B: ByteOrderTrait>(buf: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: u32) {
    buf.write_u16::<B>(tag).unwrap();
    buf.write_u16::<B>(field_type).unwrap();
    buf.write_u32::<B>(count).unwrap();
    if field_type == 3 && count == 1 {
        buf.write_u16::<B>(value as u16).unwrap();
        buf.write_u16::<B>(0).unwrap();
    } else {
        buf.write_u32::<B>(value).unwrap();
    }
}

/// A 4x5 16-bit image in three LZW strips with predictor 2
///
/// The last strip holds a single row. `first_strip_cut` bytes are removed
/// from the recorded byte count of strip 0.
fn build_image<B: ByteOrderTrait>(compression: u16, first_strip_cut: u32) -> Vec<u8> {
    let marker = if B::read_u16(&[1, 0]) == 1 { b"II" } else { b"MM" };
    let mut buf = marker.to_vec();
    buf.write_u16::<B>(42).unwrap();
    buf.write_u32::<B>(0).unwrap();

    let mut offsets = Vec::new();
    let mut counts = Vec::new();
    let mut first = 0;
    while first < HEIGHT {
        let last = (first + ROWS_PER_STRIP).min(HEIGHT);
        let strip = lzw::compress(&differenced_rows::<B>(first, last));
        offsets.push(buf.len() as u32);
        counts.push(strip.len() as u32);
        buf.extend_from_slice(&strip);
        first = last;
    }
    counts[0] -= first_strip_cut;

    if buf.len() % 2 == 1 {
        buf.push(0);
    }
    let offsets_at = buf.len() as u32;
    for &o in &offsets {
        buf.write_u32::<B>(o).unwrap();
    }
    let counts_at = buf.len() as u32;
    for &c in &counts {
        buf.write_u32::<B>(c).unwrap();
    }

    let ifd_at = buf.len() as u32;
    B::write_u32(&mut buf[4..8], ifd_at);

    let strips = offsets.len() as u32;
    buf.write_u16::<B>(10).unwrap();
    write_entry::<B>(&mut buf, 256, 4, 1, WIDTH);
    write_entry::<B>(&mut buf, 257, 4, 1, HEIGHT);
    write_entry::<B>(&mut buf, 258, 3, 1, 16);
    write_entry::<B>(&mut buf, 259, 3, 1, compression as u32);
    write_entry::<B>(&mut buf, 262, 3, 1, 1);
    write_entry::<B>(&mut buf, 273, 4, strips, offsets_at);
    write_entry::<B>(&mut buf, 277, 3, 1, 1);
    write_entry::<B>(&mut buf, 278, 4, 1, ROWS_PER_STRIP);
    write_entry::<B>(&mut buf, 279, 4, strips, counts_at);
    write_entry::<B>(&mut buf, 317, 3, 1, 2);
    buf.write_u32::<B>(0).unwrap();

    buf
}

fn check_all_strips<B: ByteOrderTrait>(byte_order: ByteOrder) {
    let reader = TiffReader::from_bytes(build_image::<B>(5, 0), ReaderConfig::default());
    let tiff = reader.read().unwrap();
    std::assert_eq!(tiff.header.byte_order, byte_order);

    let metadata = reader.metadata(&tiff);
    std::assert!(metadata.failed_tags.is_empty());
    std::assert_eq!(metadata.strip_count(), 3);

    std::assert_eq!(reader.read_strip(&tiff, &metadata, 0).unwrap(), expected_rows::<B>(0, 2));
    std::assert_eq!(reader.read_strip(&tiff, &metadata, 1).unwrap(), expected_rows::<B>(2, 4));
    std::assert_eq!(reader.read_strip(&tiff, &metadata, 2).unwrap(), expected_rows::<B>(4, 5));
}

#[test]
fn test_decode_little_endian_strips() {
    check_all_strips::<LittleEndian>(ByteOrder::LittleEndian);
}

#[test]
fn test_decode_big_endian_strips() {
    check_all_strips::<BigEndian>(ByteOrder::BigEndian);
}

#[test]
fn test_decode_strip_with_explicit_layout() {
    let reader = TiffReader::from_bytes(build_image::<LittleEndian>(5, 0), ReaderConfig::default());
    let tiff = reader.read().unwrap();
    let metadata = reader.metadata(&tiff);
    let (offset, byte_count) = metadata.strip_location(1).unwrap();

    let layout = SampleLayout {
        width: WIDTH as usize,
        rows: 2,
        bits_per_sample: vec![16],
        planar: PlanarConfiguration::Chunky,
        byte_order: ByteOrder::LittleEndian,
    };
    let strips = reader.strip_reader(&tiff);

    let decoded = strips.decode_strip(offset, byte_count, &layout, Predictor::Horizontal).unwrap();
    std::assert_eq!(decoded, expected_rows::<LittleEndian>(2, 4));

    // Without the predictor the differenced samples come back as stored
    let raw = strips.decode_strip(offset, byte_count, &layout, Predictor::None).unwrap();
    std::assert_eq!(raw, differenced_rows::<LittleEndian>(2, 4));

    // Decoding the same strip twice gives the same bytes
    std::assert_eq!(strips.decode_strip(offset, byte_count, &layout, Predictor::Horizontal).unwrap(), decoded);
}

#[test]
fn test_concurrent_strip_decoding() {
    let reader = TiffReader::from_bytes(build_image::<BigEndian>(5, 0), ReaderConfig::default());
    let tiff = reader.read().unwrap();
    let metadata = reader.metadata(&tiff);
    let strips = reader.strip_reader(&tiff);

    let decoded: Vec<Vec<u8>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..metadata.strip_count())
            .map(|index| {
                let strips = &strips;
                let metadata = &metadata;
                scope.spawn(move || strips.read_strip(metadata, index).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    std::assert_eq!(decoded.concat(), expected_rows::<BigEndian>(0, HEIGHT));
}

#[test]
fn test_truncated_strip_stream() {
    let data = build_image::<LittleEndian>(5, 3);

    let strict = TiffReader::from_bytes(data.clone(), ReaderConfig::default());
    let tiff = strict.read().unwrap();
    let metadata = strict.metadata(&tiff);
    let err = strict.read_strip(&tiff, &metadata, 0).unwrap_err();
    std::assert_eq!(err.kind(), ErrorKind::TruncatedData);

    // Other strips are unaffected
    std::assert!(strict.read_strip(&tiff, &metadata, 1).is_ok());

    let lenient = TiffReader::from_bytes(data, ReaderConfig::default().with_lenient_end_of_information(true));
    let tiff = lenient.read().unwrap();
    let metadata = lenient.metadata(&tiff);
    let partial = lenient.read_strip(&tiff, &metadata, 0).unwrap();

    let row_bytes = WIDTH as usize * 2;
    let expected = expected_rows::<LittleEndian>(0, 2);
    std::assert_eq!(partial.len() % row_bytes, 0);
    std::assert_eq!(&partial[..], &expected[..partial.len()]);
}

#[test]
fn test_unsupported_compression() {
    let reader = TiffReader::from_bytes(build_image::<LittleEndian>(8, 0), ReaderConfig::default());
    let tiff = reader.read().unwrap();
    let metadata = reader.metadata(&tiff);

    let result = reader.read_strip(&tiff, &metadata, 0);
    std::assert!(matches!(result, Err(TiffError::UnsupportedCompression(8))));
}

#[test]
fn test_strip_index_out_of_range() {
    let reader = TiffReader::from_bytes(build_image::<LittleEndian>(5, 0), ReaderConfig::default());
    let tiff = reader.read().unwrap();
    let metadata = reader.metadata(&tiff);

    std::assert!(reader.read_strip(&tiff, &metadata, 3).is_err());
}

#[test]
fn test_read_from_file() {
    let path = std::env::temp_dir().join(format!("stripkit_integration_{}.tif", std::process::id()));
    fs::write(&path, build_image::<LittleEndian>(5, 0)).unwrap();

    let result = (|| {
        let reader = TiffReader::open(&path, ReaderConfig::default())?;
        let tiff = reader.read()?;
        let metadata = reader.metadata(&tiff);
        let mut image = Vec::new();
        for index in 0..metadata.strip_count() {
            image.extend(reader.read_strip(&tiff, &metadata, index)?);
        }
        Ok::<_, TiffError>(image)
    })();
    fs::remove_file(&path).unwrap();

    std::assert_eq!(result.unwrap(), expected_rows::<LittleEndian>(0, HEIGHT));
}

#[test]
fn test_missing_file() {
    let result = TiffReader::open("/nonexistent/stripkit/missing.tif", ReaderConfig::default());
    std::assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::Io));
}
