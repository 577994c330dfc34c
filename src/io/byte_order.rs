//! Byte order handling for TIFF files
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian). Handlers decode from and
//! encode into byte slices, so the same code serves directory records,
//! out-of-line field values and predictor samples.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the first two header bytes
    pub fn from_marker(marker: [u8; 2]) -> TiffResult<Self> {
        match marker {
            header::LITTLE_ENDIAN_MARKER => Ok(ByteOrder::LittleEndian),
            header::BIG_ENDIAN_MARKER => Ok(ByteOrder::BigEndian),
            _ => Err(TiffError::InvalidByteOrder(u16::from_be_bytes(marker))),
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Returns the handler for this byte order
    pub fn handler(&self) -> &'static dyn ByteOrderHandler {
        match self {
            ByteOrder::LittleEndian => &LittleEndianHandler,
            ByteOrder::BigEndian => &BigEndianHandler,
        }
    }

    pub fn read_u16(&self, buf: &[u8]) -> u16 {
        self.handler().read_u16(buf)
    }

    pub fn read_u32(&self, buf: &[u8]) -> u32 {
        self.handler().read_u32(buf)
    }

    pub fn read_u64(&self, buf: &[u8]) -> u64 {
        self.handler().read_u64(buf)
    }

    /// Reads an unsigned integer of 1, 2, 4 or 8 bytes
    ///
    /// # Arguments
    /// * `buf` - Slice holding at least `width` bytes
    /// * `width` - Integer width in bytes
    ///
    /// # Returns
    /// The value widened to u64, or an error for any other width
    pub fn read_uint(&self, buf: &[u8], width: usize) -> TiffResult<u64> {
        if buf.len() < width {
            return Err(TiffError::TruncatedData {
                offset: 0,
                requested: width as u64,
                available: buf.len() as u64,
            });
        }

        match width {
            1 => Ok(buf[0] as u64),
            2 => Ok(self.read_u16(buf) as u64),
            4 => Ok(self.read_u32(buf) as u64),
            8 => Ok(self.read_u64(buf)),
            _ => Err(TiffError::GenericError(format!("Unsupported integer width: {}", width))),
        }
    }
}

/// Trait for byte order handling strategies
///
/// All reads take the value from the start of `buf`; callers guarantee the
/// slice is long enough.
pub trait ByteOrderHandler: Send + Sync {
    fn read_u16(&self, buf: &[u8]) -> u16;
    fn read_u32(&self, buf: &[u8]) -> u32;
    fn read_u64(&self, buf: &[u8]) -> u64;
    fn read_i16(&self, buf: &[u8]) -> i16;
    fn read_i32(&self, buf: &[u8]) -> i32;
    fn read_i64(&self, buf: &[u8]) -> i64;
    fn read_f32(&self, buf: &[u8]) -> f32;
    fn read_f64(&self, buf: &[u8]) -> f64;

    fn write_u16(&self, buf: &mut [u8], value: u16);
    fn write_u32(&self, buf: &mut [u8], value: u32);

    /// Read a rational value (two u32 values as numerator/denominator)
    fn read_rational(&self, buf: &[u8]) -> (u32, u32) {
        (self.read_u32(buf), self.read_u32(&buf[4..]))
    }

    /// Read a signed rational value (two i32 values as numerator/denominator)
    fn read_srational(&self, buf: &[u8]) -> (i32, i32) {
        (self.read_i32(buf), self.read_i32(&buf[4..]))
    }
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, buf: &[u8]) -> u16 { LittleEndian::read_u16(buf) }
    fn read_u32(&self, buf: &[u8]) -> u32 { LittleEndian::read_u32(buf) }
    fn read_u64(&self, buf: &[u8]) -> u64 { LittleEndian::read_u64(buf) }
    fn read_i16(&self, buf: &[u8]) -> i16 { LittleEndian::read_i16(buf) }
    fn read_i32(&self, buf: &[u8]) -> i32 { LittleEndian::read_i32(buf) }
    fn read_i64(&self, buf: &[u8]) -> i64 { LittleEndian::read_i64(buf) }
    fn read_f32(&self, buf: &[u8]) -> f32 { LittleEndian::read_f32(buf) }
    fn read_f64(&self, buf: &[u8]) -> f64 { LittleEndian::read_f64(buf) }

    fn write_u16(&self, buf: &mut [u8], value: u16) { LittleEndian::write_u16(buf, value) }
    fn write_u32(&self, buf: &mut [u8], value: u32) { LittleEndian::write_u32(buf, value) }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, buf: &[u8]) -> u16 { BigEndian::read_u16(buf) }
    fn read_u32(&self, buf: &[u8]) -> u32 { BigEndian::read_u32(buf) }
    fn read_u64(&self, buf: &[u8]) -> u64 { BigEndian::read_u64(buf) }
    fn read_i16(&self, buf: &[u8]) -> i16 { BigEndian::read_i16(buf) }
    fn read_i32(&self, buf: &[u8]) -> i32 { BigEndian::read_i32(buf) }
    fn read_i64(&self, buf: &[u8]) -> i64 { BigEndian::read_i64(buf) }
    fn read_f32(&self, buf: &[u8]) -> f32 { BigEndian::read_f32(buf) }
    fn read_f64(&self, buf: &[u8]) -> f64 { BigEndian::read_f64(buf) }

    fn write_u16(&self, buf: &mut [u8], value: u16) { BigEndian::write_u16(buf, value) }
    fn write_u32(&self, buf: &mut [u8], value: u32) { BigEndian::write_u32(buf, value) }
}
