//! LZW compression (TIFF compression code 5)
//!
//! Codes are packed most significant bit first and start at 9 bits. The
//! decoder widens once its next free code reaches `2^width - 1` (the TIFF
//! "early change"), up to 12 bits.

mod bit_io;
mod decoder;
mod encoder;

pub use bit_io::{BitReader, BitWriter};
pub use decoder::LzwDecoder;
pub use encoder::LzwEncoder;

use crate::compression::handler::CompressionHandler;
use crate::tiff::constants::compression;
use crate::tiff::errors::TiffResult;

/// Resets the string table
pub const CLEAR_CODE: u16 = 256;
/// Terminates the stream
pub const END_CODE: u16 = 257;
/// First code assigned to a multi-byte string
pub const FIRST_FREE_CODE: u16 = 258;
pub const MIN_CODE_WIDTH: u32 = 9;
pub const MAX_CODE_WIDTH: u32 = 12;
/// Entries addressable with 12-bit codes
pub const TABLE_SIZE: usize = 4096;
/// The encoder clears its table when its next free code reaches this value
pub const RESET_AT_CODE: u16 = 4094;

/// Compresses `data` into a complete LZW stream
pub fn compress(data: &[u8]) -> Vec<u8> {
    LzwEncoder::new().encode(data)
}

/// Decompresses a complete LZW stream
pub fn decompress(data: &[u8]) -> TiffResult<Vec<u8>> {
    LzwDecoder::new().decode(data)
}

/// LZW handler for the compression factory
#[derive(Debug, Default, Clone, Copy)]
pub struct LzwHandler {
    lenient_end_of_information: bool,
}

impl LzwHandler {
    pub fn new(lenient_end_of_information: bool) -> Self {
        LzwHandler { lenient_end_of_information }
    }
}

impl CompressionHandler for LzwHandler {
    fn decompress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        LzwDecoder::new()
            .lenient_end_of_information(self.lenient_end_of_information)
            .decode(data)
    }

    fn compress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        Ok(compress(data))
    }

    fn name(&self) -> &'static str {
        "LZW"
    }

    fn code(&self) -> u64 {
        compression::LZW as u64
    }
}
