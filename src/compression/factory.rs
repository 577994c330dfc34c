//! Factory for creating compression handlers

use log::debug;

use crate::tiff::constants::compression;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::tag_utils;
use super::handler::CompressionHandler;
use super::lzw::LzwHandler;
use super::uncompressed::UncompressedHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create a compression handler for the given compression code
    ///
    /// # Arguments
    /// * `code` - Value of the Compression tag
    /// * `lenient_end_of_information` - Passed to the LZW decoder
    ///
    /// # Returns
    /// The handler, or `UnsupportedCompression` for any scheme other than none and LZW
    pub fn create_handler(code: u64, lenient_end_of_information: bool) -> TiffResult<Box<dyn CompressionHandler>> {
        debug!("Creating handler for compression {} ({})", code, tag_utils::get_compression_name(code));

        match u16::try_from(code) {
            Ok(compression::NONE) => Ok(Box::new(UncompressedHandler)),
            Ok(compression::LZW) => Ok(Box::new(LzwHandler::new(lenient_end_of_information))),
            _ => Err(TiffError::UnsupportedCompression(code)),
        }
    }

    /// Whether a handler exists for `code`
    pub fn is_supported(code: u64) -> bool {
        Self::create_handler(code, false).is_ok()
    }
}
