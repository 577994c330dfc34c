//! Compression handler trait definition

use crate::tiff::errors::TiffResult;

/// Strategy trait for the compression schemes a strip may use
pub trait CompressionHandler: Send + Sync {
    /// Turn stored strip bytes back into the predictor-encoded samples
    fn decompress(&self, data: &[u8]) -> TiffResult<Vec<u8>>;

    /// Inverse of `decompress`
    fn compress(&self, data: &[u8]) -> TiffResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// Value of the Compression tag this handler serves
    fn code(&self) -> u64;
}
