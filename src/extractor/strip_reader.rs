//! Strip decoding pipeline
//!
//! A strip goes through three stages: a positioned read of its stored bytes,
//! decompression with a fresh decoder, and predictor reversal. Errors from
//! any stage are returned unchanged and nothing is cached, so decoding the
//! same strip twice repeats the work.

use log::{debug, info};

use crate::compression::predictor::{self, Predictor, SampleLayout};
use crate::compression::lzw::LzwDecoder;
use crate::compression::CompressionFactory;
use crate::io::byte_order::ByteOrder;
use crate::io::source::RandomAccessSource;
use crate::tiff::errors::TiffResult;
use crate::tiff::metadata::ImageMetadata;

/// Decodes strips from one file
///
/// Holds only shared state, so a single reader can serve several threads.
pub struct StripReader<'a> {
    /// Bytes of the file
    source: &'a dyn RandomAccessSource,
    /// Byte order of the file, used for multi-byte samples
    byte_order: ByteOrder,
    /// Accept LZW streams without END
    lenient_end_of_information: bool,
}

impl<'a> StripReader<'a> {
    /// Create a new strip reader
    ///
    /// # Arguments
    /// * `source` - The file bytes
    /// * `byte_order` - Byte order from the file header
    pub fn new(source: &'a dyn RandomAccessSource, byte_order: ByteOrder) -> Self {
        StripReader {
            source,
            byte_order,
            lenient_end_of_information: false,
        }
    }

    pub fn with_lenient_end_of_information(mut self, lenient: bool) -> Self {
        self.lenient_end_of_information = lenient;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Reads the stored bytes of a strip
    pub fn read_raw(&self, offset: u64, byte_count: u64) -> TiffResult<Vec<u8>> {
        self.source.read_bytes(offset, byte_count)
    }

    /// Decodes an LZW strip
    ///
    /// # Arguments
    /// * `offset` - File offset where the strip data starts
    /// * `byte_count` - Size of the strip data in bytes
    /// * `layout` - Width, rows and sample shape of the strip
    /// * `predictor` - Predictor applied before compression
    ///
    /// # Returns
    /// Raw sample bytes, or the first error from reading, decoding or the predictor
    pub fn decode_strip(&self, offset: u64, byte_count: u64, layout: &SampleLayout, predictor: Predictor) -> TiffResult<Vec<u8>> {
        let compressed = self.read_raw(offset, byte_count)?;
        let decompressed = LzwDecoder::new()
            .lenient_end_of_information(self.lenient_end_of_information)
            .decode(&compressed)?;

        debug!("LZW strip at {}: {} -> {} bytes", offset, compressed.len(), decompressed.len());
        predictor::decode(decompressed, layout, predictor)
    }

    /// Decodes a strip stored with any supported compression
    ///
    /// # Arguments
    /// * `compression` - Value of the Compression tag
    ///
    /// Other arguments as for [`StripReader::decode_strip`].
    pub fn decode_compressed_strip(
        &self,
        offset: u64,
        byte_count: u64,
        compression: u64,
        layout: &SampleLayout,
        predictor: Predictor,
    ) -> TiffResult<Vec<u8>> {
        let handler = CompressionFactory::create_handler(compression, self.lenient_end_of_information)?;
        let compressed = self.read_raw(offset, byte_count)?;
        let decompressed = handler.decompress(&compressed)?;

        debug!("{} strip at {}: {} -> {} bytes", handler.name(), offset, compressed.len(), decompressed.len());
        predictor::decode(decompressed, layout, predictor)
    }

    /// Decodes strip `index` with every parameter taken from `metadata`
    ///
    /// Absent tags fall back to TIFF defaults: no compression, no predictor,
    /// chunky samples and one bit per sample.
    pub fn read_strip(&self, metadata: &ImageMetadata, index: usize) -> TiffResult<Vec<u8>> {
        let (offset, byte_count) = metadata.strip_location(index)?;
        let layout = metadata.strip_layout(index, self.byte_order)?;
        let predictor = Predictor::from_code(metadata.predictor_or_default())?;
        let compression = metadata.compression_or_default() as u64;

        info!("Decoding strip {} ({} bytes at {}, {} rows)", index, byte_count, offset, layout.rows);
        self.decode_compressed_strip(offset, byte_count, compression, &layout, predictor)
    }
}
