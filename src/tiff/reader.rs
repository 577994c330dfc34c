//! TIFF file reader implementation
//!
//! The reader walks header, directory chain and fields through a
//! [`RandomAccessSource`], and hands strips to the [`StripReader`].

use std::path::Path;

use log::{debug, info};

use crate::config::ReaderConfig;
use crate::extractor::StripReader;
use crate::io::source::{FileSource, MemorySource, RandomAccessSource};
use crate::tiff::errors::TiffResult;
use crate::tiff::header::FileHeader;
use crate::tiff::ifd::IFD;
use crate::tiff::metadata::ImageMetadata;
use crate::tiff::types::TIFF;
use crate::tiff::validation::DirectoryGuard;

/// Reader for TIFF and BigTIFF files
pub struct TiffReader {
    /// Bytes of the file
    source: Box<dyn RandomAccessSource>,
    /// Parse and decode options
    config: ReaderConfig,
}

impl TiffReader {
    /// Creates a reader over any byte source
    pub fn new(source: Box<dyn RandomAccessSource>, config: ReaderConfig) -> Self {
        TiffReader { source, config }
    }

    /// Opens a file on disk
    pub fn open<P: AsRef<Path>>(path: P, config: ReaderConfig) -> TiffResult<Self> {
        info!("Opening TIFF file: {}", path.as_ref().display());
        let source = FileSource::open(path)?;
        Ok(Self::new(Box::new(source), config))
    }

    /// Reads from an in-memory copy of a file
    pub fn from_bytes(data: Vec<u8>, config: ReaderConfig) -> Self {
        Self::new(Box::new(MemorySource::new(data)), config)
    }

    pub fn source(&self) -> &dyn RandomAccessSource {
        self.source.as_ref()
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Reads the file header
    pub fn read_header(&self) -> TiffResult<FileHeader> {
        FileHeader::read(self.source())
    }

    /// Reads a single directory
    ///
    /// # Arguments
    /// * `header` - Parsed file header
    /// * `offset` - Offset in the file where the IFD starts
    /// * `number` - The index of this IFD in the chain
    pub fn read_ifd(&self, header: &FileHeader, offset: u64, number: usize) -> TiffResult<IFD> {
        IFD::read(self.source(), header, offset, number)
    }

    /// Reads header and the whole directory chain
    ///
    /// Any structural error aborts the parse. A chain that revisits an
    /// offset or grows past `max_directories` is rejected as malformed.
    ///
    /// # Returns
    /// A TIFF structure with every directory and the flattened field view
    pub fn read(&self) -> TiffResult<TIFF> {
        let header = self.read_header()?;
        let mut tiff = TIFF::new(header);
        let mut guard = DirectoryGuard::new(self.config.max_directories);

        let mut offset = header.first_directory_offset;
        while offset != 0 {
            guard.enter(offset)?;
            let ifd = self.read_ifd(&header, offset, tiff.ifd_count())?;
            offset = ifd.next_offset;
            tiff.push_ifd(ifd);
        }

        info!("Read {} IFDs ({} distinct tags) from {} file",
              tiff.ifd_count(), tiff.fields.len(), header.variant().name());
        Ok(tiff)
    }

    /// Extracts named properties from the flattened field view
    pub fn metadata(&self, tiff: &TIFF) -> ImageMetadata {
        let metadata = ImageMetadata::extract(&tiff.fields);
        if !metadata.failed_tags.is_empty() {
            debug!("Metadata extraction skipped {} tags", metadata.failed_tags.len());
        }
        metadata
    }

    /// Strip decoder sharing this reader's source
    pub fn strip_reader(&self, tiff: &TIFF) -> StripReader<'_> {
        StripReader::new(self.source(), tiff.header.byte_order)
            .with_lenient_end_of_information(self.config.lenient_end_of_information)
    }

    /// Decodes strip `index` using the file's own metadata
    ///
    /// # Arguments
    /// * `tiff` - Parsed file
    /// * `metadata` - Properties extracted from `tiff`
    /// * `index` - Strip number
    ///
    /// # Returns
    /// Raw sample bytes in file byte order
    pub fn read_strip(&self, tiff: &TIFF, metadata: &ImageMetadata, index: usize) -> TiffResult<Vec<u8>> {
        self.strip_reader(tiff).read_strip(metadata, index)
    }
}
