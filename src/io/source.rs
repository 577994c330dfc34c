//! Positioned byte sources
//!
//! A [`RandomAccessSource`] answers "give me N bytes at absolute offset X"
//! through a shared reference, so one parsed file can serve strip reads from
//! several threads at once.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use log::{debug, trace};

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{TiffError, TiffResult};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send {}

impl<T: Read + Seek + Send> SeekableReader for T {}

/// Random access to the bytes of a TIFF file
pub trait RandomAccessSource: Send + Sync {
    /// Total number of bytes available
    fn len(&self) -> u64;

    /// Whether the source holds no bytes at all
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads exactly `length` bytes starting at `offset`
    ///
    /// Fails with `TruncatedData` if the range extends past the end.
    fn read_bytes(&self, offset: u64, length: u64) -> TiffResult<Vec<u8>>;

    /// Reads an unsigned integer of `width` bytes (1, 2, 4 or 8) at `offset`
    fn read_uint(&self, offset: u64, width: usize, byte_order: ByteOrder) -> TiffResult<u64> {
        let bytes = self.read_bytes(offset, width as u64)?;
        byte_order.read_uint(&bytes, width)
    }
}

/// Checks that `[offset, offset + length)` lies inside a source of `available` bytes
pub(crate) fn check_range(offset: u64, length: u64, available: u64) -> TiffResult<()> {
    match offset.checked_add(length) {
        Some(end) if end <= available => Ok(()),
        _ => Err(TiffError::TruncatedData {
            offset,
            requested: length,
            available: available.saturating_sub(offset),
        }),
    }
}

/// Source backed by an owned byte buffer
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(data: Vec<u8>) -> Self {
        MemorySource { data }
    }

    /// Borrow the underlying bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl RandomAccessSource for MemorySource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_bytes(&self, offset: u64, length: u64) -> TiffResult<Vec<u8>> {
        check_range(offset, length, self.len())?;
        let start = offset as usize;
        Ok(self.data[start..start + length as usize].to_vec())
    }
}

/// Source over any seekable reader
///
/// Seek and read happen under one lock, so concurrent callers never observe
/// each other's cursor.
pub struct ReaderSource<R: SeekableReader> {
    reader: Mutex<R>,
    len: u64,
}

/// A buffered file on disk
pub type FileSource = ReaderSource<BufReader<File>>;

impl<R: SeekableReader> ReaderSource<R> {
    /// Wraps a reader, measuring its length once
    pub fn new(mut reader: R) -> TiffResult<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        debug!("Opened reader source with {} bytes", len);

        Ok(ReaderSource {
            reader: Mutex::new(reader),
            len,
        })
    }
}

impl FileSource {
    /// Opens a file for positioned reads
    pub fn open<P: AsRef<Path>>(path: P) -> TiffResult<Self> {
        let file = File::open(path.as_ref())?;
        debug!("Opening file source: {}", path.as_ref().display());
        ReaderSource::new(BufReader::with_capacity(1024 * 1024, file)) // 1MB buffer
    }
}

impl<R: SeekableReader> RandomAccessSource for ReaderSource<R> {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_bytes(&self, offset: u64, length: u64) -> TiffResult<Vec<u8>> {
        check_range(offset, length, self.len)?;
        trace!("Reading {} bytes at offset {}", length, offset);

        let mut reader = self.reader.lock()
            .map_err(|_| TiffError::GenericError("Reader lock poisoned".to_string()))?;
        reader.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; length as usize];
        reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}
