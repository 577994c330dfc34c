//! Custom error types for TIFF processing
//!
//! Every variant belongs to one broad [`ErrorKind`], which callers can match
//! on without caring about the exact failure.

use std::fmt;
use std::io;

/// Broad classification of a [`TiffError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Underlying I/O failure
    Io,
    /// The bytes do not form a valid TIFF structure or LZW stream
    Format,
    /// A typed accessor was used on a field of another type
    TypeMismatch,
    /// A well-formed value this crate cannot process
    UnsupportedValue,
    /// Fewer bytes are available than the structure requires
    TruncatedData,
    /// Anything else
    Other,
}

/// TIFF-specific error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Invalid BigTIFF header
    InvalidBigTIFFHeader { offset_size: u16, padding: u16 },
    /// Field value size is zero or does not fit in memory
    InvalidFieldSize { tag: u16, field_type: u16, count: u64 },
    /// Directory chain is cyclic, too long or otherwise unusable
    MalformedDirectory(String),
    /// Typed accessor used on the wrong field type
    TypeMismatch { tag: u16, expected: &'static str, actual: &'static str },
    /// Scalar accessor used on a multi-valued field
    NotAScalar { tag: u16, count: u64 },
    /// Predictor outside 1, 2, 3
    UnsupportedPredictor(u16),
    /// Bit depths that are mixed or not byte aligned
    UnsupportedBitsPerSample(String),
    /// Sample width the integer predictor cannot handle
    UnsupportedSampleWidth(usize),
    /// Planar configuration outside 1, 2
    UnsupportedPlanarConfiguration(u16),
    /// Unsupported compression method
    UnsupportedCompression(u64),
    /// A read past the end of the available data
    TruncatedData { offset: u64, requested: u64, available: u64 },
    /// LZW stream ended without an END code
    MissingEndOfInformation,
    /// LZW code that is neither in the table nor the next free code
    InvalidLzwCode { code: u16, next_code: u16 },
    /// Tag not found
    TagNotFound(u16),
    /// Image dimensions not found
    MissingDimensions,
    /// Generic error with message
    GenericError(String),
}

impl TiffError {
    /// Returns the broad category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TiffError::IoError(_) => ErrorKind::Io,
            TiffError::InvalidByteOrder(_)
            | TiffError::UnsupportedVersion(_)
            | TiffError::InvalidBigTIFFHeader { .. }
            | TiffError::InvalidFieldSize { .. }
            | TiffError::MalformedDirectory(_)
            | TiffError::InvalidLzwCode { .. } => ErrorKind::Format,
            TiffError::TypeMismatch { .. } | TiffError::NotAScalar { .. } => ErrorKind::TypeMismatch,
            TiffError::UnsupportedPredictor(_)
            | TiffError::UnsupportedBitsPerSample(_)
            | TiffError::UnsupportedSampleWidth(_)
            | TiffError::UnsupportedPlanarConfiguration(_)
            | TiffError::UnsupportedCompression(_) => ErrorKind::UnsupportedValue,
            TiffError::TruncatedData { .. } | TiffError::MissingEndOfInformation => ErrorKind::TruncatedData,
            TiffError::TagNotFound(_)
            | TiffError::MissingDimensions
            | TiffError::GenericError(_) => ErrorKind::Other,
        }
    }
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            TiffError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            TiffError::InvalidBigTIFFHeader { offset_size, padding } => write!(
                f, "Invalid BigTIFF header: offset size {} (expected 8), padding {} (expected 0)",
                offset_size, padding
            ),
            TiffError::InvalidFieldSize { tag, field_type, count } => write!(
                f, "Invalid value size for tag {}: type {} with count {}", tag, field_type, count
            ),
            TiffError::MalformedDirectory(msg) => write!(f, "Malformed directory chain: {}", msg),
            TiffError::TypeMismatch { tag, expected, actual } => write!(
                f, "Tag {} holds {} values, not {}", tag, actual, expected
            ),
            TiffError::NotAScalar { tag, count } => write!(
                f, "Tag {} holds {} values, expected exactly one", tag, count
            ),
            TiffError::UnsupportedPredictor(p) => write!(f, "Unsupported predictor: {}", p),
            TiffError::UnsupportedBitsPerSample(msg) => write!(f, "Unsupported bits per sample: {}", msg),
            TiffError::UnsupportedSampleWidth(w) => write!(f, "Unsupported sample width: {} bytes", w),
            TiffError::UnsupportedPlanarConfiguration(p) => write!(f, "Unsupported planar configuration: {}", p),
            TiffError::UnsupportedCompression(c) => write!(f, "Unsupported compression method: {}", c),
            TiffError::TruncatedData { offset, requested, available } => write!(
                f, "Truncated data: {} bytes requested at offset {}, {} available",
                requested, offset, available
            ),
            TiffError::MissingEndOfInformation => write!(f, "LZW stream ended without an END code"),
            TiffError::InvalidLzwCode { code, next_code } => write!(
                f, "Invalid LZW code {} (next free code is {})", code, next_code
            ),
            TiffError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            TiffError::MissingDimensions => write!(f, "Image dimensions not found"),
            TiffError::GenericError(msg) => write!(f, "TIFF error: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TiffError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;

impl From<String> for TiffError {
    fn from(msg: String) -> Self {
        TiffError::GenericError(msg)
    }
}
