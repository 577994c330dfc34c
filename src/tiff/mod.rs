//! TIFF file format parsing module
//!
//! This module provides structures and functions for reading
//! TIFF and BigTIFF format files.

pub mod errors;
pub mod header;
pub mod field;
pub mod ifd;
pub mod types;
pub mod metadata;
pub mod reader;
pub mod constants;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{ErrorKind, TiffError, TiffResult};
pub use field::{FieldType, FieldValue, TypedField, ValueStorage};
pub use header::{FileHeader, TiffVariant};
pub use ifd::IFD;
pub use metadata::ImageMetadata;
pub use reader::TiffReader;
pub use types::TIFF;
