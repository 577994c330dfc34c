//! TIFF / BigTIFF file header
//!
//! The header fixes the byte order and, through the identifier, the width of
//! every count, offset and record in the rest of the file.

use std::fmt;

use log::{debug, error};

use crate::io::byte_order::ByteOrder;
use crate::io::source::RandomAccessSource;
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::validation;

/// Layout family selected by the header identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffVariant {
    /// Identifier 42, 32-bit offsets
    Classic,
    /// Identifier 43, 64-bit offsets
    Big,
}

impl TiffVariant {
    /// Width of directory entry counts
    pub fn entry_count_size(&self) -> usize {
        match self {
            TiffVariant::Classic => 2,
            TiffVariant::Big => 8,
        }
    }

    /// Width of counts, offsets and the value slot inside a record
    pub fn offset_size(&self) -> usize {
        match self {
            TiffVariant::Classic => 4,
            TiffVariant::Big => 8,
        }
    }

    /// Size of one directory record
    pub fn entry_size(&self) -> usize {
        4 + 2 * self.offset_size()
    }

    /// Bytes that fit directly in a record's value slot
    pub fn inline_capacity(&self) -> usize {
        self.offset_size()
    }

    pub fn name(&self) -> &'static str {
        match self {
            TiffVariant::Classic => "TIFF",
            TiffVariant::Big => "BigTIFF",
        }
    }
}

/// Parsed file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Byte order of every multi-byte value in the file
    pub byte_order: ByteOrder,
    /// 42 for classic TIFF, 43 for BigTIFF
    pub identifier: u16,
    /// Offset of the first image file directory
    pub first_directory_offset: u64,
}

impl FileHeader {
    /// Reads and validates the header at the start of `source`
    ///
    /// # Arguments
    /// * `source` - The file bytes
    ///
    /// # Returns
    /// The header, or a format error for a bad marker, identifier or BigTIFF prologue
    pub fn read(source: &dyn RandomAccessSource) -> TiffResult<Self> {
        let prologue = source.read_bytes(0, 4)?;
        let byte_order = ByteOrder::from_marker([prologue[0], prologue[1]])?;
        debug!("Detected byte order: {}", byte_order.name());

        let identifier = byte_order.read_u16(&prologue[2..4]);
        let first_directory_offset = match identifier {
            header::TIFF_VERSION => source.read_uint(4, 4, byte_order)?,
            header::BIG_TIFF_VERSION => {
                let bigtiff = source.read_bytes(4, 12)?;
                let offset_size = byte_order.read_u16(&bigtiff[0..2]);
                let padding = byte_order.read_u16(&bigtiff[2..4]);
                validation::validate_bigtiff_header(offset_size, padding)?;
                byte_order.read_u64(&bigtiff[4..12])
            }
            _ => {
                error!("Unsupported TIFF identifier: {}", identifier);
                return Err(TiffError::UnsupportedVersion(identifier));
            }
        };

        debug!("TIFF identifier {}, first directory at offset {}", identifier, first_directory_offset);

        Ok(FileHeader {
            byte_order,
            identifier,
            first_directory_offset,
        })
    }

    /// The layout family implied by the identifier
    pub fn variant(&self) -> TiffVariant {
        if self.identifier == header::BIG_TIFF_VERSION {
            TiffVariant::Big
        } else {
            TiffVariant::Classic
        }
    }

    pub fn is_big_tiff(&self) -> bool {
        self.variant() == TiffVariant::Big
    }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}), identifier {}, first IFD at {}",
               self.variant().name(), self.byte_order.name(),
               self.identifier, self.first_directory_offset)
    }
}
