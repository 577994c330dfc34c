//! Image File Directory (IFD) structures and methods
//!
//! An IFD is an entry count, a run of fixed-size records and the offset of
//! the next IFD. Classic and BigTIFF files differ only in the widths of those
//! three parts, which [`TiffVariant`] supplies.

use std::collections::HashMap;
use std::fmt;

use log::{debug, info, trace};

use crate::io::source::RandomAccessSource;
use crate::tiff::constants::tags;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field::TypedField;
use crate::tiff::header::{FileHeader, TiffVariant};
use crate::utils::tag_utils;

/// Represents an Image File Directory (IFD) in a TIFF file
#[derive(Debug, Clone)]
pub struct IFD {
    /// Fields in file order
    pub entries: Vec<TypedField>,
    /// IFD number (0-based)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    /// Offset of the next IFD, 0 when this is the last one
    pub next_offset: u64,
    /// Index into `entries` by tag
    tag_map: HashMap<u16, usize>,
}

impl IFD {
    /// Creates an empty IFD
    pub fn new(number: usize, offset: u64) -> Self {
        IFD {
            entries: Vec::new(),
            number,
            offset,
            next_offset: 0,
            tag_map: HashMap::new(),
        }
    }

    /// Reads the IFD at `offset`
    ///
    /// The whole record block is fetched with one positioned read, then each
    /// record is parsed into a [`TypedField`].
    ///
    /// # Arguments
    /// * `source` - The file bytes
    /// * `header` - Parsed file header
    /// * `offset` - File offset of the entry count
    /// * `number` - The index of this IFD in the chain
    ///
    /// # Returns
    /// The parsed IFD, including its next-IFD offset
    pub fn read(source: &dyn RandomAccessSource, header: &FileHeader, offset: u64, number: usize) -> TiffResult<Self> {
        let variant = header.variant();
        let byte_order = header.byte_order;

        let count_size = variant.entry_count_size();
        let entry_count = source.read_uint(offset, count_size, byte_order)?;
        debug!("IFD #{} at offset {} has {} entries", number, offset, entry_count);

        let records_len = entry_count
            .checked_mul(variant.entry_size() as u64)
            .ok_or_else(|| TiffError::MalformedDirectory(format!(
                "entry count {} at offset {} overflows", entry_count, offset
            )))?;
        let records_start = offset + count_size as u64;
        let block = source.read_bytes(records_start, records_len + variant.offset_size() as u64)?;

        let mut ifd = IFD::new(number, offset);
        for record in block[..records_len as usize].chunks_exact(variant.entry_size()) {
            ifd.add_entry(TypedField::parse(record, header, source)?);
        }

        let next = &block[records_len as usize..];
        ifd.next_offset = byte_order.read_uint(next, variant.offset_size())?;

        info!("Read IFD #{} with {} entries, next IFD at {}", number, ifd.entries.len(), ifd.next_offset);
        Ok(ifd)
    }

    /// Bytes this IFD occupies on disk, including the next-IFD offset
    pub fn byte_size(&self, variant: TiffVariant) -> u64 {
        (variant.entry_count_size() + self.entries.len() * variant.entry_size() + variant.offset_size()) as u64
    }

    /// Adds an entry, replacing the lookup for a repeated tag
    pub fn add_entry(&mut self, entry: TypedField) {
        trace!("Adding entry to IFD #{}: {}", self.number, entry.description());

        self.tag_map.insert(entry.tag, self.entries.len());
        self.entries.push(entry);
    }

    /// Gets an entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&TypedField> {
        self.tag_map.get(&tag).map(|&i| &self.entries[i])
    }

    pub fn has_tag(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Gets the dimensions of the image described by this IFD
    pub fn get_dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get_entry(tags::IMAGE_WIDTH)?.as_long().ok()?;
        let height = self.get_entry(tags::IMAGE_LENGTH)?.as_long().ok()?;
        Some((width, height))
    }

    /// Returns number of samples per pixel (default 1 if not specified)
    pub fn get_samples_per_pixel(&self) -> u64 {
        self.get_entry(tags::SAMPLES_PER_PIXEL)
            .and_then(|entry| entry.as_long().ok())
            .unwrap_or(1)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {}, next: {})", self.number, self.offset, self.next_offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;

        if let Some((width, height)) = self.get_dimensions() {
            writeln!(f, "  Dimensions: {}x{}", width, height)?;
        }

        writeln!(f, "  Samples per pixel: {}", self.get_samples_per_pixel())?;

        writeln!(f, "  Tags:")?;
        for entry in &self.entries {
            writeln!(f, "    {} ({}): {} [{} x{}]",
                     entry.tag, tag_utils::get_tag_name(entry.tag),
                     tag_utils::describe_value(entry), entry.field_type.name(), entry.count)?;
        }

        Ok(())
    }
}
