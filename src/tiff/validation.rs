//! TIFF validation utilities
//!
//! Checks shared by the header parser, the directory walker and the strip
//! pipeline, kept in one place so the error shapes stay consistent.

use std::collections::HashSet;

use log::{debug, error, warn};

use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};

/// Validates the BigTIFF prologue that follows the identifier
///
/// # Arguments
/// * `offset_size` - Bytes [4..6) of the header, must be 8
/// * `padding` - Bytes [6..8) of the header, must be 0
pub fn validate_bigtiff_header(offset_size: u16, padding: u16) -> TiffResult<()> {
    debug!("BigTIFF offset size: {}, padding: {}", offset_size, padding);

    if offset_size != header::BIGTIFF_OFFSET_SIZE || padding != 0 {
        error!("Invalid BigTIFF header: offset_size={}, padding={}", offset_size, padding);
        return Err(TiffError::InvalidBigTIFFHeader { offset_size, padding });
    }

    Ok(())
}

/// Tracks directory offsets already visited during a chain walk
pub struct DirectoryGuard {
    visited: HashSet<u64>,
    max_directories: usize,
}

impl DirectoryGuard {
    pub fn new(max_directories: usize) -> Self {
        DirectoryGuard {
            visited: HashSet::new(),
            max_directories,
        }
    }

    /// Registers `offset` as the next directory to read
    ///
    /// # Returns
    /// An error if the offset was seen before or the chain is too long
    pub fn enter(&mut self, offset: u64) -> TiffResult<()> {
        if self.visited.len() >= self.max_directories {
            warn!("Directory chain exceeds {} entries", self.max_directories);
            return Err(TiffError::MalformedDirectory(format!(
                "more than {} directories in chain", self.max_directories
            )));
        }

        if !self.visited.insert(offset) {
            warn!("Directory chain loops back to offset {}", offset);
            return Err(TiffError::MalformedDirectory(format!(
                "directory at offset {} visited twice", offset
            )));
        }

        Ok(())
    }
}

/// Validates a numeric range to ensure it's within bounds
///
/// # Arguments
/// * `value` - The value to validate
/// * `min` - The minimum valid value (inclusive)
/// * `max` - The maximum valid value (inclusive)
/// * `name` - Name of the value for error messages
pub fn validate_range<T>(value: T, min: T, max: T, name: &str) -> TiffResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(TiffError::GenericError(format!(
            "Invalid {}: {} (must be between {} and {})",
            name, value, min, max
        )));
    }

    Ok(())
}
