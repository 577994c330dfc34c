//! Core TIFF data structures

use std::collections::BTreeMap;
use std::fmt;

use crate::tiff::field::TypedField;
use crate::tiff::header::FileHeader;
use crate::tiff::ifd::IFD;

/// A parsed TIFF file: header, directory chain and flattened field view
#[derive(Debug, Clone)]
pub struct TIFF {
    /// File header
    pub header: FileHeader,
    /// Image File Directories in chain order
    pub ifds: Vec<IFD>,
    /// Union of all directories' fields; a later directory wins for a repeated tag
    pub fields: BTreeMap<u16, TypedField>,
}

impl TIFF {
    /// Creates a TIFF with no directories yet
    pub fn new(header: FileHeader) -> Self {
        TIFF {
            header,
            ifds: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Appends a directory and merges its fields into the flattened view
    pub fn push_ifd(&mut self, ifd: IFD) {
        for entry in &ifd.entries {
            self.fields.insert(entry.tag, entry.clone());
        }
        self.ifds.push(ifd);
    }

    /// Returns the main (first) IFD if available
    pub fn main_ifd(&self) -> Option<&IFD> {
        self.ifds.first()
    }

    pub fn ifd_count(&self) -> usize {
        self.ifds.len()
    }

    pub fn is_big_tiff(&self) -> bool {
        self.header.is_big_tiff()
    }

    /// Looks up a field in the flattened view
    pub fn field(&self, tag: u16) -> Option<&TypedField> {
        self.fields.get(&tag)
    }
}

impl fmt::Display for TIFF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIFF File:")?;
        writeln!(f, "  Header: {}", self.header)?;
        writeln!(f, "  Number of IFDs: {}", self.ifds.len())?;

        for ifd in &self.ifds {
            write!(f, "{}", ifd)?;
        }

        Ok(())
    }
}
