//! Image data extraction
//!
//! Turns stored strips back into raw sample bytes.

pub mod strip_reader;

pub use strip_reader::StripReader;
