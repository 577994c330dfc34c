//! I/O utilities for file handling
//!
//! This module provides byte order strategies and positioned byte sources.

pub mod byte_order;
pub mod source;

pub use byte_order::ByteOrder;
pub use source::{FileSource, MemorySource, RandomAccessSource, ReaderSource, SeekableReader};
