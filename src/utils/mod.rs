//! Utility modules for common functionality
//!
//! Logging, progress display and name tables used by the library and CLI.

pub mod logger;
pub mod progress;
pub mod string_utils;
pub mod tag_utils;
