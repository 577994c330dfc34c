//! Reader configuration
//!
//! Settings can be built in code or loaded from a TOML file with a
//! `[reader]` table:
//!
//! ```toml
//! [reader]
//! max_directories = 64
//! lenient_end_of_information = true
//! log_level = "debug"
//! ```

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::validation;

/// Default cap on the directory chain length
pub const DEFAULT_MAX_DIRECTORIES: usize = 1024;

/// Options that change how files are parsed and strips decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Longest directory chain accepted before the file is rejected
    pub max_directories: usize,
    /// Treat an LZW stream that ends without END as complete
    pub lenient_end_of_information: bool,
    /// Log level requested by the configuration file, if any
    pub log_level: Option<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            max_directories: DEFAULT_MAX_DIRECTORIES,
            lenient_end_of_information: false,
            log_level: None,
        }
    }
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory chain cap; values below 1 are raised to 1
    pub fn with_max_directories(mut self, max_directories: usize) -> Self {
        self.max_directories = max_directories.max(1);
        self
    }

    pub fn with_lenient_end_of_information(mut self, lenient: bool) -> Self {
        self.lenient_end_of_information = lenient;
        self
    }

    /// Parses a configuration from TOML text
    ///
    /// Missing keys keep their defaults and unknown keys are ignored.
    ///
    /// # Arguments
    /// * `content` - TOML document
    ///
    /// # Returns
    /// The configuration, or an error for malformed TOML or mistyped values
    pub fn from_toml_str(content: &str) -> TiffResult<Self> {
        let value: toml::Value = content.parse()
            .map_err(|e| TiffError::GenericError(format!("Failed to parse configuration: {}", e)))?;

        let mut config = ReaderConfig::default();
        let reader = match value.get("reader") {
            Some(table) => table,
            None => {
                debug!("No [reader] table in configuration, using defaults");
                return Ok(config);
            }
        };

        if let Some(v) = reader.get("max_directories") {
            let max = v.as_integer()
                .ok_or_else(|| TiffError::GenericError("max_directories must be an integer".to_string()))?;
            validation::validate_range(max, 1, i64::from(u32::MAX), "max_directories")?;
            config.max_directories = max as usize;
        }

        if let Some(v) = reader.get("lenient_end_of_information") {
            config.lenient_end_of_information = v.as_bool()
                .ok_or_else(|| TiffError::GenericError("lenient_end_of_information must be a boolean".to_string()))?;
        }

        if let Some(v) = reader.get("log_level") {
            let level = v.as_str()
                .ok_or_else(|| TiffError::GenericError("log_level must be a string".to_string()))?;
            config.log_level = Some(level.to_string());
        }

        Ok(config)
    }

    /// Loads a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TiffResult<Self> {
        info!("Loading configuration from {}", path.as_ref().display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
