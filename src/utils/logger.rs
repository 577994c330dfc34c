//! File logger for the `log` facade
//!
//! Console output goes through `env_logger`; this logger is installed
//! instead when a log file is requested, and echoes warnings and errors to
//! stderr so they are not lost.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes log records to a file
pub struct Logger {
    /// File handle for log output
    file: Mutex<File>,
    /// Most verbose level written
    level: LevelFilter,
}

impl Logger {
    /// Creates a logger writing to `log_file`, truncating it
    ///
    /// # Arguments
    /// * `log_file` - Path to the log file
    /// * `level` - Most verbose level to record
    pub fn new<P: AsRef<Path>>(log_file: P, level: LevelFilter) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(file),
            level,
        })
    }

    /// Installs a file logger as the global `log` backend
    pub fn init_global_logger<P: AsRef<Path>>(log_file: P, level: LevelFilter) -> io::Result<()> {
        let logger = Logger::new(log_file, level)?;

        if log::set_boxed_logger(Box::new(logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(())
    }

    fn write_line(&self, message: &str) -> io::Result<()> {
        let mut file = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        writeln!(file, "{}", message)?;
        file.flush()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        let _ = self.write_line(&message);

        if record.level() <= Level::Warn {
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}
