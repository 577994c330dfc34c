//! Command pattern interfaces
//!
//! Each CLI operation is a [`Command`]; a [`CommandFactory`] picks one from
//! the parsed arguments.

use crate::config::ReaderConfig;
use crate::tiff::errors::TiffResult;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    ///
    /// # Returns
    /// Result indicating success or an error
    fn execute(&self) -> TiffResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Reader configuration shared by all commands
    ///
    /// # Returns
    /// A command that implements the Command trait, or an error
    fn create_command(&self, args: &clap::ArgMatches, config: &'a ReaderConfig) -> TiffResult<Box<dyn Command + 'a>>;
}
