//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod decode_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use decode_command::{DecodeCommand, StripSelection};

use clap::ArgMatches;
use crate::config::ReaderConfig;
use crate::tiff::errors::TiffResult;

/// Factory for creating command instances based on CLI arguments
#[derive(Default)]
pub struct StripkitCommandFactory;

impl StripkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        StripkitCommandFactory
    }
}

impl<'a> CommandFactory<'a> for StripkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, config: &'a ReaderConfig) -> TiffResult<Box<dyn Command + 'a>> {
        if args.get_flag("all-strips") || args.get_one::<String>("strip").is_some() {
            Ok(Box::new(DecodeCommand::new(args, config)?))
        } else {
            // Default to analyze command
            Ok(Box::new(AnalyzeCommand::new(args, config)?))
        }
    }
}
