//! Strip decoding command
//!
//! Decodes one strip or all of them and writes the raw sample bytes to a
//! file, or prints a short summary when no output file is given.

use std::fs::File;
use std::io::{BufWriter, Write};

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::config::ReaderConfig;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::TiffReader;
use crate::utils::progress::ProgressTracker;
use crate::utils::string_utils;

/// Which strips to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripSelection {
    One(usize),
    All,
}

/// Command for decoding strip data
pub struct DecodeCommand<'a> {
    input_file: String,
    output_file: Option<String>,
    selection: StripSelection,
    config: &'a ReaderConfig,
}

impl<'a> DecodeCommand<'a> {
    /// Create a new decode command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Reader options
    pub fn new(args: &ArgMatches, config: &'a ReaderConfig) -> TiffResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| TiffError::GenericError("Missing input file".to_string()))?
            .clone();

        let selection = if args.get_flag("all-strips") {
            StripSelection::All
        } else {
            let index = args.get_one::<String>("strip")
                .ok_or_else(|| TiffError::GenericError("No strip selected".to_string()))?;
            let index = index.parse::<usize>()
                .map_err(|e| TiffError::GenericError(format!("Invalid strip index '{}': {}", index, e)))?;
            StripSelection::One(index)
        };

        Ok(DecodeCommand {
            input_file,
            output_file: args.get_one::<String>("output").cloned(),
            selection,
            config,
        })
    }

    fn print_preview(index: usize, data: &[u8]) {
        let preview: Vec<String> = data.iter().take(16).map(|b| format!("{:02x}", b)).collect();
        println!("Strip {}: {} decoded [{}{}]",
                 index, string_utils::format_byte_size(data.len() as u64),
                 preview.join(" "), if data.len() > 16 { " ..." } else { "" });
    }
}

impl<'a> Command for DecodeCommand<'a> {
    fn execute(&self) -> TiffResult<()> {
        let reader = TiffReader::open(&self.input_file, self.config.clone())?;
        let tiff = reader.read()?;
        let metadata = reader.metadata(&tiff);

        if tiff.ifd_count() > 1 {
            warn!("File has {} IFDs; strips are resolved from the merged tag set", tiff.ifd_count());
        }

        let indices: Vec<usize> = match self.selection {
            StripSelection::One(index) => vec![index],
            StripSelection::All => (0..metadata.strip_count()).collect(),
        };

        let mut output = match &self.output_file {
            Some(path) => Some(BufWriter::new(File::create(path)?)),
            None => None,
        };

        let progress = match self.selection {
            StripSelection::All => ProgressTracker::new(indices.len() as u64, "decoding"),
            StripSelection::One(_) => ProgressTracker::hidden(1),
        };

        let strips = reader.strip_reader(&tiff);
        let mut total = 0u64;
        for &index in &indices {
            progress.set_message(&format!("strip {}", index));
            let data = strips.read_strip(&metadata, index)?;
            total += data.len() as u64;

            match output.as_mut() {
                Some(out) => out.write_all(&data)?,
                None => Self::print_preview(index, &data),
            }
            progress.increment(1);
        }
        progress.finish();

        if let Some(mut out) = output {
            out.flush()?;
        }

        info!("Decoded {} strips, {} bytes", indices.len(), total);
        if let Some(path) = &self.output_file {
            println!("Wrote {} from {} strips to {}", string_utils::format_byte_size(total), indices.len(), path);
        }
        Ok(())
    }
}
