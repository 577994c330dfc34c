//! TIFF structure analysis command
//!
//! Prints the header, every directory with named tags and values, and the
//! extracted image metadata.

use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::compression::CompressionFactory;
use crate::config::ReaderConfig;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::metadata::ImageMetadata;
use crate::tiff::types::TIFF;
use crate::tiff::TiffReader;
use crate::utils::{string_utils, tag_utils};

/// Command for analyzing TIFF file structure
pub struct AnalyzeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Whether to print every directory in full
    verbose: bool,
    /// Reader options
    config: &'a ReaderConfig,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Reader options
    pub fn new(args: &ArgMatches, config: &'a ReaderConfig) -> TiffResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| TiffError::GenericError("Missing input file".to_string()))?
            .clone();

        Ok(AnalyzeCommand {
            input_file,
            verbose: args.get_flag("verbose"),
            config,
        })
    }

    fn display_summary(&self, reader: &TiffReader, tiff: &TIFF) {
        println!("File: {} ({})", self.input_file, string_utils::format_byte_size(reader.source().len()));
        println!("Header: {}", tiff.header);
        println!("Number of IFDs: {}", tiff.ifd_count());
    }

    fn display_directories(&self, tiff: &TIFF) {
        for ifd in &tiff.ifds {
            if self.verbose {
                print!("{}", ifd);
            } else {
                println!("IFD #{} at offset {}: {} entries", ifd.number, ifd.offset, ifd.entry_count());
            }
        }
    }

    fn display_metadata(&self, metadata: &ImageMetadata) {
        println!("Image:");
        match metadata.dimensions() {
            Ok((width, height)) => println!("  Dimensions: {}x{}", width, height),
            Err(_) => println!("  Dimensions: Not available"),
        }
        println!("  Samples per pixel: {}", metadata.samples_per_pixel_or_default());
        println!("  Bits per sample: {:?}", metadata.bits_per_sample_or_default());

        let compression = metadata.compression_or_default() as u64;
        println!("  Compression: {} ({}){}", compression, tag_utils::get_compression_name(compression),
                 if CompressionFactory::is_supported(compression) { "" } else { ", not decodable" });

        let predictor = metadata.predictor_or_default() as u64;
        println!("  Predictor: {} ({})", predictor, tag_utils::get_predictor_name(predictor));

        let planar = metadata.planar_configuration_or_default() as u64;
        println!("  Planar configuration: {} ({})", planar, tag_utils::get_planar_configuration_name(planar));

        if let Some(rows) = metadata.rows_per_strip {
            println!("  Rows per strip: {}", rows);
        }
        println!("  Strips: {}", metadata.strip_count());

        for (label, text) in [
            ("Software", &metadata.software),
            ("Date/time", &metadata.date_time),
            ("Description", &metadata.image_description),
        ] {
            if let Some(text) = text {
                println!("  {}: {}", label, text);
            }
        }

        if !metadata.failed_tags.is_empty() {
            let names: Vec<String> = metadata.failed_tags.iter()
                .map(|&tag| format!("{} ({})", tag, tag_utils::get_tag_name(tag)))
                .collect();
            println!("  Unreadable tags: {}", names.join(", "));
        }
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> TiffResult<()> {
        info!("Analyzing {}", self.input_file);

        let reader = TiffReader::open(&self.input_file, self.config.clone())?;
        let tiff = reader.read()?;
        let metadata = reader.metadata(&tiff);
        debug!("Extracted metadata: {:?}", metadata);

        self.display_summary(&reader, &tiff);
        self.display_directories(&tiff);
        self.display_metadata(&metadata);
        Ok(())
    }
}
