pub mod io;
pub mod tiff;
pub mod utils;
pub mod compression;
pub mod extractor;
pub mod commands;
pub mod config;

pub use config::ReaderConfig;
pub use tiff::{ImageMetadata, TiffError, TiffReader, TiffResult, TIFF};
pub use extractor::StripReader;
pub use compression::{PlanarConfiguration, Predictor, SampleLayout};
