//! Compression handling for TIFF strips
//!
//! Strategies for the supported compression methods, plus the predictor
//! stage that runs after decompression.

mod handler;
mod uncompressed;
mod factory;
pub mod lzw;
pub mod predictor;

#[cfg(test)]
mod tests;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use factory::CompressionFactory;
pub use lzw::LzwHandler;
pub use predictor::{PlanarConfiguration, Predictor, SampleLayout};
