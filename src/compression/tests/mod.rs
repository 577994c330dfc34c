//! Unit tests for compression and the predictor

mod lzw_tests;
mod factory_tests;
