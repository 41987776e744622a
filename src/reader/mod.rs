// src/reader/mod.rs
mod sample_reader;

pub use sample_reader::{SampleReader, RowIter};
