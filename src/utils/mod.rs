// src/utils/mod.rs
mod hex_encoding;
mod endian;

pub use hex_encoding::*;
pub use endian::*;
