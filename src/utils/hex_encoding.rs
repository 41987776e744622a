// src/utils/hex_encoding.rs
use crate::error::Result;

/// Width of one encoded sample field
pub const HEX_FIELD_WIDTH: usize = 4;

/// Lowercase hex of a 2-byte sample, no prefix or separator
pub fn hex_encode(bytes: &[u8; 2]) -> String {
    hex::encode(bytes)
}

/// Encode into a fixed buffer without allocating
pub fn hex_encode_into(bytes: &[u8; 2], out: &mut [u8; HEX_FIELD_WIDTH]) -> Result<()> {
    hex::encode_to_slice(bytes, out)?;
    Ok(())
}
