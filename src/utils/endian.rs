// src/utils/endian.rs
use byteorder::{ByteOrder, LittleEndian, BigEndian};

/// Re-encode a big-endian `i16` as little-endian bytes
///
/// The integer value is preserved; only the byte order changes, so applying
/// this twice yields the original bytes.
pub fn byte_swap(bytes: [u8; 2]) -> [u8; 2] {
    let value = BigEndian::read_i16(&bytes);
    let mut out = [0u8; 2];
    LittleEndian::write_i16(&mut out, value);
    out
}
