// src/types.rs
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use smallvec::SmallVec;
use std::fmt;

use crate::utils::hex_encode;

/// Number of channels the EV datalogger samples per row
pub const DEFAULT_CHANNELS: usize = 10;

/// Size of one encoded sample in bytes
pub const SAMPLE_SIZE: usize = 2;

/// Rows up to this many channels stay on the stack
pub const ROW_INLINE_CAPACITY: usize = 16;

/// A single 2-byte signed reading from one channel
///
/// The on-disk representation is big-endian. The value itself carries no
/// units or calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sample(pub i16);

impl Sample {
    /// Decode a sample from its big-endian on-disk bytes
    pub fn from_be_bytes(bytes: [u8; SAMPLE_SIZE]) -> Self {
        Sample(BigEndian::read_i16(&bytes))
    }

    /// The big-endian bytes as stored in the input log
    pub fn to_be_bytes(self) -> [u8; SAMPLE_SIZE] {
        let mut out = [0u8; SAMPLE_SIZE];
        BigEndian::write_i16(&mut out, self.0);
        out
    }

    /// The little-endian bytes emitted in the parsed log
    pub fn to_le_bytes(self) -> [u8; SAMPLE_SIZE] {
        let mut out = [0u8; SAMPLE_SIZE];
        LittleEndian::write_i16(&mut out, self.0);
        out
    }

    pub fn value(self) -> i16 {
        self.0
    }

    /// Lowercase hex of the little-endian bytes, always 4 characters
    pub fn to_hex(self) -> String {
        hex_encode(&self.to_le_bytes())
    }
}

impl From<i16> for Sample {
    fn from(value: i16) -> Self {
        Sample(value)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One synchronized set of samples across all channels
///
/// Only the last row of a log may hold fewer samples than the configured
/// channel count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    samples: SmallVec<[Sample; ROW_INLINE_CAPACITY]>,
}

impl Row {
    pub fn new() -> Self {
        Row { samples: SmallVec::new() }
    }

    /// Reserve room for up to `channels` samples
    ///
    /// The reservation is capped at the inline capacity; wider rows grow as
    /// samples are pushed, so memory tracks the data actually read.
    pub fn with_capacity(channels: usize) -> Self {
        Row { samples: SmallVec::with_capacity(channels.min(ROW_INLINE_CAPACITY)) }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether this row has a sample for every one of `channels`
    pub fn is_complete(&self, channels: usize) -> bool {
        self.samples.len() == channels
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

impl FromIterator<Sample> for Row {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Row { samples: iter.into_iter().collect() }
    }
}
