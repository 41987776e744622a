// src/reader/sample_reader.rs
use crate::error::{EvlogError, Result};
use crate::types::{Row, Sample, SAMPLE_SIZE};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::debug;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::io::Cursor;

/// Sequential reader of big-endian samples from a raw datalogger log
///
/// The log has no header or framing: it is a flat run of 2-byte samples.
/// Reading stops at the first short read. A single leftover byte at the end
/// of the stream is dropped and counted in [`dangling_bytes`](Self::dangling_bytes).
///
/// # Example
///
/// ```
/// use evlog::reader::SampleReader;
/// use evlog::Sample;
/// use std::io::Cursor;
///
/// let mut reader = SampleReader::new(Cursor::new(vec![0x00, 0x01, 0xFF]));
/// assert_eq!(reader.read_sample().unwrap(), Some(Sample(1)));
/// assert_eq!(reader.read_sample().unwrap(), None);
/// assert_eq!(reader.dangling_bytes(), 1);
/// ```
pub struct SampleReader<R: Read> {
    inner: R,
    samples_read: u64,
    dangling_bytes: usize,
    exhausted: bool,
}

/// Constructor for standard file I/O
impl SampleReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| EvlogError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened input log");
        Ok(SampleReader::new(BufReader::with_capacity(65536, file)))
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl SampleReader<Cursor<Mmap>> {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| EvlogError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;
        let mmap = unsafe { Mmap::map(&file)? };
        debug!(path = %path.display(), len = mmap.len(), "mapped input log");
        Ok(SampleReader::new(Cursor::new(mmap)))
    }
}

impl<R: Read> SampleReader<R> {
    pub fn new(inner: R) -> Self {
        SampleReader {
            inner,
            samples_read: 0,
            dangling_bytes: 0,
            exhausted: false,
        }
    }

    /// Read the next sample
    ///
    /// Returns `Ok(None)` once fewer than two bytes remain. After that every
    /// further call also returns `Ok(None)` without touching the stream.
    pub fn read_sample(&mut self) -> Result<Option<Sample>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut bytes = [0u8; SAMPLE_SIZE];
        let filled = read_full(&mut self.inner, &mut bytes)?;

        if filled < SAMPLE_SIZE {
            self.exhausted = true;
            self.dangling_bytes = filled;
            return Ok(None);
        }

        self.samples_read += 1;
        Ok(Some(Sample::from_be_bytes(bytes)))
    }

    /// Read up to `channels` samples as one row
    ///
    /// The row is shorter than `channels` only when the input ends inside it.
    /// Returns `Ok(None)` when no sample at all was left.
    pub fn read_row(&mut self, channels: usize) -> Result<Option<Row>> {
        if channels == 0 {
            return Err(EvlogError::InvalidChannelCount(channels));
        }

        let mut row = Row::with_capacity(channels);
        while row.len() < channels {
            match self.read_sample()? {
                Some(sample) => row.push(sample),
                None => break,
            }
        }

        if row.is_empty() {
            Ok(None)
        } else {
            Ok(Some(row))
        }
    }

    /// Iterate over the remaining input row by row
    pub fn rows(self, channels: usize) -> RowIter<R> {
        RowIter {
            reader: self,
            channels,
            failed: false,
        }
    }

    /// Number of complete samples decoded so far
    pub fn samples_read(&self) -> u64 {
        self.samples_read
    }

    /// Bytes left over after the last complete sample (0 or 1)
    pub fn dangling_bytes(&self) -> usize {
        self.dangling_bytes
    }

    /// Whether end of input has been reached
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Fill `buf` as far as the stream allows, retrying interrupted reads
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Iterator over rows of a sample log
///
/// Yields `Err` at most once; iteration ends after an error.
pub struct RowIter<R: Read> {
    reader: SampleReader<R>,
    channels: usize,
    failed: bool,
}

impl<R: Read> RowIter<R> {
    /// Borrow the underlying reader, e.g. to inspect `dangling_bytes`
    pub fn reader(&self) -> &SampleReader<R> {
        &self.reader
    }

    pub fn into_reader(self) -> SampleReader<R> {
        self.reader
    }
}

impl<R: Read> Iterator for RowIter<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.reader.read_row(self.channels) {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
