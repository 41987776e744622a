// src/writer/parsed_log_writer.rs
use crate::error::{EvlogError, Result};
use crate::types::Row;
use crate::utils::{byte_swap, hex_encode_into, HEX_FIELD_WIDTH};
use bytes::{BufMut, BytesMut};
use chrono::{Local, NaiveDateTime};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// First line of every parsed log
pub const LOG_TITLE: &str = "EV Logger Parsed Log";

/// C-locale `%c` rendering, e.g. `Tue Jan  1 00:00:00 2030`
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

const FIELD_SEPARATOR: u8 = b',';
const ROW_SEPARATOR: u8 = b'\n';

/// Contents of the three-line text header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub generated: NaiveDateTime,
}

impl HeaderInfo {
    /// Header stamped with the current local time
    pub fn now(title: impl Into<String>) -> Self {
        Self::at(title, Local::now().naive_local())
    }

    /// Header with a fixed generation time, for reproducible output
    pub fn at(title: impl Into<String>, generated: NaiveDateTime) -> Self {
        HeaderInfo {
            title: title.into(),
            generated,
        }
    }

    /// The `Generated: ...` line without its terminator
    pub fn generated_line(&self) -> String {
        format!("Generated: {}", self.generated.format(TIMESTAMP_FORMAT))
    }
}

impl Default for HeaderInfo {
    fn default() -> Self {
        Self::now(LOG_TITLE)
    }
}

/// Writer for the comma-separated hex text log
///
/// Rows are separated by a newline; the last row is left unterminated.
/// Each field is the little-endian encoding of one sample as 4 lowercase
/// hex digits.
///
/// # Example
///
/// ```
/// use evlog::writer::{ParsedLogWriter, HeaderInfo};
/// use evlog::{Row, Sample};
/// use chrono::NaiveDate;
///
/// let generated = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
///     .and_hms_opt(0, 0, 0).unwrap();
///
/// let mut writer = ParsedLogWriter::new(Vec::new());
/// writer.write_header(&HeaderInfo::at("EV Logger Parsed Log", generated)).unwrap();
/// writer.write_row(&[Sample(1), Sample(2)].into_iter().collect::<Row>()).unwrap();
///
/// let text = String::from_utf8(writer.finish().unwrap()).unwrap();
/// assert_eq!(text, "EV Logger Parsed Log\nGenerated: Tue Jan  1 00:00:00 2030\n\n0100,0200");
/// ```
pub struct ParsedLogWriter<W: Write> {
    sink: W,
    line: BytesMut,
    rows_written: u64,
}

impl ParsedLogWriter<BufWriter<File>> {
    /// Create (or truncate) the output file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| EvlogError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "created output log");
        Ok(ParsedLogWriter::new(BufWriter::new(file)))
    }
}

impl<W: Write> ParsedLogWriter<W> {
    pub fn new(sink: W) -> Self {
        ParsedLogWriter {
            sink,
            line: BytesMut::with_capacity(256),
            rows_written: 0,
        }
    }

    /// Write the title line, the generation timestamp and a blank line
    pub fn write_header(&mut self, header: &HeaderInfo) -> Result<()> {
        writeln!(self.sink, "{}", header.title)?;
        writeln!(self.sink, "{}", header.generated_line())?;
        writeln!(self.sink)?;
        Ok(())
    }

    /// Append one row of samples
    ///
    /// Empty rows are ignored.
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        if row.is_empty() {
            return Ok(());
        }

        self.line.clear();
        if self.rows_written > 0 {
            self.line.put_u8(ROW_SEPARATOR);
        }

        let mut field = [0u8; HEX_FIELD_WIDTH];
        for (i, sample) in row.iter().enumerate() {
            if i > 0 {
                self.line.put_u8(FIELD_SEPARATOR);
            }
            hex_encode_into(&byte_swap(sample.to_be_bytes()), &mut field)?;
            self.line.put_slice(&field);
        }

        self.sink.write_all(&self.line)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> Result<W> {
        self.sink.flush()?;
        debug!(rows = self.rows_written, "closed output log");
        Ok(self.sink)
    }
}
