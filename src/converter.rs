// src/converter.rs
use crate::config::ConverterConfig;
use crate::error::{EvlogError, Result};
use crate::reader::SampleReader;
use crate::writer::{HeaderInfo, ParsedLogWriter};
use std::io::{Read, Write};
use tracing::{debug, info, warn};

/// What a conversion pass consumed and produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionSummary {
    /// Data lines written, including a trailing partial row
    pub rows: u64,
    pub samples: u64,
    /// Sample count of the last row when the input ended mid-row
    pub partial_row_len: Option<usize>,
    /// Odd byte left after the last whole sample (0 or 1)
    pub dangling_bytes: usize,
}

impl ConversionSummary {
    pub fn full_rows(&self) -> u64 {
        match self.partial_row_len {
            Some(_) => self.rows.saturating_sub(1),
            None => self.rows,
        }
    }

    /// Whether the input length was not a whole number of rows
    pub fn is_truncated(&self) -> bool {
        self.partial_row_len.is_some() || self.dangling_bytes > 0
    }
}

/// Convert a raw sample stream into the parsed text log
///
/// Writes the header, then one line per row of `channels` samples. The
/// input ending mid-row yields a shorter final line; a dangling odd byte
/// is dropped. Neither is an error, but both are reported in the returned
/// summary and logged as a warning. The sink is flushed before returning.
///
/// # Example
///
/// ```
/// use evlog::{convert, HeaderInfo};
/// use chrono::NaiveDate;
/// use std::io::Cursor;
///
/// let generated = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
///     .and_hms_opt(0, 0, 0).unwrap();
/// let header = HeaderInfo::at("EV Logger Parsed Log", generated);
///
/// let input = Cursor::new(vec![0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04]);
/// let mut output = Vec::new();
/// let summary = convert(input, &mut output, &header, 2).unwrap();
///
/// assert_eq!(summary.rows, 2);
/// assert!(String::from_utf8(output).unwrap().ends_with("\n\n0100,0200\n0300,0400"));
/// ```
pub fn convert<R: Read, W: Write>(
    source: R,
    sink: W,
    header: &HeaderInfo,
    channels: usize,
) -> Result<ConversionSummary> {
    convert_streams(
        SampleReader::new(source),
        ParsedLogWriter::new(sink),
        header,
        channels,
    )
}

/// Drive an already-opened reader and writer through one pass
///
/// Both are consumed, so the input and output handles are released on
/// every return path.
pub fn convert_streams<R: Read, W: Write>(
    mut reader: SampleReader<R>,
    mut writer: ParsedLogWriter<W>,
    header: &HeaderInfo,
    channels: usize,
) -> Result<ConversionSummary> {
    if channels == 0 {
        return Err(EvlogError::InvalidChannelCount(channels));
    }

    writer.write_header(header)?;

    let mut summary = ConversionSummary::default();
    while let Some(row) = reader.read_row(channels)? {
        writer.write_row(&row)?;
        if !row.is_complete(channels) {
            summary.partial_row_len = Some(row.len());
        }
    }

    summary.rows = writer.rows_written();
    summary.samples = reader.samples_read();
    summary.dangling_bytes = reader.dangling_bytes();
    writer.finish()?;

    report_truncation(&summary, channels);
    debug!(rows = summary.rows, samples = summary.samples, "conversion pass complete");
    Ok(summary)
}

/// Convert the input file named in `config` into its output file
pub fn convert_files(config: &ConverterConfig) -> Result<ConversionSummary> {
    config.validate()?;
    let reader = SampleReader::open(&config.input)?;
    run_file_conversion(config, reader)
}

/// Like [`convert_files`], but maps the input into memory
#[cfg(feature = "mmap")]
pub fn convert_files_mmap(config: &ConverterConfig) -> Result<ConversionSummary> {
    config.validate()?;
    let reader = SampleReader::open_mmap(&config.input)?;
    run_file_conversion(config, reader)
}

fn run_file_conversion<R: Read>(
    config: &ConverterConfig,
    reader: SampleReader<R>,
) -> Result<ConversionSummary> {
    let writer = ParsedLogWriter::create(&config.output)?;
    let summary = convert_streams(reader, writer, &config.header(), config.channels)?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        rows = summary.rows,
        samples = summary.samples,
        "converted log"
    );
    Ok(summary)
}

fn report_truncation(summary: &ConversionSummary, channels: usize) {
    if let Some(len) = summary.partial_row_len {
        warn!(
            fields = len,
            channels,
            "input ended mid-row; last line is short"
        );
    }
    if summary.dangling_bytes > 0 {
        warn!(
            bytes = summary.dangling_bytes,
            "input ended with an incomplete sample; dropped"
        );
    }
}
