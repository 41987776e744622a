// src/config.rs
use crate::error::{EvlogError, Result};
use crate::types::DEFAULT_CHANNELS;
use crate::writer::{HeaderInfo, LOG_TITLE};
use chrono::NaiveDateTime;
use std::path::PathBuf;

/// Input file name the datalogger writes to its SD card
pub const DEFAULT_INPUT: &str = "sample.log";

/// Output file name for the parsed text log
pub const DEFAULT_OUTPUT: &str = "parsed.log";

/// Accepted format for a fixed generation timestamp
pub const TIMESTAMP_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Settings for one file-to-file conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub channels: usize,
    pub title: String,
    /// Fixed header timestamp; `None` stamps with the current local time
    pub generated_at: Option<NaiveDateTime>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            channels: DEFAULT_CHANNELS,
            title: LOG_TITLE.to_string(),
            generated_at: None,
        }
    }
}

impl ConverterConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        ConverterConfig {
            input: input.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Parse and set a `YYYY-MM-DDTHH:MM:SS` timestamp
    pub fn with_timestamp_str(self, timestamp: &str) -> Result<Self> {
        let parsed = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_INPUT_FORMAT)
            .map_err(|e| EvlogError::InvalidTimestamp(format!("{}: {}", timestamp, e)))?;
        Ok(self.with_generated_at(parsed))
    }

    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(EvlogError::InvalidChannelCount(self.channels));
        }
        Ok(())
    }

    /// Header for this run, stamped now unless a timestamp was fixed
    pub fn header(&self) -> HeaderInfo {
        match self.generated_at {
            Some(generated) => HeaderInfo::at(self.title.clone(), generated),
            None => HeaderInfo::now(self.title.clone()),
        }
    }
}
