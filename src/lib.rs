// src/lib.rs
//! # evlog
//!
//! Converter for the binary sample logs written by the EV datalogger into a
//! human-readable, comma-separated text log.
//!
//! The datalogger stores each reading as a big-endian 16-bit signed integer,
//! one per channel, with no framing. This crate groups the samples into rows
//! of a fixed channel count, re-encodes every sample little-endian, and writes
//! each row as a line of 4-digit lowercase hex fields under a short header:
//!
//! ```text
//! EV Logger Parsed Log
//! Generated: Tue Jan  1 00:00:00 2030
//!
//! 0100,0200,...
//! ```
//!
//! ## Quick Start
//!
//! ### Converting files
//!
//! ```rust,no_run
//! use evlog::*;
//!
//! fn main() -> Result<()> {
//!     let config = ConverterConfig::new("sample.log", "parsed.log").with_channels(10);
//!     let summary = convert_files(&config)?;
//!
//!     if summary.is_truncated() {
//!         eprintln!("last row incomplete");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Reading samples directly
//!
//! ```rust
//! use evlog::*;
//! use std::io::Cursor;
//!
//! let reader = SampleReader::new(Cursor::new(vec![0x00, 0x01, 0x00, 0x02]));
//! for row in reader.rows(2) {
//!     let row = row.unwrap();
//!     assert_eq!(row.samples(), &[Sample(1), Sample(2)]);
//! }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod config;
pub mod utils;
pub mod reader;
pub mod writer;
pub mod converter;

// Re-export commonly used types at the crate root for convenience
pub use error::{EvlogError, Result};

pub use types::{
    Sample,
    Row,
    DEFAULT_CHANNELS,
    SAMPLE_SIZE,
};

pub use config::ConverterConfig;

pub use utils::{byte_swap, hex_encode};

pub use reader::{SampleReader, RowIter};

pub use writer::{ParsedLogWriter, HeaderInfo, LOG_TITLE, TIMESTAMP_FORMAT};

pub use converter::{convert, convert_streams, convert_files, ConversionSummary};

#[cfg(feature = "mmap")]
pub use converter::convert_files_mmap;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use evlog::prelude::*;
    //! ```

    pub use crate::error::{EvlogError, Result};
    pub use crate::types::{Sample, Row};
    pub use crate::config::ConverterConfig;
    pub use crate::converter::{convert, convert_files, ConversionSummary};
    pub use crate::writer::HeaderInfo;
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
