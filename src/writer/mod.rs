// src/writer/mod.rs
mod parsed_log_writer;

pub use parsed_log_writer::{ParsedLogWriter, HeaderInfo, LOG_TITLE, TIMESTAMP_FORMAT};
