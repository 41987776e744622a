// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvlogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot open input log {path}: {source}")]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("Cannot create output log {path}: {source}")]
    CreateOutput { path: PathBuf, source: io::Error },

    #[error("Hex encoding error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid channel count: {0} (must be at least 1)")]
    InvalidChannelCount(usize),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, EvlogError>;
