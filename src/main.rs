// src/main.rs
//! evlog-parse: convert an EV datalogger sample log into a text log

use anyhow::{Context, Result};
use clap::Parser;
use evlog::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use evlog::{ConverterConfig, DEFAULT_CHANNELS, LOG_TITLE};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "evlog-parse")]
#[command(about = "Convert an EV datalogger binary sample log into comma-separated hex text")]
#[command(version)]
struct Cli {
    /// Binary sample log written by the datalogger
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Text log to create (overwritten if present)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Samples per row
    #[arg(short, long, default_value_t = DEFAULT_CHANNELS)]
    channels: usize,

    /// First line of the output header
    #[arg(long, default_value = LOG_TITLE)]
    title: String,

    /// Fixed header timestamp (YYYY-MM-DDTHH:MM:SS) instead of the current time
    #[arg(long)]
    timestamp: Option<String>,

    /// Map the input file into memory instead of buffered reads
    #[cfg(feature = "mmap")]
    #[arg(long)]
    mmap: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(cli: &Cli) -> Result<ConverterConfig> {
    let mut config = ConverterConfig::new(&cli.input, &cli.output)
        .with_channels(cli.channels)
        .with_title(cli.title.clone());

    if let Some(timestamp) = &cli.timestamp {
        config = config.with_timestamp_str(timestamp)?;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(?cli, "starting");

    let config = build_config(&cli)?;

    #[cfg(feature = "mmap")]
    let summary = if cli.mmap {
        evlog::convert_files_mmap(&config)
    } else {
        evlog::convert_files(&config)
    };
    #[cfg(not(feature = "mmap"))]
    let summary = evlog::convert_files(&config);

    let summary = summary.with_context(|| {
        format!(
            "failed to convert {} into {}",
            config.input.display(),
            config.output.display()
        )
    })?;

    println!(
        "{} -> {}: {} rows, {} samples{}",
        config.input.display(),
        config.output.display(),
        summary.rows,
        summary.samples,
        if summary.is_truncated() { " (truncated input)" } else { "" }
    );
    Ok(())
}
