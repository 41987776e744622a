// tests/converter_tests.rs
use evlog::*;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixed_config(dir: &TempDir, input: &[u8], channels: usize) -> ConverterConfig {
    let input_path = dir.path().join("sample.log");
    fs::write(&input_path, input).unwrap();

    let generated = NaiveDate::from_ymd_opt(2030, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    ConverterConfig::new(input_path, dir.path().join("parsed.log"))
        .with_channels(channels)
        .with_generated_at(generated)
}

fn read_output(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

fn data_lines(text: &str) -> Vec<&str> {
    text.splitn(4, '\n').nth(3).map(|body| {
        if body.is_empty() { Vec::new() } else { body.split('\n').collect() }
    }).unwrap_or_default()
}

#[test]
fn test_file_roundtrip_full_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input: Vec<u8> = (0..30i16).flat_map(|v| v.to_be_bytes()).collect();
    let config = fixed_config(&dir, &input, DEFAULT_CHANNELS);

    let summary = convert_files(&config).unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.samples, 30);
    assert!(!summary.is_truncated());

    let text = read_output(&config.output);
    assert!(text.starts_with("EV Logger Parsed Log\nGenerated: Tue Jan  1 00:00:00 2030\n\n"));

    let lines = data_lines(&text);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "0000,0100,0200,0300,0400,0500,0600,0700,0800,0900");
    assert_eq!(lines[2].split(',').count(), DEFAULT_CHANNELS);
    assert!(!text.ends_with('\n'));
}

#[test]
fn test_file_truncated_input() {
    let dir = tempfile::tempdir().unwrap();
    // One full row of 4, then 3 samples and a dangling byte
    let mut input: Vec<u8> = (1..=7i16).flat_map(|v| v.to_be_bytes()).collect();
    input.push(0xAA);
    let config = fixed_config(&dir, &input, 4);

    let summary = convert_files(&config).unwrap();
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.full_rows(), 1);
    assert_eq!(summary.partial_row_len, Some(3));
    assert_eq!(summary.dangling_bytes, 1);

    let text = read_output(&config.output);
    assert_eq!(data_lines(&text), vec!["0100,0200,0300,0400", "0500,0600,0700"]);
}

#[test]
fn test_file_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixed_config(&dir, &[], DEFAULT_CHANNELS);

    let summary = convert_files(&config).unwrap();
    assert_eq!(summary.rows, 0);

    let text = read_output(&config.output);
    assert_eq!(text, "EV Logger Parsed Log\nGenerated: Tue Jan  1 00:00:00 2030\n\n");
}

#[test]
fn test_output_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixed_config(&dir, &[0x00, 0x01], 1);
    fs::write(&config.output, "stale contents that are much longer than the new log body").unwrap();

    convert_files(&config).unwrap();
    assert!(read_output(&config.output).ends_with("\n\n0100"));
}

#[test]
fn test_missing_input_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConverterConfig::new(dir.path().join("absent.log"), dir.path().join("parsed.log"));

    match convert_files(&config) {
        Err(EvlogError::OpenInput { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected OpenInput error, got {:?}", other),
    }
    assert!(!config.output.exists());
}

#[test]
fn test_zero_channels_rejected_before_io() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixed_config(&dir, &[0x00, 0x01], 0);

    assert!(matches!(
        convert_files(&config),
        Err(EvlogError::InvalidChannelCount(0))
    ));
    assert!(!config.output.exists());
}

#[test]
fn test_huge_channel_count_on_tiny_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixed_config(&dir, &[0x00, 0x01], usize::MAX / 4);
    assert!(config.validate().is_ok());

    let summary = convert_files(&config).unwrap();
    assert_eq!(summary.rows, 1);
    assert_eq!(summary.partial_row_len, Some(1));
    assert!(read_output(&config.output).ends_with("\n\n0100"));
}

#[test]
fn test_custom_title() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixed_config(&dir, &[0x12, 0x34], 1).with_title("Bench Rig 2");

    convert_files(&config).unwrap();
    let text = read_output(&config.output);
    assert!(text.starts_with("Bench Rig 2\nGenerated: "));
    assert!(text.ends_with("\n\n3412"));
}

#[cfg(feature = "mmap")]
#[test]
fn test_mmap_matches_buffered() {
    let dir = tempfile::tempdir().unwrap();
    let input: Vec<u8> = (0..25i16).flat_map(|v| (v * 257).to_be_bytes()).collect();
    let config = fixed_config(&dir, &input, 10);

    convert_files(&config).unwrap();
    let buffered = read_output(&config.output);

    let mapped_config = config.clone();
    convert_files_mmap(&mapped_config).unwrap();
    assert_eq!(read_output(&mapped_config.output), buffered);
}
