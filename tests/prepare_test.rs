//! Encode-side pipeline over real files.

mod common;

use pretty_assertions::assert_eq;
use std::io::Cursor;

use common::fixtures::{self, HEIGHT, WIDTH};
use eink_quant::wire;
use eink_quant::DitherMode;
use inkframe::error::PrepareError;
use inkframe::models::AppConfig;
use inkframe::services::{write_artifact, PreparePipeline};

fn pipeline(config: &AppConfig) -> PreparePipeline {
    PreparePipeline::from_config(config).unwrap()
}

#[test]
fn test_prepare_and_write_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixtures::write_gradient_photo(dir.path(), 64, 40);
    let output = dir.path().join("image_data.dat");
    let config = fixtures::test_config();

    let frame = pipeline(&config).prepare_file(&photo).unwrap();
    write_artifact(&output, &frame.bytes).unwrap();

    let written = std::fs::read(&output).unwrap();
    assert_eq!(written.len(), (WIDTH * HEIGHT) as usize);
    assert_eq!(written, frame.bytes);

    let decoded = wire::decode(&written, &config.frame_format().unwrap()).unwrap();
    assert_eq!(decoded, frame.indices);
}

#[test]
fn test_prepare_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixtures::write_gradient_photo(dir.path(), 33, 17);
    let config = fixtures::test_config();

    let first = pipeline(&config).prepare_file(&photo).unwrap();
    let second = pipeline(&config).prepare_file(&photo).unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_missing_source_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("image_data.dat");
    let config = fixtures::test_config();

    let result = pipeline(&config)
        .prepare_file(&dir.path().join("missing.jpg"))
        .and_then(|frame| write_artifact(&output, &frame.bytes));

    assert!(matches!(result, Err(PrepareError::SourceMissing(_))));
    assert!(!output.exists());
}

#[test]
fn test_corrupt_source_is_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let broken = fixtures::write_corrupt_photo(dir.path());

    let err = pipeline(&fixtures::test_config())
        .prepare_file(&broken)
        .unwrap_err();
    assert!(matches!(err, PrepareError::SourceCorrupt { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_failed_write_keeps_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("image_data.dat");
    std::fs::write(&output, b"previous").unwrap();

    // a directory in the way of the temporary file makes the write fail
    let blocker = dir
        .path()
        .join(format!("image_data.dat.{}.tmp", std::process::id()));
    std::fs::create_dir(&blocker).unwrap();

    let result = write_artifact(&output, &[1, 2, 3]);
    assert!(matches!(result, Err(PrepareError::Io(_))));
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[test]
fn test_write_replaces_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("image_data.dat");
    std::fs::write(&output, b"previous").unwrap();

    write_artifact(&output, &[7, 7, 7]).unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), vec![7, 7, 7]);
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("image_data.dat")]);
}

#[test]
fn test_write_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("no/such/dir/image_data.dat");

    assert!(matches!(
        write_artifact(&output, &[1]),
        Err(PrepareError::Io(_))
    ));
    assert!(!output.exists());
}

#[test]
fn test_exact_resolution_solid_color() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixtures::write_solid_photo(dir.path(), WIDTH, HEIGHT, [0, 0, 255]);

    let frame = pipeline(&fixtures::test_config())
        .prepare_file(&photo)
        .unwrap();
    assert!(frame.bytes.iter().all(|&b| b == 3));
}

#[test]
fn test_no_dither_maps_mid_gray_to_gray_pen() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixtures::write_solid_photo(dir.path(), 20, 10, [120, 130, 125]);
    let mut config = fixtures::test_config();
    config.prepare.dither = DitherMode::None;

    let frame = pipeline(&config).prepare_file(&photo).unwrap();
    assert!(frame.bytes.iter().all(|&b| b == 7));
}

#[test]
fn test_brightness_changes_result() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixtures::write_solid_photo(dir.path(), WIDTH, HEIGHT, [100, 100, 100]);
    let mut config = fixtures::test_config();
    config.prepare.dither = DitherMode::None;

    let plain = pipeline(&config).prepare_file(&photo).unwrap();
    assert!(plain.bytes.iter().all(|&b| b == 7));

    // 100 * 2.6 = 255 after clamping
    config.prepare.brightness = 2.6;
    let bright = pipeline(&config).prepare_file(&photo).unwrap();
    assert!(bright.bytes.iter().all(|&b| b == 1));
}

#[test]
fn test_preview_matches_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixtures::write_gradient_photo(dir.path(), 48, 24);
    let config = fixtures::test_config();
    let pipeline = pipeline(&config);

    let frame = pipeline.prepare_file(&photo).unwrap();
    let png_bytes = pipeline.preview_png(&frame).unwrap();

    let mut decoder = png::Decoder::new(Cursor::new(png_bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!(info.bit_depth, png::BitDepth::Four);

    // unpack two 4-bit pixels per byte, row by row
    let row_bytes = info.line_size;
    let mut unpacked = Vec::new();
    for row in buf[..row_bytes * HEIGHT as usize].chunks(row_bytes) {
        for x in 0..WIDTH as usize {
            let byte = row[x / 2];
            unpacked.push(if x % 2 == 0 { byte >> 4 } else { byte & 0x0F });
        }
    }
    assert_eq!(unpacked, frame.bytes);
}
