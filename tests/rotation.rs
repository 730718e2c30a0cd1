//! Rotation predicate, rotated-file naming, counter reset.

use chrono::Local;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use taglog::{FileOptions, FileWriter, Level, LogRecord, LogWriter};
use tempfile::TempDir;

fn spawn_rotating(path: &Path, max_lines: u64) -> Box<dyn LogWriter> {
    let writer = FileWriter::spawn(
        "rot",
        Level::Debug,
        FileOptions {
            filename: path.to_string_lossy().into_owned(),
            format: "%M".to_string(),
            rotate: true,
            max_lines,
            ..FileOptions::default()
        },
    )
    .unwrap();
    Box::new(writer)
}

fn record(msg: &str) -> Option<Arc<LogRecord>> {
    Some(Arc::new(LogRecord::new(Level::Info, "test:1", msg)))
}

fn line_count(path: &Path) -> usize {
    fs::read_to_string(path).unwrap().lines().count()
}

#[test]
fn max_lines_plus_one_records_rotate_exactly_once() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let writer = spawn_rotating(&path, 3);

    for i in 0..4 {
        writer.enqueue(record(&format!("line{i}")));
    }
    writer.close();

    let ymd = Local::now().format("%Y%m%d").to_string();
    let rotated = tmp.path().join(format!("app.log.{ymd}"));

    assert!(rotated.exists(), "rotated file missing");
    assert_eq!(line_count(&rotated), 3);
    // Fresh file, fresh counters: only the record that triggered rotation.
    assert_eq!(line_count(&path), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "line3\n");
}

#[test]
fn max_size_byte_threshold_rotates_exactly_once() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let writer = FileWriter::spawn(
        "rot",
        Level::Debug,
        FileOptions {
            filename: path.to_string_lossy().into_owned(),
            format: "%M".to_string(),
            rotate: true,
            max_size: 10,
            ..FileOptions::default()
        },
    )
    .unwrap();
    let writer: Box<dyn LogWriter> = Box::new(writer);

    // Each line renders as 10 message bytes plus the newline, crossing the
    // 10-byte threshold after the first write.
    writer.enqueue(record("aaaaaaaaaa"));
    writer.enqueue(record("bbbbbbbbbb"));
    writer.close();

    let ymd = Local::now().format("%Y%m%d").to_string();
    let rotated = tmp.path().join(format!("app.log.{ymd}"));

    assert!(rotated.exists(), "rotated file missing");
    assert_eq!(fs::read_to_string(&rotated).unwrap(), "aaaaaaaaaa\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "bbbbbbbbbb\n");
}

#[test]
fn same_day_rotations_get_numbered_suffixes() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let ymd = Local::now().format("%Y%m%d").to_string();
    // Occupy the unnumbered stamp so rotation must probe for a free name.
    fs::write(tmp.path().join(format!("app.log.{ymd}")), "taken\n").unwrap();

    let writer = spawn_rotating(&path, 2);
    for i in 0..3 {
        writer.enqueue(record(&format!("r{i}")));
    }
    writer.close();

    let numbered = tmp.path().join(format!("app.log.{ymd}-001"));
    assert!(numbered.exists(), "numbered rotation missing");
    assert_eq!(line_count(&numbered), 2);
}

#[test]
fn counters_reset_allows_repeated_rotation() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let writer = spawn_rotating(&path, 2);

    for i in 0..5 {
        writer.enqueue(record(&format!("n{i}")));
    }
    writer.close();

    let ymd = Local::now().format("%Y%m%d").to_string();
    let first = tmp.path().join(format!("app.log.{ymd}"));
    let second = tmp.path().join(format!("app.log.{ymd}-001"));

    assert_eq!(line_count(&first), 2);
    assert_eq!(line_count(&second), 2);
    assert_eq!(line_count(&path), 1);
}

#[test]
fn no_rotation_without_rotate_flag() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let writer = FileWriter::spawn(
        "plain",
        Level::Debug,
        FileOptions {
            filename: path.to_string_lossy().into_owned(),
            format: "%M".to_string(),
            rotate: false,
            max_lines: 2,
            ..FileOptions::default()
        },
    )
    .unwrap();
    let writer: Box<dyn LogWriter> = Box::new(writer);

    for i in 0..5 {
        writer.enqueue(record(&format!("k{i}")));
    }
    writer.close();

    assert_eq!(line_count(&path), 5);
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[test]
fn writer_creation_fails_on_unwritable_directory() {
    let result = FileWriter::spawn(
        "bad",
        Level::Debug,
        FileOptions {
            filename: "/proc/taglog-no-such-dir/app.log".to_string(),
            ..FileOptions::default()
        },
    );
    assert!(result.is_err());
}
