//! Contract tests for the %-directive formatter.

use chrono::{Local, TimeZone};
use taglog::{DEFAULT_FORMAT, Level, LogRecord, format_record};

fn sample_record() -> LogRecord {
    LogRecord {
        level: Level::Warning,
        created: Local.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap(),
        source: "src/net/client.rs:42".to_string(),
        message: "connection reset".to_string(),
    }
}

#[test]
fn nil_record_is_blank_line() {
    assert_eq!(format_record(DEFAULT_FORMAT, None), "\n");
}

#[test]
fn empty_template_is_empty() {
    assert_eq!(format_record("", Some(&sample_record())), "");
}

#[test]
fn output_ends_with_exactly_one_newline() {
    let line = format_record("%M", Some(&sample_record()));
    assert_eq!(line, "connection reset\n");
}

#[test]
fn default_format_shape() {
    let line = format_record(DEFAULT_FORMAT, Some(&sample_record()));
    assert!(line.starts_with("[2024/03/05 14:30:09.000"), "got: {line}");
    assert!(line.contains("[WARN]"), "got: {line}");
    assert!(line.ends_with("(src/net/client.rs:42) connection reset\n"));
}

#[test]
fn date_and_time_directives() {
    let rec = sample_record();
    assert_eq!(format_record("%D", Some(&rec)), "2024/03/05\n");
    assert_eq!(format_record("%d", Some(&rec)), "03/05/24\n");
    assert_eq!(format_record("%t", Some(&rec)), "14:30\n");
    assert!(format_record("%T", Some(&rec)).starts_with("14:30:09.000 "));
}

#[test]
fn source_directives() {
    let rec = sample_record();
    assert_eq!(format_record("%S", Some(&rec)), "src/net/client.rs:42\n");
    assert_eq!(format_record("%s", Some(&rec)), "client.rs:42\n");
    assert_eq!(format_record("%f", Some(&rec)), "rs:42\n");
}

#[test]
fn level_codes_are_four_chars() {
    for level in Level::all() {
        let rec = LogRecord {
            level,
            ..sample_record()
        };
        let line = format_record("%L", Some(&rec));
        assert_eq!(line.trim_end().len(), 4, "level {level}");
    }
}

#[test]
fn newline_directive() {
    assert_eq!(format_record("a%Bb", Some(&sample_record())), "a\nb\n");
}

#[test]
fn unknown_directive_passes_through_literally() {
    let line = format_record("x %q y", Some(&sample_record()));
    assert_eq!(line, "x q y\n");
    assert!(!line.contains('%'));
}

#[test]
fn trailing_percent_is_dropped() {
    assert_eq!(format_record("abc%", Some(&sample_record())), "abc\n");
}

#[test]
fn literal_text_around_directives_survives() {
    let line = format_record("lvl=%L!", Some(&sample_record()));
    assert_eq!(line, "lvl=WARN!\n");
}
