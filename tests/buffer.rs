//! LogBuffer accumulation, metadata, and absent no-op laws.

use taglog::{Item, Level, LogBuffer};

#[test]
fn absent_buffer_mutations_are_noops() {
    let buf = LogBuffer::absent()
        .append("text")
        .append(42i64)
        .append_fmt(format_args!("{}", 7))
        .append_millis(2500)
        .insert(0, "x")
        .delete(-1, 1)
        .wrap()
        .separator(", ")
        .with_level(Level::Error)
        .with_stack(true)
        .with_source("here:1")
        .with_tag("t")
        .set_flag("seen", true);

    assert!(!buf.is_present());
    assert!(buf.is_empty());
    assert_eq!(buf.level(), Level::Info);
    assert!(!buf.print_stack());
    assert!(!buf.has_flag("seen"));
    assert!(buf.to_error().is_none());
    assert_eq!(buf.to_string(), "");
}

#[test]
fn append_typed_items() {
    let buf = LogBuffer::new()
        .append("req=")
        .append(42i64)
        .append(" ok=")
        .append(true)
        .append(&b"!"[..]);
    assert_eq!(buf.to_string(), "req=42 ok=true!");
}

#[test]
fn append_error_item() {
    let io_err = std::io::Error::other("disk full");
    let buf = LogBuffer::new().append(Item::error(&io_err));
    assert_eq!(buf.to_string(), "disk full");
}

#[test]
fn append_fmt_renders_arguments() {
    let buf = LogBuffer::new().append_fmt(format_args!("{} of {}", 3, 10));
    assert_eq!(buf.to_string(), "3 of 10");
}

#[test]
fn millis_rendering() {
    assert_eq!(LogBuffer::new().append_millis(999).to_string(), "999ms");
    assert_eq!(LogBuffer::new().append_millis(1000).to_string(), "1s");
    assert_eq!(LogBuffer::new().append_millis(2500).to_string(), "2.500s");
}

#[test]
fn nested_buffer_propagates_level_upward() {
    let child = LogBuffer::new().append("inner failed").with_level(Level::Error);
    let parent = LogBuffer::new().append("outer: ").append(child);
    assert_eq!(parent.to_string(), "outer: inner failed");
    assert_eq!(parent.level(), Level::Error);
    assert!(parent.is_error());
}

#[test]
fn nested_buffer_never_lowers_level() {
    let child = LogBuffer::new().append("fine").with_level(Level::Debug);
    let parent = LogBuffer::new().with_level(Level::Warning).append(child);
    assert_eq!(parent.level(), Level::Warning);
}

#[test]
fn insert_at_offset() {
    let buf = LogBuffer::new().append("ac").insert(1, "b");
    assert_eq!(buf.to_string(), "abc");
}

#[test]
fn insert_at_start_and_end() {
    let buf = LogBuffer::new().append("mid").insert(0, ">").insert(4, "<");
    assert_eq!(buf.to_string(), ">mid<");
}

#[test]
fn delete_with_negative_offset_counts_from_end() {
    let buf = LogBuffer::new().append("hello").delete(-2, 2);
    assert_eq!(buf.to_string(), "hel");
}

#[test]
fn delete_from_front() {
    let buf = LogBuffer::new().append("hello").delete(0, 2);
    assert_eq!(buf.to_string(), "llo");
}

#[test]
fn separator_only_when_nonempty() {
    let buf = LogBuffer::new().separator(", ").append("a").separator(", ");
    assert_eq!(buf.to_string(), "a, ");
}

#[test]
fn wrap_appends_newline() {
    let buf = LogBuffer::new().append("line").wrap();
    assert_eq!(buf.to_string(), "line\n");
}

#[test]
fn to_error_carries_text() {
    let buf = LogBuffer::new().append("boom");
    let err = buf.to_error().unwrap();
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn flags_round_trip() {
    let buf = LogBuffer::new().set_flag("retried", true).set_flag("cached", false);
    assert!(buf.has_flag("retried"));
    assert!(!buf.has_flag("cached"));
    assert!(!buf.has_flag("unset"));
}

#[test]
fn byte_access() {
    let buf = LogBuffer::new().append("xyz");
    assert_eq!(buf.byte_at(0), Some(b'x'));
    assert_eq!(buf.byte_at(3), None);
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.as_bytes(), b"xyz");
}

#[test]
fn default_level_is_info() {
    assert_eq!(LogBuffer::new().level(), Level::Info);
    assert!(!LogBuffer::new().is_error());
}
