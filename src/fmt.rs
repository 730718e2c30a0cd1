//! Pure rendering of a [`LogRecord`] through a `%`-directive template.
//!
//! Runs once per record per writer, so it builds a single pre-sized `String`
//! and writes timestamp fragments straight into it.

use crate::record::LogRecord;
use std::fmt::Write;

/// Template applied when a writer or the dispatch fallback has no explicit format.
pub const DEFAULT_FORMAT: &str = "[%D %T] [%L] (%S) %M";

/// Renders `record` through `template`.
///
/// Contract: a `None` record yields exactly `"\n"` (a blank line); an empty
/// template yields `""`; every other output ends with exactly one trailing
/// newline. Directive bytes outside the recognized set pass through literally
/// (the `%` itself is consumed).
///
/// Directives: `%D` `yyyy/mm/dd`, `%d` `mm/dd/yy`, `%T` `hh:mm:ss.mmm ZONE`,
/// `%t` `hh:mm`, `%L` 4-char level code, `%S` full source, `%s` short source,
/// `%f` function segment of the short source, `%M` message, `%B` newline.
#[must_use]
pub fn format_record(template: &str, record: Option<&LogRecord>) -> String {
    let Some(rec) = record else {
        return "\n".to_string();
    };
    if template.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(template.len() + rec.message.len() + 48);

    let mut pieces = template.split('%');
    if let Some(head) = pieces.next() {
        out.push_str(head);
    }

    for piece in pieces {
        let mut chars = piece.chars();
        match chars.next() {
            Some('D') => {
                let _ = write!(out, "{}", rec.created.format("%Y/%m/%d"));
            }
            Some('d') => {
                let _ = write!(out, "{}", rec.created.format("%m/%d/%y"));
            }
            Some('T') => {
                let _ = write!(out, "{}", rec.created.format("%H:%M:%S%.3f %Z"));
            }
            Some('t') => {
                let _ = write!(out, "{}", rec.created.format("%H:%M"));
            }
            Some('L') => out.push_str(rec.level.as_code()),
            Some('S') => out.push_str(&rec.source),
            Some('s') => out.push_str(short_source(&rec.source)),
            Some('f') => out.push_str(func_name(&rec.source)),
            Some('M') => out.push_str(&rec.message),
            Some('B') => out.push('\n'),
            Some(other) => out.push(other),
            None => {}
        }
        out.push_str(chars.as_str());
    }

    out.push('\n');
    out
}

/// Last path segment of the source, e.g. `src/net/client.rs:40` -> `client.rs:40`.
fn short_source(source: &str) -> &str {
    source.rsplit('/').next().unwrap_or(source)
}

/// Last dot-separated segment of the short source.
fn func_name(source: &str) -> &str {
    let short = short_source(source);
    short.rsplit('.').next().unwrap_or(short)
}
