//! The library's own diagnostic stream.
//!
//! Writer lifecycle events and recovered I/O failures are reported here,
//! never through the record pipeline itself, so a broken disk backend can
//! not feed errors back into the very writers that are failing.

use chrono::Local;

/// Lifecycle notices go to stdout.
pub(crate) fn info(args: std::fmt::Arguments<'_>) {
    println!(
        "[{}] [INFO] [taglog] {args}",
        Local::now().format("%Y/%m/%d %H:%M:%S")
    );
}

/// Recovered failures go to stderr.
pub(crate) fn error(args: std::fmt::Arguments<'_>) {
    eprintln!(
        "[{}] [ERROR] [taglog] {args}",
        Local::now().format("%Y/%m/%d %H:%M:%S")
    );
}
