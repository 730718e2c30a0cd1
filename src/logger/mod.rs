//! The writer registry and its dispatch rules.
//!
//! One `Logger` owns every registered writer behind a tag → writer map. Call
//! sites hold the `Logger` (usually in an `Arc`) explicitly; there is no
//! ambient global. Dispatch only ever takes the shared read path, so
//! concurrent logging never blocks on other logging, only on structural
//! changes (config load, registration, close).

mod from_config;
mod message;

pub use from_config::file_options_from_properties;
pub use message::LogMessage;

use crate::buffer::LogBuffer;
use crate::error::Error;
use crate::fmt::{DEFAULT_FORMAT, format_record};
use crate::level::Level;
use crate::record::LogRecord;
use crate::writer::{ConsoleWriter, FileOptions, FileWriter, LogWriter};
use parking_lot::RwLock;
use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Tag under which the default console writer registers.
pub const CONSOLE_TAG: &str = "stdout";

struct Inner {
    writers: HashMap<String, Box<dyn LogWriter>>,
    /// Directory of the first file writer seen at config load.
    log_file_dir: Option<PathBuf>,
}

/// The registry: owns all writers, routes every record.
pub struct Logger {
    inner: RwLock<Inner>,
}

impl Logger {
    /// A fresh registry seeded with one console writer at `level` under the
    /// `stdout` tag, matching what an unconfigured process should produce.
    #[must_use]
    pub fn new(level: Level) -> Self {
        let mut writers: HashMap<String, Box<dyn LogWriter>> = HashMap::new();
        writers.insert(CONSOLE_TAG.to_string(), Box::new(ConsoleWriter::new(level)));
        Self {
            inner: RwLock::new(Inner {
                writers,
                log_file_dir: None,
            }),
        }
    }

    /// Flushes and removes every writer. Blocks until each consumer thread
    /// has drained its queue.
    pub fn close(&self) {
        let mut inner = self.inner.write();
        for (_, writer) in inner.writers.drain() {
            writer.close();
        }
    }

    /// Flushes and removes the writer owning `tag`, if any.
    pub fn close_by_tag(&self, tag: &str) {
        let mut inner = self.inner.write();
        if let Some(writer) = inner.writers.remove(tag) {
            writer.close();
        }
    }

    /// Idempotent runtime registration of a file writer: `Ok` when the tag
    /// is already taken or the writer was created; creation failure is
    /// recoverable here, unlike at config load.
    ///
    /// # Errors
    /// [`Error::WriterCreate`] when the log file cannot be opened.
    pub fn add_file_logger_if_absent(
        &self,
        tag: &str,
        level: Level,
        options: FileOptions,
    ) -> Result<(), Error> {
        let mut inner = self.inner.write();
        if inner.writers.contains_key(tag) {
            return Ok(());
        }
        let writer = FileWriter::spawn(tag, level, options)?;
        inner.writers.insert(tag.to_string(), Box::new(writer));
        Ok(())
    }

    /// Directory of the first file writer registered by the last
    /// configuration load, if any.
    #[must_use]
    pub fn log_file_dir(&self) -> Option<PathBuf> {
        self.inner.read().log_file_dir.clone()
    }

    /// Number of registered writers.
    #[must_use]
    pub fn writer_count(&self) -> usize {
        self.inner.read().writers.len()
    }

    // --- level-scoped entry points -------------------------------------

    /// Logs at Debug with no routing tag.
    #[track_caller]
    pub fn debug(&self, msg: impl LogMessage) {
        self.emit_message(Level::Debug, false, "", msg);
    }

    /// Logs at Debug, routed to `tag`.
    #[track_caller]
    pub fn debug_tag(&self, tag: &str, msg: impl LogMessage) {
        self.emit_message(Level::Debug, false, tag, msg);
    }

    /// Logs at Info with no routing tag.
    #[track_caller]
    pub fn info(&self, msg: impl LogMessage) {
        self.emit_message(Level::Info, false, "", msg);
    }

    /// Logs at Info, routed to `tag`.
    #[track_caller]
    pub fn info_tag(&self, tag: &str, msg: impl LogMessage) {
        self.emit_message(Level::Info, false, tag, msg);
    }

    /// Logs at Warning and hands the same text back as an error value, for
    /// callers who propagate it as their own failure.
    #[track_caller]
    pub fn warn(&self, msg: impl LogMessage) -> Error {
        self.emit_message_err(Level::Warning, false, "", msg)
    }

    /// Logs at Warning routed to `tag`, returning the message as an error value.
    #[track_caller]
    pub fn warn_tag(&self, tag: &str, msg: impl LogMessage) -> Error {
        self.emit_message_err(Level::Warning, false, tag, msg)
    }

    /// Logs at Error, returning the message as an error value.
    #[track_caller]
    pub fn error(&self, msg: impl LogMessage) -> Error {
        self.emit_message_err(Level::Error, false, "", msg)
    }

    /// Logs at Error routed to `tag`, returning the message as an error value.
    #[track_caller]
    pub fn error_tag(&self, tag: &str, msg: impl LogMessage) -> Error {
        self.emit_message_err(Level::Error, false, tag, msg)
    }

    /// Logs at Error with a captured backtrace appended to the message.
    #[track_caller]
    pub fn error_stack(&self, msg: impl LogMessage) -> Error {
        self.emit_message_err(Level::Error, true, "", msg)
    }

    /// Logs at Error with a backtrace, routed to `tag`.
    #[track_caller]
    pub fn error_tag_stack(&self, tag: &str, msg: impl LogMessage) -> Error {
        self.emit_message_err(Level::Error, true, tag, msg)
    }

    /// Dispatches a blank line (a `None` record) at `level` through the
    /// normal routing rules.
    pub fn empty_line(&self, level: Level, tag: &str) {
        self.dispatch(level, tag, None);
    }

    // --- buffer flush ---------------------------------------------------

    /// Consumes an accumulated [`LogBuffer`]: severity, stack request,
    /// source override, and routing tag all come from the buffer's metadata.
    /// A backtrace is captured only for error-level flushes that asked for
    /// one. Absent buffers flush as an empty Info line.
    #[track_caller]
    pub fn log_buffer(&self, buffer: LogBuffer) {
        let level = buffer.level();
        let with_stack = level == Level::Error && buffer.print_stack();
        // Direct call keeps #[track_caller] pointing at the user's call site.
        let source = match buffer.source() {
            Some(s) => s.to_string(),
            None => caller_source(),
        };
        let tag = buffer.tag().unwrap_or("").to_string();
        self.emit(level, with_stack, &tag, source, buffer.to_string());
    }

    /// Flushes the buffer only when its effective severity is Error;
    /// happy-path buffers are discarded without rendering.
    #[track_caller]
    pub fn log_buffer_if_error(&self, buffer: LogBuffer) {
        if buffer.is_error() {
            self.log_buffer(buffer);
        }
    }

    // --- internals --------------------------------------------------------

    #[track_caller]
    fn emit_message(&self, level: Level, with_stack: bool, tag: &str, msg: impl LogMessage) {
        let default_source = caller_source();
        let (message, source) = msg.resolve();
        self.emit(
            level,
            with_stack,
            tag,
            source.unwrap_or(default_source),
            message,
        );
    }

    #[track_caller]
    fn emit_message_err(
        &self,
        level: Level,
        with_stack: bool,
        tag: &str,
        msg: impl LogMessage,
    ) -> Error {
        let default_source = caller_source();
        let (message, source) = msg.resolve();
        let err = Error::Message(message.clone());
        self.emit(
            level,
            with_stack,
            tag,
            source.unwrap_or(default_source),
            message,
        );
        err
    }

    fn emit(&self, level: Level, with_stack: bool, tag: &str, source: String, mut message: String) {
        if with_stack {
            message.push('\n');
            message.push_str(&Backtrace::force_capture().to_string());
        }
        let record = LogRecord::new(level, source, message);
        self.dispatch(level, tag, Some(record));
    }

    /// Routing rules, in order:
    /// 1. a non-empty tag owned by a private writer fully owns the record:
    ///    delivered there when the threshold is met, dropped otherwise;
    /// 2. every non-private writer with a satisfied threshold gets one copy
    ///    (an explicit tag without a private owner falls through to here);
    /// 3. when nobody received it, the record is rendered with the default
    ///    format to stdout (Info and below) or stderr, so output is never
    ///    silently lost.
    fn dispatch(&self, level: Level, tag: &str, record: Option<LogRecord>) {
        let record = record.map(Arc::new);
        let inner = self.inner.read();

        if !tag.is_empty()
            && let Some(writer) = inner.writers.get(tag)
            && writer.is_private()
        {
            if level >= writer.level() {
                writer.enqueue(record);
            }
            return;
        }

        let mut delivered = false;
        for writer in inner.writers.values() {
            if level >= writer.level() && !writer.is_private() {
                writer.enqueue(record.clone());
                delivered = true;
            }
        }

        if !delivered {
            let line = format_record(DEFAULT_FORMAT, record.as_deref());
            if level <= Level::Info {
                print!("{line}");
            } else {
                eprint!("{line}");
            }
        }
    }
}

impl Default for Logger {
    /// Debug threshold, so an unconfigured registry shows everything.
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

#[track_caller]
fn caller_source() -> String {
    let location = std::panic::Location::caller();
    format!("{}:{}", location.file(), location.line())
}
