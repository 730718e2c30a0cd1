//! Unbuffered passthrough writer: the consumer thread renders each record to
//! standard output.

use super::{LogWriter, QUEUE_CAPACITY};
use crate::diag;
use crate::fmt::{DEFAULT_FORMAT, format_record};
use crate::level::Level;
use crate::record::LogRecord;
use crossbeam_channel::{Receiver, Sender, bounded};
use std::io::Write;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Console writer. Never private.
pub struct ConsoleWriter {
    level: Level,
    tx: Sender<Option<Arc<LogRecord>>>,
    handle: JoinHandle<()>,
}

impl ConsoleWriter {
    /// Spawns a console writer with the default line format.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self::with_format(level, DEFAULT_FORMAT)
    }

    /// Spawns a console writer with an explicit line format.
    #[must_use]
    pub fn with_format(level: Level, format: impl Into<String>) -> Self {
        let format = format.into();
        let (tx, rx) = bounded(QUEUE_CAPACITY);
        let handle = std::thread::spawn(move || run(&format, &rx));
        Self { level, tx, handle }
    }
}

fn run(format: &str, rx: &Receiver<Option<Arc<LogRecord>>>) {
    let stdout = std::io::stdout();
    for record in rx {
        let line = format_record(format, record.as_deref());
        let mut out = stdout.lock();
        if let Err(e) = out.write_all(line.as_bytes()) {
            diag::error(format_args!("console writer: stdout write failed: {e}"));
        }
    }
}

impl LogWriter for ConsoleWriter {
    fn enqueue(&self, record: Option<Arc<LogRecord>>) {
        if self.tx.send(record).is_err() {
            diag::error(format_args!("console writer: consumer gone, record dropped"));
        }
    }

    fn close(self: Box<Self>) {
        let Self { tx, handle, .. } = *self;
        // Dropping the sender closes the queue; join waits for the drain.
        drop(tx);
        if handle.join().is_err() {
            diag::error(format_args!("console writer: consumer thread panicked"));
        }
    }

    fn level(&self) -> Level {
        self.level
    }

    fn is_private(&self) -> bool {
        false
    }
}
