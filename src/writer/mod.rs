//! Writer backends: a closed set of two variants (console, file) behind one
//! capability trait, each running its own background consumer thread.

mod console;
pub mod expire;
mod file;

pub use console::ConsoleWriter;
pub use file::{FileOptions, FileWriter};

use crate::level::Level;
use crate::record::LogRecord;
use std::sync::Arc;

/// Per-writer queue capacity. Bounded so a wedged consumer applies
/// backpressure instead of growing without limit.
pub const QUEUE_CAPACITY: usize = 32;

/// Capability set every writer variant supports. `Send + Sync` so the
/// registry can dispatch from any thread under a shared read lock.
pub trait LogWriter: Send + Sync {
    /// Queues a record for the writer's consumer thread. `None` is a blank
    /// line. FIFO per writer; blocks only when the bounded queue is full.
    fn enqueue(&self, record: Option<Arc<LogRecord>>);

    /// Closes the input queue, then blocks until the consumer has drained
    /// every buffered record and released its backing resources. Final-flush
    /// I/O failures are reported on the diagnostic stream, never returned.
    fn close(self: Box<Self>);

    /// Threshold below which records are not delivered to this writer.
    fn level(&self) -> Level;

    /// A private writer exclusively owns its tag's traffic and is excluded
    /// from the default broadcast.
    fn is_private(&self) -> bool;
}
