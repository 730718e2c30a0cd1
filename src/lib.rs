#![forbid(unsafe_code)]

//! `taglog` - Tag-routed logging with buffered, rotating file writers.
//!
//! A logging library built around a writer registry:
//! - Two writer backends (console, rotating file), each fed by a bounded
//!   queue and drained by its own background thread
//! - Tag-based routing with private writers that exclusively own a tag
//! - Size / line-count / daily file rotation with background expiry
//! - Declarative TOML configuration
//! - An accumulating log-line builder ([`LogBuffer`]) that chains safely
//!   even when absent
//!
//! # Example
//!
//! ```
//! use taglog::{Level, Logger};
//!
//! let logger = Logger::new(Level::Debug);
//!
//! logger.info("application started");
//! logger.debug_tag("net", "connecting to server...");
//! let err = logger.warn("connection timeout");
//!
//! // Blocks until every queued record has been written.
//! logger.close();
//! # let _ = err;
//! ```

pub mod buffer;
pub mod config;
mod diag;
pub mod error;
pub mod fmt;
pub mod level;
pub mod logger;
mod macros;
pub mod record;
pub mod writer;

// Re-exports for convenience
pub use buffer::{Item, LogBuffer};
pub use config::Config;
pub use error::Error;
pub use fmt::{DEFAULT_FORMAT, format_record};
pub use level::Level;
pub use logger::{LogMessage, Logger};
pub use record::LogRecord;
pub use writer::{ConsoleWriter, FileOptions, FileWriter, LogWriter};
