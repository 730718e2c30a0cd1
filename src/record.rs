//! The immutable value produced per log call.

use crate::level::Level;
use chrono::{DateTime, Local};

/// One log event, fully rendered. Writers share it read-only and must copy
/// anything they need to retain past consumption.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Severity of the event.
    pub level: Level,
    /// Creation time, sub-second precision, local zone.
    pub created: DateTime<Local>,
    /// Caller location, `file:line` (or whatever a deferred producer supplied).
    pub source: String,
    /// Message text with all arguments already substituted.
    pub message: String,
}

impl LogRecord {
    /// Stamps the record with the current local time.
    #[must_use]
    pub fn new(level: Level, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            created: Local::now(),
            source: source.into(),
            message: message.into(),
        }
    }
}
