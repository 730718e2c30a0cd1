//! What the level-scoped entry points accept: plain text, or a deferred
//! producer that supplies both the message and its source location.

/// Message input for the logging entry points.
///
/// Implemented for `&str`/`String` (source comes from the call site via
/// `#[track_caller]`) and for `FnOnce() -> (String, String)` producers
/// returning `(message, source)`. Producers are resolved eagerly at the
/// entry point; the message is computed whether or not any writer ends up
/// receiving it.
pub trait LogMessage {
    /// Resolves to the message text and an optional source override.
    fn resolve(self) -> (String, Option<String>);
}

impl LogMessage for &str {
    fn resolve(self) -> (String, Option<String>) {
        (self.to_string(), None)
    }
}

impl LogMessage for String {
    fn resolve(self) -> (String, Option<String>) {
        (self, None)
    }
}

impl<F> LogMessage for F
where
    F: FnOnce() -> (String, String),
{
    fn resolve(self) -> (String, Option<String>) {
        let (message, source) = self();
        (message, Some(source))
    }
}
