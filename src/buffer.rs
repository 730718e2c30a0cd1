//! An accumulating log-line builder with attached routing metadata.
//!
//! A buffer is built incrementally across one unit of work (one request, one
//! job) and flushed once through [`Logger::log_buffer`](crate::Logger::log_buffer).
//! Every mutating method consumes and returns the buffer, and is identity on
//! an absent buffer, so call sites chain unconditionally without a presence
//! check.

use crate::error::Error;
use crate::level::Level;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// The closed set of appendable kinds.
///
/// Call sites usually go through the `From` impls; `Item::error` covers
/// arbitrary error values.
#[derive(Debug)]
pub enum Item {
    /// Raw bytes, appended verbatim.
    Bytes(Vec<u8>),
    /// Decimal-rendered integer.
    Int(i64),
    /// `true` / `false`.
    Bool(bool),
    /// Text, appended verbatim.
    Text(String),
    /// A rendered error message.
    Error(String),
    /// Another buffer; its effective level propagates into the parent.
    Nested(LogBuffer),
}

impl Item {
    /// Captures any error value as its rendered message.
    #[must_use]
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::Error(err.to_string())
    }
}

impl From<&[u8]> for Item {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Item {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<i64> for Item {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Item {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Item {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<bool> for Item {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<LogBuffer> for Item {
    fn from(buffer: LogBuffer) -> Self {
        Self::Nested(buffer)
    }
}

#[derive(Debug, Default)]
struct Inner {
    bytes: Vec<u8>,
    level: Option<Level>,
    print_stack: bool,
    source: Option<String>,
    tag: Option<String>,
    flags: HashMap<String, bool>,
}

impl Inner {
    fn push_item(&mut self, item: Item) {
        match item {
            Item::Bytes(b) => self.bytes.extend_from_slice(&b),
            Item::Int(i) => self.bytes.extend_from_slice(i.to_string().as_bytes()),
            Item::Bool(b) => self
                .bytes
                .extend_from_slice(if b { b"true" } else { b"false" }),
            Item::Text(s) => self.bytes.extend_from_slice(s.as_bytes()),
            Item::Error(e) => self.bytes.extend_from_slice(e.as_bytes()),
            Item::Nested(child) => {
                let child_level = child.level();
                if child_level > self.level.unwrap_or_default() {
                    self.level = Some(child_level);
                }
                if let Some(child_inner) = child.inner {
                    self.bytes.extend_from_slice(&child_inner.bytes);
                }
            }
        }
    }

    fn insert_item(&mut self, offset: usize, item: Item) {
        assert!(
            offset <= self.bytes.len(),
            "insert offset {offset} past end {}",
            self.bytes.len()
        );
        let mut rendered = Self::default();
        rendered.push_item(item);
        if rendered.level.unwrap_or_default() > self.level.unwrap_or_default() {
            self.level = rendered.level;
        }
        let tail = self.bytes.split_off(offset);
        self.bytes.extend_from_slice(&rendered.bytes);
        self.bytes.extend_from_slice(&tail);
    }
}

/// The mutable log builder. `new()` yields a present buffer, `absent()` an
/// empty one on which every mutation is a no-op.
#[derive(Debug, Default)]
pub struct LogBuffer {
    inner: Option<Inner>,
}

impl LogBuffer {
    /// A present, empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Some(Inner::default()),
        }
    }

    /// An absent buffer; all mutations pass through unchanged.
    #[must_use]
    pub const fn absent() -> Self {
        Self { inner: None }
    }

    /// Whether this buffer accumulates anything at all.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    /// Appends one typed item.
    #[must_use]
    pub fn append(mut self, item: impl Into<Item>) -> Self {
        if let Some(inner) = &mut self.inner {
            inner.push_item(item.into());
        }
        self
    }

    /// Appends pre-formatted arguments, e.g. `buf.append_fmt(format_args!("{n} rows"))`.
    #[must_use]
    pub fn append_fmt(mut self, args: fmt::Arguments<'_>) -> Self {
        if let Some(inner) = &mut self.inner {
            let _ = inner.bytes.write_fmt(args);
        }
        self
    }

    /// Renders a millisecond duration: `999` -> `999ms`, `1000` -> `1s`,
    /// `2500` -> `2.500s`.
    #[must_use]
    pub fn append_millis(self, ms: u64) -> Self {
        if ms < 1000 {
            self.append_fmt(format_args!("{ms}ms"))
        } else if ms == 1000 {
            self.append("1s")
        } else {
            #[allow(clippy::cast_precision_loss)]
            self.append_fmt(format_args!("{:.3}s", ms as f64 / 1000.0))
        }
    }

    /// Appends a newline.
    #[must_use]
    pub fn wrap(self) -> Self {
        self.append("\n")
    }

    /// Appends `sep` only when the buffer already holds text.
    #[must_use]
    pub fn separator(self, sep: &str) -> Self {
        if !self.is_empty() {
            self.append(sep)
        } else {
            self
        }
    }

    /// Inserts one typed item at a byte offset.
    ///
    /// # Panics
    /// When `offset` lies past the end of the accumulated bytes, a
    /// programmer error, like out-of-range slicing.
    #[must_use]
    pub fn insert(mut self, offset: usize, item: impl Into<Item>) -> Self {
        if let Some(inner) = &mut self.inner {
            inner.insert_item(offset, item.into());
        }
        self
    }

    /// Deletes `len` bytes starting at `offset`; a negative offset counts
    /// from the end (`-1` is the last byte).
    ///
    /// # Panics
    /// When the resolved range lies outside the accumulated bytes.
    #[must_use]
    pub fn delete(mut self, offset: isize, len: usize) -> Self {
        if let Some(inner) = &mut self.inner {
            let used = inner.bytes.len();
            let start = if offset < 0 {
                used.checked_sub(offset.unsigned_abs())
                    .expect("delete offset before start")
            } else {
                usize::try_from(offset).expect("delete offset out of range")
            };
            assert!(start + len <= used, "delete range past end {used}");
            inner.bytes.drain(start..start + len);
        }
        self
    }

    /// Sets the severity the flush will dispatch with.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        if let Some(inner) = &mut self.inner {
            inner.level = Some(level);
        }
        self
    }

    /// Requests a captured backtrace at flush time (honored for error-level flushes).
    #[must_use]
    pub fn with_stack(mut self, print_stack: bool) -> Self {
        if let Some(inner) = &mut self.inner {
            inner.print_stack = print_stack;
        }
        self
    }

    /// Overrides the caller location the flush would otherwise record.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        if let Some(inner) = &mut self.inner {
            inner.source = Some(source.into());
        }
        self
    }

    /// Routes the flush to a specific writer tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        if let Some(inner) = &mut self.inner {
            inner.tag = Some(tag.into());
        }
        self
    }

    /// Stores a caller-defined marker flag.
    #[must_use]
    pub fn set_flag(mut self, key: impl Into<String>, value: bool) -> Self {
        if let Some(inner) = &mut self.inner {
            inner.flags.insert(key.into(), value);
        }
        self
    }

    /// Reads a caller-defined marker flag; absent buffers and unset keys read false.
    #[must_use]
    pub fn has_flag(&self, key: &str) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|inner| inner.flags.get(key).copied().unwrap_or(false))
    }

    /// Effective severity: Info when unset or absent.
    #[must_use]
    pub fn level(&self) -> Level {
        self.inner
            .as_ref()
            .and_then(|inner| inner.level)
            .unwrap_or(Level::Info)
    }

    /// Whether the effective severity is Error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level() == Level::Error
    }

    /// Whether a backtrace was requested.
    #[must_use]
    pub fn print_stack(&self) -> bool {
        self.inner.as_ref().is_some_and(|inner| inner.print_stack)
    }

    /// The source override, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.inner.as_ref().and_then(|inner| inner.source.as_deref())
    }

    /// The routing tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.inner.as_ref().and_then(|inner| inner.tag.as_deref())
    }

    /// Accumulated byte count; absent buffers report zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.bytes.len())
    }

    /// Whether nothing has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The accumulated bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_ref().map_or(&[], |inner| &inner.bytes)
    }

    /// The byte at `index`, when in range.
    #[must_use]
    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.as_bytes().get(index).copied()
    }

    /// Converts the accumulated text into an error value; `None` when empty,
    /// so callers can propagate it only when something was recorded.
    #[must_use]
    pub fn to_error(&self) -> Option<Error> {
        if self.is_empty() {
            None
        } else {
            Some(Error::Message(
                String::from_utf8_lossy(self.as_bytes()).into_owned(),
            ))
        }
    }
}

impl fmt::Display for LogBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}
