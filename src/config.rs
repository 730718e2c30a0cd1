//! TOML configuration schema: a declarative list of filter entries.
//!
//! Parsing is kept separate from writer construction (see
//! `logger::from_config`) so the schema stays a plain serde mirror of the
//! file and every validation rule lives next to the code it protects.

use crate::error::Error;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A completely empty config file is valid and yields no writers.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// One entry per writer to register.
    pub filter: Vec<FilterEntry>,
}

/// One writer declaration. Field-level validation happens at load time, not
/// here; serde only mirrors the file shape.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FilterEntry {
    /// Bool-as-string; missing is a config error, `"false"` skips the entry.
    pub enabled: String,
    /// Unique routing key.
    pub tag: String,
    /// One of DEBUG | INFO | WARNING | ERROR.
    pub level: String,
    /// `console` or `file`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Backend-specific name/value pairs; unknown names are a config error.
    pub properties: BTreeMap<String, String>,
}

impl Config {
    /// Reads and parses a config file.
    ///
    /// # Errors
    /// I/O failure reading the file, or TOML syntax errors.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses config text.
    ///
    /// # Errors
    /// TOML syntax errors.
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }
}

/// Parses a count with optional K/M/G suffix; suffixes multiply cumulatively
/// by `multiple` (1000 for line counts, 1024 for byte sizes), so `1G` is
/// `multiple^3`.
///
/// # Errors
/// Non-numeric digits and values that overflow `u64` are config errors
/// rather than silent zeros or wrapped limits.
pub fn parse_size_suffix(value: &str, multiple: u64) -> Result<u64, Error> {
    let value = value.trim();
    let (digits, factor) = match value.as_bytes().last() {
        Some(b'G' | b'g') => (&value[..value.len() - 1], multiple * multiple * multiple),
        Some(b'M' | b'm') => (&value[..value.len() - 1], multiple * multiple),
        Some(b'K' | b'k') => (&value[..value.len() - 1], multiple),
        _ => (value, 1),
    };
    let parsed: u64 = digits
        .parse()
        .map_err(|_| Error::Config(format!("invalid numeric property value: {value}")))?;
    parsed
        .checked_mul(factor)
        .ok_or_else(|| Error::Config(format!("numeric property value out of range: {value}")))
}
