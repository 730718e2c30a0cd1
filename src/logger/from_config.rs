//! Turns parsed filter entries into live writers.
//!
//! Loading closes every existing writer first, then registers entries one by
//! one. Any validation error is unrecoverable at startup:
//! [`Logger::load_configuration`] reports it on the diagnostic stream and
//! exits the process; [`Logger::try_load_configuration`] surfaces the same
//! error as a value for tests and embedders.

use super::Logger;
use crate::config::{Config, parse_size_suffix};
use crate::diag;
use crate::error::Error;
use crate::level::Level;
use crate::writer::{ConsoleWriter, FileOptions, FileWriter, LogWriter};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

impl Logger {
    /// Replaces the writer set with the one described by the TOML file at
    /// `path`. Any error (unreadable file, syntax, duplicate tags, unknown
    /// properties, unsupported levels or types, writer construction) aborts
    /// the process after a diagnostic report.
    pub fn load_configuration(&self, path: impl AsRef<Path>) {
        if let Err(err) = self.try_load_configuration(path) {
            diag::error(format_args!("load configuration failed: {err}"));
            std::process::exit(1);
        }
    }

    /// Same as [`Self::load_configuration`] but returns the failure instead
    /// of exiting. Existing writers are closed before loading either way; on
    /// error, entries registered before the offending one remain in place.
    ///
    /// # Errors
    /// Every configuration validation failure described in the crate docs.
    pub fn try_load_configuration(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.close();

        let config = Config::load(path.as_ref())?;
        let mut inner = self.inner.write();

        for entry in config.filter {
            if entry.enabled.is_empty() {
                return Err(Error::Config(
                    "filter attribute 'enabled' not found".to_string(),
                ));
            }
            if entry.enabled.trim() == "false" {
                continue;
            }
            if entry.tag.is_empty() {
                return Err(Error::Config("filter field 'tag' not found".to_string()));
            }
            if inner.writers.contains_key(&entry.tag) {
                return Err(Error::DuplicateTag(entry.tag));
            }
            if entry.level.is_empty() {
                return Err(Error::Config("filter field 'level' not found".to_string()));
            }
            if entry.kind.is_empty() {
                return Err(Error::Config("filter field 'type' not found".to_string()));
            }

            let level: Level = entry
                .level
                .parse()
                .map_err(|_| Error::InvalidLevel(entry.level.clone()))?;

            let writer: Box<dyn LogWriter> = match entry.kind.as_str() {
                "console" => Box::new(console_from_properties(level, &entry.properties)?),
                "file" => {
                    let writer = file_from_properties(&entry.tag, level, &entry.properties)?;
                    if inner.log_file_dir.is_none() {
                        inner.log_file_dir = writer.filename().parent().map(PathBuf::from);
                    }
                    Box::new(writer)
                }
                other => return Err(Error::UnknownWriterType(other.to_string())),
            };

            inner.writers.insert(entry.tag, writer);
        }

        Ok(())
    }
}

fn console_from_properties(
    level: Level,
    properties: &BTreeMap<String, String>,
) -> Result<ConsoleWriter, Error> {
    let mut format = crate::fmt::DEFAULT_FORMAT.to_string();
    for (name, value) in properties {
        match name.as_str() {
            "format" => format = value.trim().to_string(),
            other => return Err(Error::UnknownProperty(other.to_string())),
        }
    }
    Ok(ConsoleWriter::with_format(level, format))
}

fn file_from_properties(
    tag: &str,
    level: Level,
    properties: &BTreeMap<String, String>,
) -> Result<FileWriter, Error> {
    FileWriter::spawn(tag, level, file_options_from_properties(properties)?)
}

/// Parses a filter entry's property map into [`FileOptions`] without
/// constructing the writer.
pub fn file_options_from_properties(
    properties: &BTreeMap<String, String>,
) -> Result<FileOptions, Error> {
    let mut options = FileOptions::default();

    for (name, value) in properties {
        let value = value.trim();
        match name.as_str() {
            "filename" => options.filename = value.to_string(),
            "format" => options.format = value.to_string(),
            "maxlines" => options.max_lines = parse_size_suffix(value, 1000)?,
            "maxsize" => options.max_size = parse_size_suffix(value, 1024)?,
            "daily" => options.daily = value != "false",
            "rotate" => options.rotate = value != "false",
            "private" => options.private = value != "false",
            "keepDay" => {
                options.keep_days = i64::try_from(parse_size_suffix(value, 1000)?)
                    .map_err(|_| Error::Config(format!("keepDay out of range: {value}")))?;
            }
            other => return Err(Error::UnknownProperty(other.to_string())),
        }
    }

    if options.filename.is_empty() {
        return Err(Error::MissingProperty("filename"));
    }
    Ok(options)
}
