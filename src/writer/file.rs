//! Buffered, rotating file writer.
//!
//! Each instance owns one background consumer thread that holds the open
//! file handle exclusively, so no lock guards the file I/O itself. Rotation
//! and write failures degrade the writer to standard output instead of ever
//! blocking or failing the producing call sites.

use super::{LogWriter, QUEUE_CAPACITY, expire};
use crate::diag;
use crate::error::Error;
use crate::fmt::{DEFAULT_FORMAT, format_record};
use crate::level::Level;
use crate::record::LogRecord;
use chrono::Local;
use crossbeam_channel::{Receiver, Sender, bounded};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// How often the expiry sweep wakes when `keep_days` is configured.
const EXPIRE_INTERVAL: Duration = Duration::from_secs(60);

/// Backend-specific settings for a file writer, also accepted by
/// [`Logger::add_file_logger_if_absent`](crate::Logger::add_file_logger_if_absent).
#[derive(Debug, Clone)]
pub struct FileOptions {
    /// Log file path; `~` expands to the home directory.
    pub filename: String,
    /// Line format template.
    pub format: String,
    /// Master switch for rotation; without it counters are not even kept.
    pub rotate: bool,
    /// Rotate when the calendar day changes.
    pub daily: bool,
    /// Rotate after this many lines (0 disables the line predicate).
    pub max_lines: u64,
    /// Rotate after this many bytes (0 disables the size predicate).
    pub max_size: u64,
    /// Delete rotated files older than this many days (0 disables expiry).
    pub keep_days: i64,
    /// Private writers exclusively own their tag's traffic.
    pub private: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            filename: String::new(),
            format: DEFAULT_FORMAT.to_string(),
            rotate: false,
            daily: false,
            max_lines: 0,
            max_size: 0,
            keep_days: 0,
            private: false,
        }
    }
}

/// File writer handle. The consumer thread outlives every enqueue and is
/// joined by [`LogWriter::close`].
pub struct FileWriter {
    tag: String,
    level: Level,
    private: bool,
    filename: PathBuf,
    tx: Sender<Option<Arc<LogRecord>>>,
    handle: JoinHandle<()>,
}

impl FileWriter {
    /// Opens the log file (creating its directory) and spawns the consumer
    /// thread, plus the expiry sweeper when `keep_days` is set.
    ///
    /// # Errors
    /// [`Error::WriterCreate`] when the directory cannot be created or the
    /// file cannot be opened in append mode, which is fatal to writer creation.
    pub fn spawn(tag: &str, level: Level, options: FileOptions) -> Result<Self, Error> {
        let filename = PathBuf::from(shellexpand::tilde(&options.filename).into_owned());

        let mut consumer = Consumer {
            tag: tag.to_string(),
            filename: filename.clone(),
            format: options.format,
            rotate: options.rotate,
            daily: options.daily,
            max_lines: options.max_lines,
            max_size: options.max_size,
            cur_lines: 0,
            cur_size: 0,
            ymd: String::new(),
            file: None,
        };

        consumer.open_file().map_err(|source| Error::WriterCreate {
            tag: tag.to_string(),
            filename: filename.display().to_string(),
            source,
        })?;

        if options.keep_days > 0 {
            expire::spawn_sweeper(
                tag.to_string(),
                filename.clone(),
                options.keep_days,
                EXPIRE_INTERVAL,
            );
        }

        let (tx, rx) = bounded(QUEUE_CAPACITY);
        let handle = std::thread::spawn(move || consumer.run(&rx));

        diag::info(format_args!(
            "file writer [{tag}] created, filename: {}",
            filename.display()
        ));

        Ok(Self {
            tag: tag.to_string(),
            level,
            private: options.private,
            filename,
            tx,
            handle,
        })
    }

    /// Canonical path of the file currently written to.
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }
}

impl LogWriter for FileWriter {
    fn enqueue(&self, record: Option<Arc<LogRecord>>) {
        if self.tx.send(record).is_err() {
            diag::error(format_args!(
                "file writer [{}]: consumer gone, record dropped",
                self.tag
            ));
        }
    }

    fn close(self: Box<Self>) {
        let Self { tag, tx, handle, .. } = *self;
        // Dropping the sender closes the queue; no further enqueues land.
        drop(tx);
        diag::info(format_args!("file writer [{tag}] closed log queue"));
        // Joining is the completion signal: the consumer returns only after
        // draining every buffered record and releasing the file handle.
        if handle.join().is_err() {
            diag::error(format_args!("file writer [{tag}]: consumer thread panicked"));
        }
        diag::info(format_args!("file writer [{tag}] is closed"));
    }

    fn level(&self) -> Level {
        self.level
    }

    fn is_private(&self) -> bool {
        self.private
    }
}

/// State owned exclusively by the consumer thread.
struct Consumer {
    tag: String,
    filename: PathBuf,
    format: String,
    rotate: bool,
    daily: bool,
    max_lines: u64,
    max_size: u64,
    cur_lines: u64,
    cur_size: u64,
    /// `yyyymmdd` recorded when the current file was opened; also the stamp
    /// a rotated file is renamed with.
    ymd: String,
    /// `None` after an unrecovered rotation failure; records then fall back
    /// to standard output so logging never blocks application progress.
    file: Option<File>,
}

impl Consumer {
    fn run(mut self, rx: &Receiver<Option<Arc<LogRecord>>>) {
        for record in rx {
            self.write_record(record.as_deref());
        }
        diag::info(format_args!("file writer [{}] log queue is empty", self.tag));
        if let Some(mut file) = self.file.take() {
            if let Err(e) = file.flush() {
                diag::error(format_args!(
                    "file writer [{}]: final flush of {} failed: {e}",
                    self.tag,
                    self.filename.display()
                ));
            }
            diag::info(format_args!(
                "file writer [{}] closed log file: {}",
                self.tag,
                self.filename.display()
            ));
        }
    }

    fn write_record(&mut self, record: Option<&LogRecord>) {
        if self.rotate && self.file.is_some() {
            self.try_rotate();
        }

        let line = format_record(&self.format, record);
        let written = line.len() as u64;

        let result = match &mut self.file {
            Some(file) => file.write_all(line.as_bytes()),
            // Degraded mode: rotation closed the file and could not reopen it.
            None => std::io::stdout().write_all(line.as_bytes()),
        };

        match result {
            Err(e) => diag::error(format_args!(
                "file writer [{}]: write failed: {e}",
                self.tag
            )),
            Ok(()) if self.rotate => {
                if self.max_lines > 0 {
                    self.cur_lines += 1;
                }
                if self.max_size > 0 {
                    self.cur_size += written;
                }
            }
            Ok(()) => {}
        }
    }

    fn open_file(&mut self) -> std::io::Result<()> {
        if let Some(parent) = self.filename.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.filename)?;
        self.file = Some(file);
        self.ymd = Local::now().format("%Y%m%d").to_string();
        self.cur_lines = 0;
        self.cur_size = 0;
        Ok(())
    }

    /// `today` is injected so the day-change comparison is testable.
    fn rotation_due(&self, today: &str) -> bool {
        (self.daily && today != self.ymd)
            || (self.max_lines > 0 && self.cur_lines >= self.max_lines)
            || (self.max_size > 0 && self.cur_size >= self.max_size)
    }

    /// Renames the current file aside to `<name>.<yyyymmdd>[-NNN]` and
    /// reopens a fresh one at the canonical path. Any failure past the
    /// rename decision degrades to the stdout fallback rather than dropping
    /// the record about to be written.
    fn try_rotate(&mut self) {
        let today = Local::now().format("%Y%m%d").to_string();
        if !self.rotation_due(&today) {
            return;
        }
        if !self.filename.exists() {
            return;
        }

        for attempt in 0..=999 {
            let rotated = if attempt == 0 {
                format!("{}.{}", self.filename.display(), self.ymd)
            } else {
                format!("{}.{}-{attempt:03}", self.filename.display(), self.ymd)
            };
            if Path::new(&rotated).exists() {
                continue;
            }

            if let Some(mut file) = self.file.take()
                && let Err(e) = file.flush()
            {
                diag::error(format_args!(
                    "file writer [{}]: flush before rotate failed: {e}",
                    self.tag
                ));
            }

            if let Err(e) = fs::rename(&self.filename, &rotated) {
                diag::error(format_args!(
                    "file writer [{}]: rename to {rotated} failed: {e}",
                    self.tag
                ));
            }

            // Reopen regardless of whether the rename worked; a failed
            // reopen leaves the stdout fallback active.
            if let Err(e) = self.open_file() {
                diag::error(format_args!(
                    "file writer [{}]: reopen {} failed: {e}",
                    self.tag,
                    self.filename.display()
                ));
            }
            return;
        }
        // All thousand stamps for this day are taken; keep appending.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consumer(daily: bool, max_lines: u64, max_size: u64) -> Consumer {
        Consumer {
            tag: "test".to_string(),
            filename: PathBuf::from("test.log"),
            format: DEFAULT_FORMAT.to_string(),
            rotate: true,
            daily,
            max_lines,
            max_size,
            cur_lines: 0,
            cur_size: 0,
            ymd: "20240305".to_string(),
            file: None,
        }
    }

    #[test]
    fn day_change_triggers_rotation() {
        let c = consumer(true, 0, 0);
        assert!(!c.rotation_due("20240305"));
        assert!(c.rotation_due("20240306"));
    }

    #[test]
    fn day_change_is_ignored_without_daily() {
        let c = consumer(false, 0, 0);
        assert!(!c.rotation_due("20240306"));
    }

    #[test]
    fn byte_counter_triggers_rotation_at_threshold() {
        let mut c = consumer(false, 0, 100);
        c.cur_size = 99;
        assert!(!c.rotation_due("20240305"));
        c.cur_size = 100;
        assert!(c.rotation_due("20240305"));
    }

    #[test]
    fn line_counter_triggers_rotation_at_threshold() {
        let mut c = consumer(false, 3, 0);
        c.cur_lines = 2;
        assert!(!c.rotation_due("20240305"));
        c.cur_lines = 3;
        assert!(c.rotation_due("20240305"));
    }

    #[test]
    fn zero_thresholds_never_trigger() {
        let mut c = consumer(false, 0, 0);
        c.cur_lines = 1_000_000;
        c.cur_size = 1_000_000;
        assert!(!c.rotation_due("20240305"));
    }
}
