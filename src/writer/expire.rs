//! Background expiry of rotated log files.
//!
//! The sweep itself is a pure-ish function taking `now` explicitly so tests
//! can simulate file age; the sweeper thread just calls it on a fixed
//! interval for the life of the process.

use crate::diag;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const SECS_PER_DAY: u64 = 86_400;

/// Spawns the detached sweeper thread. It has no cancellation path other
/// than process exit; the writer set is process-lifetime state.
pub(crate) fn spawn_sweeper(tag: String, filename: PathBuf, keep_days: i64, interval: Duration) {
    std::thread::spawn(move || {
        loop {
            std::thread::sleep(interval);
            sweep_expired(&tag, &filename, keep_days, SystemTime::now());
        }
    });
}

/// One expiry pass: deletes files in the writer's directory whose name
/// starts with the writer's base filename and whose modification time is
/// older than `now - keep_days`. The currently open file is never deleted,
/// whatever its age. Scan and delete failures are reported to the
/// diagnostic stream; a failed scan skips the cycle, a failed delete skips
/// the file.
pub fn sweep_expired(tag: &str, filename: &Path, keep_days: i64, now: SystemTime) {
    let dir = match filename.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(base) = filename.file_name().and_then(|n| n.to_str()) else {
        return;
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            diag::error(format_args!(
                "file writer [{tag}]: read dir {} failed: {e}",
                dir.display()
            ));
            return;
        }
    };

    let keep_days = u64::try_from(keep_days.max(0)).unwrap_or(0);
    let max_age = Duration::from_secs(SECS_PER_DAY.saturating_mul(keep_days));

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() || path == filename {
            continue;
        }
        let name_matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with(base));
        if !name_matches {
            continue;
        }

        let expired = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age > max_age);
        if !expired {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => diag::info(format_args!(
                "file writer [{tag}]: removed expired {}",
                path.display()
            )),
            Err(e) => diag::error(format_args!(
                "file writer [{tag}]: remove {} failed: {e}",
                path.display()
            )),
        }
    }
}
