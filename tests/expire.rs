//! Background expiry sweep: prefix matching, age cutoff, current-file guard.

use std::fs;
use std::time::{Duration, SystemTime};
use taglog::writer::expire::sweep_expired;
use tempfile::TempDir;

const DAY: Duration = Duration::from_secs(86_400);

#[test]
fn old_rotated_files_are_removed() {
    let tmp = TempDir::new().unwrap();
    let current = tmp.path().join("app.log");
    let rotated = tmp.path().join("app.log.20240101");
    let unrelated = tmp.path().join("other.log.20240101");
    fs::write(&current, "live\n").unwrap();
    fs::write(&rotated, "old\n").unwrap();
    fs::write(&unrelated, "old\n").unwrap();

    // Everything on disk was just written; pretend 40 days have passed.
    let future = SystemTime::now() + 40 * DAY;
    sweep_expired("app", &current, 30, future);

    assert!(current.exists(), "current file must never be expired");
    assert!(!rotated.exists(), "rotated file should be gone");
    assert!(unrelated.exists(), "non-matching basename must survive");
}

#[test]
fn fresh_files_survive_the_sweep() {
    let tmp = TempDir::new().unwrap();
    let current = tmp.path().join("app.log");
    let rotated = tmp.path().join("app.log.20240101");
    fs::write(&current, "live\n").unwrap();
    fs::write(&rotated, "recent\n").unwrap();

    sweep_expired("app", &current, 30, SystemTime::now());

    assert!(current.exists());
    assert!(rotated.exists());
}

#[test]
fn current_file_survives_even_when_ancient() {
    let tmp = TempDir::new().unwrap();
    let current = tmp.path().join("app.log");
    fs::write(&current, "live\n").unwrap();

    let far_future = SystemTime::now() + 365 * DAY;
    sweep_expired("app", &current, 1, far_future);

    assert!(current.exists());
}

#[test]
fn missing_directory_is_skipped() {
    let tmp = TempDir::new().unwrap();
    let gone = tmp.path().join("nope").join("app.log");
    // Reports to the diagnostic stream and returns; no panic.
    sweep_expired("app", &gone, 7, SystemTime::now());
}

#[test]
fn subdirectories_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let current = tmp.path().join("app.log");
    fs::write(&current, "live\n").unwrap();
    fs::create_dir(tmp.path().join("app.log.d")).unwrap();

    let future = SystemTime::now() + 40 * DAY;
    sweep_expired("app", &current, 30, future);

    assert!(tmp.path().join("app.log.d").exists());
}
