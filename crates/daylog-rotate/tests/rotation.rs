//! Rotation and compaction behavior against a real filesystem

use chrono::{Days, Local};
use daylog_rotate::{RotationState, RotationWriter, Scheduler, archive_path, compress};
use flate2::read::GzDecoder;
use std::fs;
use std::io::{Read, Write};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn open_creates_directory_and_dated_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("nested").join("logs");

    let state = RotationState::open(&dir).unwrap();

    assert!(dir.is_dir());
    let expected = format!("{}.log", Local::now().date_naive().format("%Y-%m-%d"));
    assert_eq!(
        state.current_path().file_name().unwrap().to_str().unwrap(),
        expected
    );
    assert!(state.current_path().is_file());
}

#[test]
fn open_fails_when_directory_cannot_be_created() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();

    let result = RotationState::open(blocker.join("logs"));
    assert!(result.is_err());
}

#[test]
fn reopen_for_same_date_is_idempotent_and_appends() {
    let tmp = TempDir::new().unwrap();
    let state = RotationState::open(tmp.path()).unwrap();
    let today = state.opened_for();

    let mut writer = RotationWriter::new(state.clone());
    writer.write_all(b"first\n").unwrap();

    assert!(state.rotate_to(today).unwrap().is_none());
    writer.write_all(b"second\n").unwrap();

    let content = fs::read_to_string(state.current_path()).unwrap();
    assert_eq!(content, "first\nsecond\n");
}

#[test]
fn failed_rotation_keeps_the_prior_handle() {
    let tmp = TempDir::new().unwrap();
    let state = RotationState::open(tmp.path()).unwrap();
    let tomorrow = state.opened_for().checked_add_days(Days::new(1)).unwrap();
    let before = state.current_path();

    // Occupy tomorrow's path with a directory so the open must fail.
    let blocked = tmp.path().join(format!("{}.log", tomorrow.format("%Y-%m-%d")));
    fs::create_dir(&blocked).unwrap();

    assert!(state.rotate_to(tomorrow).is_err());
    assert_eq!(state.current_path(), before);

    let mut writer = RotationWriter::new(state.clone());
    writer.write_all(b"still logging\n").unwrap();
    assert!(fs::read_to_string(before).unwrap().contains("still logging"));
}

#[test]
fn concurrent_writes_straddling_a_swap_are_all_kept() {
    const WRITERS: usize = 8;
    const LINES_PER_WRITER: usize = 50;

    let tmp = TempDir::new().unwrap();
    let state = RotationState::open(tmp.path()).unwrap();
    let old_path = state.current_path();
    let tomorrow = state.opened_for().checked_add_days(Days::new(1)).unwrap();

    let mut handles = Vec::new();
    for w in 0..WRITERS {
        let state = state.clone();
        handles.push(thread::spawn(move || {
            let mut writer = RotationWriter::new(state);
            for i in 0..LINES_PER_WRITER {
                writer
                    .write_all(format!("writer={w} line={i}\n").as_bytes())
                    .unwrap();
                thread::yield_now();
            }
        }));
    }

    thread::sleep(Duration::from_millis(5));
    let retired = state.rotate_to(tomorrow).unwrap().expect("swap happened");
    assert_eq!(retired.path, old_path);

    for handle in handles {
        handle.join().unwrap();
    }

    let count = |path: &std::path::Path| -> usize {
        fs::read_to_string(path)
            .map(|s| s.lines().count())
            .unwrap_or(0)
    };
    let total = count(&old_path) + count(&state.current_path());
    assert_eq!(total, WRITERS * LINES_PER_WRITER);
}

#[test]
fn compress_replaces_the_source_with_an_identical_archive() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("2024-06-01.log");
    let payload = b"line one\nline two\nline three\n".repeat(100);
    fs::write(&path, &payload).unwrap();

    compress(&path).unwrap();

    assert!(!path.exists());
    let gz = archive_path(&path);
    assert!(gz.exists());

    let mut decoded = Vec::new();
    GzDecoder::new(fs::File::open(&gz).unwrap())
        .read_to_end(&mut decoded)
        .unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn compress_failure_leaves_the_source_intact() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("2024-06-01.log");
    fs::write(&path, b"precious bytes\n").unwrap();

    // Occupy the archive path with a directory so creating it must fail.
    fs::create_dir(archive_path(&path)).unwrap();

    assert!(compress(&path).is_err());
    assert_eq!(fs::read(&path).unwrap(), b"precious bytes\n");
}

#[test]
fn compress_missing_source_leaves_no_archive_behind() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("never-existed.log");

    assert!(compress(&path).is_err());
    assert!(!archive_path(&path).exists());
}

#[tokio::test]
async fn scheduler_shuts_down_promptly() {
    let tmp = TempDir::new().unwrap();
    let state = RotationState::open(tmp.path()).unwrap();
    let scheduler = Scheduler::spawn(state);

    tokio::time::timeout(Duration::from_secs(1), scheduler.shutdown())
        .await
        .expect("shutdown should not wait for midnight");
}

#[tokio::test]
async fn rotate_once_is_a_no_op_within_the_same_day() {
    let tmp = TempDir::new().unwrap();
    let state = RotationState::open(tmp.path()).unwrap();
    let mut writer = RotationWriter::new(state.clone());
    writer.write_all(b"kept\n").unwrap();

    daylog_rotate::rotate_once(&state).await;

    assert_eq!(fs::read_to_string(state.current_path()).unwrap(), "kept\n");
}
