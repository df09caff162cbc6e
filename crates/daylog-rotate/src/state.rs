//! Current-day file handle ownership and the day-boundary swap

use crate::error::{Error, Result};
use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Owns the open log file for the current calendar day.
///
/// The mutex serializes "read current handle" against "swap handle"; it is
/// never held across write I/O. Writers take a cheap `Arc<File>` clone under
/// the lock and perform their append after releasing it, so a call that
/// begins before a swap completes may still land in the old file, one that
/// begins after lands in the new file, and no call is dropped either way.
#[derive(Debug)]
pub struct RotationState {
    base_dir: PathBuf,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    opened_for: NaiveDate,
    file: Arc<File>,
}

impl RotationState {
    /// Opens today's log file under `base_dir`, creating the directory
    /// recursively if needed.
    ///
    /// A failure here means the logger must not start; constructors propagate
    /// the error instead of handing back a silent no-op logger.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Arc<Self>> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| Error::CreateDirectory {
            path: base_dir.clone(),
            source,
        })?;
        let today = Local::now().date_naive();
        let (path, file) = open_for_date(&base_dir, today)?;
        Ok(Arc::new(Self {
            base_dir,
            inner: Mutex::new(Inner {
                path,
                opened_for: today,
                file: Arc::new(file),
            }),
        }))
    }

    /// Swaps in the log file for `date`, returning the retired file.
    ///
    /// Idempotent: if the state is already open for `date` this returns
    /// `Ok(None)` without touching the handle, and a re-open for the same
    /// date never truncates existing content (append semantics).
    ///
    /// The new file is opened before anything is replaced, so an open failure
    /// leaves the prior handle in place: log capacity is kept for the day and
    /// the swap is retried at the next cycle. There is never a window with
    /// zero open handles.
    pub fn rotate_to(&self, date: NaiveDate) -> Result<Option<RetiredFile>> {
        let mut inner = self.inner.lock();
        if inner.opened_for == date {
            return Ok(None);
        }
        let (path, file) = open_for_date(&self.base_dir, date)?;
        let retired_path = std::mem::replace(&mut inner.path, path);
        let retired_file = std::mem::replace(&mut inner.file, Arc::new(file));
        inner.opened_for = date;
        Ok(Some(RetiredFile {
            path: retired_path,
            file: retired_file,
        }))
    }

    /// Path of the file currently being written.
    pub fn current_path(&self) -> PathBuf {
        self.inner.lock().path.clone()
    }

    /// Calendar date the current file was opened for.
    pub fn opened_for(&self) -> NaiveDate {
        self.inner.lock().opened_for
    }

    /// Handle to the current file. The clone is taken under the lock; the
    /// caller writes after the lock is released.
    pub fn current_file(&self) -> Arc<File> {
        self.inner.lock().file.clone()
    }
}

/// A log file retired by a day-boundary swap, ready for compaction.
#[derive(Debug)]
pub struct RetiredFile {
    /// Path of the retired file
    pub path: PathBuf,
    file: Arc<File>,
}

impl RetiredFile {
    /// Waits (bounded) for in-flight writers still holding the retired
    /// handle to finish, closes it, and returns the path for compaction.
    pub async fn settle(self) -> PathBuf {
        let Self { path, file } = self;
        for _ in 0..50 {
            if Arc::strong_count(&file) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        drop(file);
        path
    }
}

fn open_for_date(base_dir: &Path, date: NaiveDate) -> Result<(PathBuf, File)> {
    let path = base_dir.join(format!("{}.log", date.format("%Y-%m-%d")));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| Error::OpenFile {
            path: path.clone(),
            source,
        })?;
    Ok((path, file))
}
