//! In-memory log capture for tests
//!
//! [`CaptureLogger`] implements the full [`Logger`] contract against a
//! vector of records, so facade behavior (message conversion, field
//! handling, level suppression, flush ordering) can be asserted without
//! touching the filesystem.

use crate::{Level, Logger, Record};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A logger that captures every accepted record in memory.
#[derive(Clone, Default)]
pub struct CaptureLogger {
    inner: Arc<CaptureInner>,
}

#[derive(Default)]
struct CaptureInner {
    records: Mutex<Vec<Record>>,
    min_level: AtomicU8,
    flushes: AtomicUsize,
}

impl CaptureLogger {
    /// Creates a capture logger accepting everything from `Debug` up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a capture logger with a specific minimum level.
    pub fn with_level(level: Level) -> Self {
        let logger = Self::new();
        logger.set_min_level(level);
        logger
    }

    /// Snapshot of all captured records, in arrival order.
    pub fn records(&self) -> Vec<Record> {
        self.inner.records.lock().expect("capture lock").clone()
    }

    /// Whether any captured record's message contains `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.inner
            .records
            .lock()
            .expect("capture lock")
            .iter()
            .any(|r| r.message.as_str().contains(text))
    }

    /// Number of times `flush` was called.
    pub fn flush_count(&self) -> usize {
        self.inner.flushes.load(Ordering::SeqCst)
    }

    /// Discards all captured records.
    pub fn clear(&self) {
        self.inner.records.lock().expect("capture lock").clear();
    }
}

impl Logger for CaptureLogger {
    fn log(&self, record: Record) {
        if record.level >= self.min_level() {
            self.inner
                .records
                .lock()
                .expect("capture lock")
                .push(record);
        }
    }

    fn flush(&self) {
        self.inner.flushes.fetch_add(1, Ordering::SeqCst);
    }

    fn set_min_level(&self, level: Level) {
        self.inner.min_level.store(level as u8, Ordering::SeqCst);
    }

    fn min_level(&self) -> Level {
        Level::from_u8(self.inner.min_level.load(Ordering::SeqCst))
    }
}
