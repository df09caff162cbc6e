//! Line-oriented JSON logging backend with daily rotation
//!
//! The leanest of the three backends: records are encoded straight through a
//! streaming `serde_json` serializer, one map per line, written to the
//! rotation-managed file and echoed to standard output. Because entries are
//! streamed rather than collected into a map, duplicate field names survive
//! encoding in insertion order.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

use daylog::{Level, Logger, Record};
use daylog_rotate::{DEFAULT_LOG_DIR, Result, RotationState, Scheduler, TeeWriter};
use serde::ser::{SerializeMap, Serializer};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// JSON-lines logging backend.
///
/// Composes a [`RotationState`] (today's file handle), a [`Scheduler`]
/// (midnight rotation plus compression), and the tee to standard output.
/// The active level is an atomic checked inside the write path.
pub struct JsonLogger {
    state: Arc<RotationState>,
    scheduler: Scheduler,
    tee: TeeWriter,
    min_level: AtomicU8,
}

impl JsonLogger {
    /// Creates a logger writing under the default `logs/` directory.
    ///
    /// Must be called from within a Tokio runtime; the rotation scheduler is
    /// spawned there. Fails if the directory or today's file cannot be
    /// created; no silent no-op logger is returned.
    pub fn new(level: &str) -> Result<Arc<Self>> {
        Self::with_dir(DEFAULT_LOG_DIR, level)
    }

    /// Creates a logger writing under an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>, level: &str) -> Result<Arc<Self>> {
        let state = RotationState::open(dir)?;
        let tee = TeeWriter::new(state.clone());
        let scheduler = Scheduler::spawn(state.clone());
        Ok(Arc::new(Self {
            state,
            scheduler,
            tee,
            min_level: AtomicU8::new(Level::parse(level) as u8),
        }))
    }

    /// Path of the file records are currently appended to.
    pub fn current_path(&self) -> PathBuf {
        self.state.current_path()
    }

    /// Stops the rotation scheduler and flushes pending output.
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
        self.flush();
    }

    fn encode(record: &Record) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(256);
        {
            let mut ser = serde_json::Serializer::new(&mut buf);
            let mut map = ser.serialize_map(None)?;
            map.serialize_entry("time", &record.timestamp.to_rfc3339())?;
            map.serialize_entry("level", record.level.as_str())?;
            if let Some(caller) = record.caller {
                map.serialize_entry("caller", &caller.to_string())?;
            }
            map.serialize_entry("message", record.message.as_str())?;
            for field in &record.fields {
                map.serialize_entry(&field.name, &field.value)?;
            }
            map.end()?;
        }
        buf.push(b'\n');
        Ok(buf)
    }
}

impl Logger for JsonLogger {
    fn log(&self, record: Record) {
        if record.level < self.min_level() {
            return;
        }
        match Self::encode(&record) {
            Ok(line) => {
                let mut tee = self.tee.clone();
                if let Err(err) = tee.write_all(&line) {
                    tracing::warn!(%err, "failed to write log record");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to encode log record"),
        }
    }

    fn flush(&self) {
        let mut tee = self.tee.clone();
        let _ = tee.flush();
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.store(level as u8, Ordering::SeqCst);
    }

    fn min_level(&self) -> Level {
        Level::from_u8(self.min_level.load(Ordering::SeqCst))
    }
}
