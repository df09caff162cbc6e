//! `tracing`-based JSON logging backend with daily rotation
//!
//! Owns a private `tracing_subscriber` pipeline, a reloadable level filter
//! under a JSON fmt layer, wrapped in a [`tracing::Dispatch`] that is never
//! installed globally. Every log call emits one event under
//! `dispatcher::with_default`, so independent logger instances coexist
//! without sharing any subscriber state.
//!
//! Translation notes: tracing event metadata is fixed at compile time, so
//! dynamic data rides in event fields: the application call site as a
//! `caller` field and the field set as one structured `fields` value (the
//! wire layout of backend output is collaborator territory, not contract).
//! `tracing` has no fatal or panic severity; both map to `ERROR`, and a
//! numeric gate in the write path keeps below-level records suppressed when
//! the active level is fatal or panic.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

use daylog::{Level, Logger, Record};
use daylog_rotate::{DEFAULT_LOG_DIR, Result, RotationState, Scheduler, TeeWriter};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::Dispatch;
use tracing::dispatcher;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;

/// Logging backend owning a private `tracing` dispatch pipeline.
pub struct TracingLogger {
    state: Arc<RotationState>,
    scheduler: Scheduler,
    tee: TeeWriter,
    dispatch: Dispatch,
    reload: reload::Handle<LevelFilter, Registry>,
    min_level: AtomicU8,
}

impl TracingLogger {
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
        let level = Level::parse(level);
        let state = RotationState::open(dir)?;
        let tee = TeeWriter::new(state.clone());

        let (filter, handle) = reload::Layer::new(native_filter(level));
        let writer_tee = tee.clone();
        let subscriber = Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(move || writer_tee.clone()),
        );
        let dispatch = Dispatch::new(subscriber);

        let scheduler = Scheduler::spawn(state.clone());
        Ok(Arc::new(Self {
            state,
            scheduler,
            tee,
            dispatch,
            reload: handle,
            min_level: AtomicU8::new(level as u8),
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
}

impl Logger for TracingLogger {
    fn log(&self, record: Record) {
        // The engine filter cannot express fatal or panic severity, so the
        // numeric gate handles those levels; the filter covers the rest.
        if record.level < self.min_level() {
            return;
        }
        let message = record.message.as_str();
        let caller = record
            .caller
            .map(|c| c.to_string())
            .unwrap_or_default();
        let fields = serde_json::to_string(&record.fields).unwrap_or_default();

        dispatcher::with_default(&self.dispatch, || match native_level(record.level) {
            tracing::Level::ERROR => {
                tracing::error!(target: "daylog", caller = %caller, fields = %fields, "{message}");
            }
            tracing::Level::WARN => {
                tracing::warn!(target: "daylog", caller = %caller, fields = %fields, "{message}");
            }
            tracing::Level::INFO => {
                tracing::info!(target: "daylog", caller = %caller, fields = %fields, "{message}");
            }
            _ => {
                tracing::debug!(target: "daylog", caller = %caller, fields = %fields, "{message}");
            }
        });
    }

    fn flush(&self) {
        let _ = self.tee.clone().flush();
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.store(level as u8, Ordering::SeqCst);
        if let Err(err) = self.reload.reload(native_filter(level)) {
            tracing::warn!(%err, "failed to reload level filter");
        }
    }

    fn min_level(&self) -> Level {
        Level::from_u8(self.min_level.load(Ordering::SeqCst))
    }
}

fn native_level(level: Level) -> tracing::Level {
    match level {
        Level::Debug => tracing::Level::DEBUG,
        Level::Info => tracing::Level::INFO,
        Level::Warn => tracing::Level::WARN,
        Level::Error | Level::Fatal | Level::Panic => tracing::Level::ERROR,
    }
}

fn native_filter(level: Level) -> LevelFilter {
    match level {
        Level::Debug => LevelFilter::DEBUG,
        Level::Info => LevelFilter::INFO,
        Level::Warn => LevelFilter::WARN,
        Level::Error | Level::Fatal | Level::Panic => LevelFilter::ERROR,
    }
}
