//! `log`-ecosystem backend with daily rotation
//!
//! Drives a per-instance [`env_logger::Logger`] engine, built and never
//! installed globally, through the unified logging contract. Records are
//! translated into `log::Record`s carrying the field set as a
//! `log::kv::Source`, and the engine writes through a pipe target into the
//! rotation-managed file plus standard output.
//!
//! Level notes: the `log` crate has no fatal or panic severity, so
//! [`Level::Fatal`] and [`Level::Panic`] collapse to `log::Level::Error`
//! on this backend, and a numeric gate in the write path keeps below-level
//! records suppressed when the active level is fatal or panic. For the
//! remaining levels suppression stays inside the engine's filter; changing
//! the level rebuilds the engine, since `env_logger` fixes its filter at
//! build time.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

use daylog::{FieldSet, Level, Logger, Record};
use daylog_rotate::{DEFAULT_LOG_DIR, Result, RotationState, Scheduler, TeeWriter};
use parking_lot::RwLock;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Logging backend owning a private `env_logger` engine.
pub struct LogLogger {
    state: Arc<RotationState>,
    scheduler: Scheduler,
    tee: TeeWriter,
    engine: RwLock<env_logger::Logger>,
    min_level: AtomicU8,
}

impl LogLogger {
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
        let engine = build_engine(tee.clone(), level);
        let scheduler = Scheduler::spawn(state.clone());
        Ok(Arc::new(Self {
            state,
            scheduler,
            tee,
            engine: RwLock::new(engine),
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

impl Logger for LogLogger {
    fn log(&self, record: Record) {
        use log::Log;

        // The engine filter cannot express fatal or panic severity, so the
        // numeric gate handles those levels; the filter covers the rest.
        if record.level < self.min_level() {
            return;
        }
        let source = KvSource(&record.fields);
        let file = record.caller.map(|c| c.file);
        let line = record.caller.map(|c| c.line);
        let engine = self.engine.read();
        engine.log(
            &log::Record::builder()
                .args(format_args!("{}", record.message))
                .level(native_level(record.level))
                .target("daylog")
                .file(file)
                .line(line)
                .key_values(&source)
                .build(),
        );
    }

    fn flush(&self) {
        use log::Log;

        self.engine.read().flush();
        let _ = self.tee.clone().flush();
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.store(level as u8, Ordering::SeqCst);
        *self.engine.write() = build_engine(self.tee.clone(), level);
    }

    fn min_level(&self) -> Level {
        Level::from_u8(self.min_level.load(Ordering::SeqCst))
    }
}

fn build_engine(tee: TeeWriter, level: Level) -> env_logger::Logger {
    env_logger::Builder::new()
        .filter_level(native_filter(level))
        .target(env_logger::Target::Pipe(Box::new(tee)))
        .format(|buf, record| {
            write!(
                buf,
                "{} {}",
                chrono::Utc::now().to_rfc3339(),
                record.level()
            )?;
            if let (Some(file), Some(line)) = (record.file(), record.line()) {
                write!(buf, " {file}:{line}")?;
            }
            write!(buf, " {}", record.args())?;
            let _ = record.key_values().visit(&mut KvRenderer(&mut *buf));
            writeln!(buf)
        })
        .build()
}

fn native_level(level: Level) -> log::Level {
    match level {
        Level::Debug => log::Level::Debug,
        Level::Info => log::Level::Info,
        Level::Warn => log::Level::Warn,
        Level::Error | Level::Fatal | Level::Panic => log::Level::Error,
    }
}

fn native_filter(level: Level) -> log::LevelFilter {
    match level {
        Level::Debug => log::LevelFilter::Debug,
        Level::Info => log::LevelFilter::Info,
        Level::Warn => log::LevelFilter::Warn,
        Level::Error | Level::Fatal | Level::Panic => log::LevelFilter::Error,
    }
}

/// Exposes a [`FieldSet`] as the `log` crate's native key/value source.
struct KvSource<'a>(&'a FieldSet);

impl log::kv::Source for KvSource<'_> {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn log::kv::VisitSource<'kvs>,
    ) -> std::result::Result<(), log::kv::Error> {
        for field in self.0 {
            visitor.visit_pair(
                log::kv::Key::from_str(&field.name),
                log::kv::Value::from_serde(&field.value),
            )?;
        }
        Ok(())
    }
}

/// Renders key/value pairs as ` key=value` suffixes.
struct KvRenderer<'a, W>(&'a mut W);

impl<'kvs, W: Write> log::kv::VisitSource<'kvs> for KvRenderer<'_, W> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> std::result::Result<(), log::kv::Error> {
        write!(self.0, " {key}={value}").map_err(|_| log::kv::Error::msg("render failed"))
    }
}
