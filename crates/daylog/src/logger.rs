//! The logging contract implemented by every backend

use crate::{CallSite, FieldSet, Level, Message, Record};

/// Object-safe core of the logging contract.
///
/// Implementations own their active level, their rotation state, and their
/// background scheduler; there is no process-wide logger and no shared level
/// state between instances. Level suppression is the implementation's duty:
/// the facade hands over every record regardless of level.
pub trait Logger: Send + Sync + 'static {
    /// Writes one record to the backend engine.
    fn log(&self, record: Record);

    /// Flushes buffered output on a best-effort basis.
    fn flush(&self);

    /// Changes the active minimum level for this instance.
    fn set_min_level(&self, level: Level);

    /// Current minimum level for this instance.
    fn min_level(&self) -> Level;
}

/// Level-named convenience methods, implemented for every [`Logger`].
///
/// Each method captures the application call site via `#[track_caller]` and
/// accepts anything convertible into a [`Message`].
pub trait LoggerExt: Logger {
    /// Logs at [`Level::Debug`].
    #[track_caller]
    fn debug(&self, message: impl Into<Message>, fields: FieldSet) {
        self.log(Record::new(Level::Debug, message.into(), fields).with_caller(CallSite::caller()));
    }

    /// Logs at [`Level::Info`].
    #[track_caller]
    fn info(&self, message: impl Into<Message>, fields: FieldSet) {
        self.log(Record::new(Level::Info, message.into(), fields).with_caller(CallSite::caller()));
    }

    /// Logs at [`Level::Warn`].
    #[track_caller]
    fn warn(&self, message: impl Into<Message>, fields: FieldSet) {
        self.log(Record::new(Level::Warn, message.into(), fields).with_caller(CallSite::caller()));
    }

    /// Logs at [`Level::Error`].
    #[track_caller]
    fn error(&self, message: impl Into<Message>, fields: FieldSet) {
        self.log(Record::new(Level::Error, message.into(), fields).with_caller(CallSite::caller()));
    }

    /// Logs at [`Level::Fatal`], flushes, then terminates the process.
    ///
    /// Termination happens strictly after the record has been handed to the
    /// engine's write path and flushed. This is an ordering guarantee, not a
    /// durability guarantee: the operating system may still hold the bytes.
    #[track_caller]
    fn fatal(&self, message: impl Into<Message>, fields: FieldSet) -> ! {
        self.log(Record::new(Level::Fatal, message.into(), fields).with_caller(CallSite::caller()));
        self.flush();
        std::process::exit(1);
    }
}

impl<T: Logger + ?Sized> LoggerExt for T {}
