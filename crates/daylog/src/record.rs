//! The log record handed to backend write paths

use crate::{FieldSet, Level, Message};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::panic::Location;

/// The application call site a record originated from.
///
/// Captured with `#[track_caller]` in the [`LoggerExt`](crate::LoggerExt)
/// methods, so the reported file and line always point at application code
/// rather than into an adapter. Backends forward it in whatever shape their
/// engine represents locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallSite {
    /// Source file of the call
    pub file: &'static str,
    /// Line within the file
    pub line: u32,
}

impl CallSite {
    /// Captures the location of the caller of the enclosing
    /// `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One structured log record: exactly one message plus zero or more fields.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Severity of this record
    pub level: Level,
    /// Rendered message
    pub message: Message,
    /// Ordered structured context
    pub fields: FieldSet,
    /// Creation time; how (or whether) it is formatted is the backend's concern
    pub timestamp: DateTime<Utc>,
    /// Application call site, when captured
    pub caller: Option<CallSite>,
}

impl Record {
    /// Creates a record stamped with the current time.
    pub fn new(level: Level, message: Message, fields: FieldSet) -> Self {
        Self {
            level,
            message,
            fields,
            timestamp: Utc::now(),
            caller: None,
        }
    }

    /// Builder-style method attaching the originating call site.
    pub fn with_caller(mut self, caller: CallSite) -> Self {
        self.caller = Some(caller);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    #[test]
    fn caller_points_at_this_file() {
        let site = CallSite::caller();
        assert!(site.file.ends_with("record.rs"));
        assert!(site.line > 0);
    }

    #[test]
    fn record_carries_message_and_fields() {
        let record = Record::new(Level::Warn, "disk almost full".into(), fields!["free_mb", 12])
            .with_caller(CallSite::caller());
        assert_eq!(record.level, Level::Warn);
        assert_eq!(record.message.as_str(), "disk almost full");
        assert_eq!(record.fields.len(), 1);
        assert!(record.caller.is_some());
    }
}
