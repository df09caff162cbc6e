//! Core structured-logging facade
//!
//! This crate defines the logging contract shared by every backend:
//! - A totally-ordered [`Level`] with lenient string parsing
//! - [`Field`]/[`FieldSet`] for ordered, duplicate-preserving structured context
//! - [`Message`] conversions for strings, errors, and unexpected values
//! - [`Record`], the unit handed to a backend's write path
//! - The [`Logger`] trait plus [`LoggerExt`] level-named convenience methods
//!
//! Backends that pair the contract with daily file rotation live in the
//! sibling crates (`daylog-tracing`, `daylog-log`, `daylog-json`).

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

pub mod field;
mod level;
mod logger;
mod message;
mod record;
pub mod test_support;

pub use field::{Field, FieldSet};
pub use level::Level;
pub use logger::{Logger, LoggerExt};
pub use message::Message;
pub use record::{CallSite, Record};
