//! Daily log rotation, midnight scheduling, and gzip compaction
//!
//! This crate owns the file side of the logging pipeline:
//! - [`RotationState`] holds the open handle for the current calendar day and
//!   performs the concurrency-safe day-boundary swap
//! - [`Scheduler`] is the cancellable background task that wakes at local
//!   midnight, swaps the file, and compresses the retired one
//! - [`compress`] streams a retired file into a `.gz` archive and removes the
//!   original only once the archive is complete
//! - [`RotationWriter`] / [`TeeWriter`] give backends an `io::Write` target
//!   that always resolves to the current day's file (plus a console echo)

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod compress;
mod error;
mod scheduler;
mod state;
mod writer;

pub use compress::{archive_path, compress};
pub use error::{Error, Result};
pub use scheduler::{Scheduler, rotate_once, until_next_midnight};
pub use state::{RetiredFile, RotationState};
pub use writer::{RotationWriter, TeeWriter};

/// Default log directory, relative to the process working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";
