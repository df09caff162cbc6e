//! Error types for rotation and compaction

use std::io;
use std::path::PathBuf;

/// Result type for rotation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rotating or compacting log files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to create the log directory
    #[error("failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to open or create a day's log file
    #[error("failed to open log file at {path}: {source}")]
    OpenFile {
        /// The file that could not be opened
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to compress a rotated log file
    #[error("failed to compress {path}: {source}")]
    Compress {
        /// The source file that was being compressed
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
}
