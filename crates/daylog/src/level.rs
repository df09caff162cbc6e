//! Log severity levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered from least to most severe.
///
/// Exactly one level is active per logger instance; records below the active
/// level are suppressed by the backend engine, not by the facade.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// Verbose diagnostics
    Debug = 0,
    /// Routine operational messages
    #[default]
    Info = 1,
    /// Unexpected but recoverable conditions
    Warn = 2,
    /// Failures that leave the process running
    Error = 3,
    /// Failures that terminate the process after the record is written
    Fatal = 4,
    /// Alias severity above fatal, kept for input compatibility
    Panic = 5,
}

impl Level {
    /// Returns a short lowercase name suitable for record output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }

    /// Parses a level name case-insensitively.
    ///
    /// Unrecognized input resolves to [`Level::Info`]. This is a deliberate
    /// lenient default, not a validation gate, so no error is surfaced.
    pub fn parse(input: &str) -> Self {
        match input.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            "fatal" => Self::Fatal,
            "panic" => Self::Panic,
            _ => Self::Info,
        }
    }

    /// Reconstructs a level from its `u8` discriminant.
    ///
    /// Out-of-range values resolve to [`Level::Info`], mirroring [`Level::parse`].
    /// Backends use this to keep the active level in an atomic.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warn,
            3 => Self::Error,
            4 => Self::Fatal,
            5 => Self::Panic,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Level::parse("DEBUG"), Level::Debug);
        assert_eq!(Level::parse("Warn"), Level::Warn);
        assert_eq!(Level::parse("fatal"), Level::Fatal);
        assert_eq!(Level::parse("PaNiC"), Level::Panic);
    }

    #[test]
    fn unknown_input_defaults_to_info() {
        for input in ["", "verbose", "trace", "INFO2", "critical"] {
            assert_eq!(Level::parse(input), Level::Info);
        }
    }

    #[test]
    fn ordering_follows_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Panic);
    }

    #[test]
    fn u8_round_trip() {
        for level in [
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Fatal,
            Level::Panic,
        ] {
            assert_eq!(Level::from_u8(level as u8), level);
        }
        assert_eq!(Level::from_u8(42), Level::Info);
    }
}
