//! Log message conversions

use crate::Level;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// The rendered message of a single log call.
///
/// A message is either a string, the textual form of an error, or a
/// diagnostic rendering of an unexpected value. Nothing is ever discarded:
/// values the facade does not recognize are downgraded to a descriptive
/// string and logged at the originally requested level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Message(Cow<'static, str>);

impl Message {
    /// Borrows the rendered message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders an error value as its textual form.
    ///
    /// The structured error type is lost by design; backends only ever see
    /// the `Display` rendering.
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self(Cow::Owned(err.to_string()))
    }

    /// Produces a diagnostic message for a value of an unexpected type.
    ///
    /// The result embeds the requested level name, the `Debug` rendering of
    /// the value, and its type name.
    pub fn unexpected<T: fmt::Debug>(level: Level, value: &T) -> Self {
        Self(Cow::Owned(format!(
            "{} message {:?} has unknown type {}",
            level,
            value,
            std::any::type_name::<T>()
        )))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Self(Cow::Owned(s.to_owned()))
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl From<Cow<'static, str>> for Message {
    fn from(s: Cow<'static, str>) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn error_values_render_their_textual_form() {
        let err = io::Error::new(io::ErrorKind::NotFound, "missing thing");
        let msg = Message::from_error(&err);
        assert_eq!(msg.as_str(), "missing thing");
    }

    #[test]
    fn unexpected_values_become_diagnostics() {
        let msg = Message::unexpected(Level::Debug, &42);
        assert!(msg.as_str().contains("debug"));
        assert!(msg.as_str().contains("42"));
        assert!(msg.as_str().contains("i32"));
    }

    #[test]
    fn string_conversions() {
        assert_eq!(Message::from("hello").as_str(), "hello");
        assert_eq!(Message::from(String::from("owned")).as_str(), "owned");
    }
}
