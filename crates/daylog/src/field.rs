//! Ordered structured fields and the flat key/value codec

use serde::Serialize;
use serde_json::Value;

/// A single named piece of structured context attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Field name. Duplicates across a [`FieldSet`] are allowed and retained.
    pub name: String,
    /// Field value, kept opaque until a backend encodes it.
    pub value: Value,
}

/// An ordered collection of [`Field`]s.
///
/// Insertion order is preserved and duplicate names are retained; backends
/// stream entries rather than collecting them into a map, so the last writer
/// never overwrites an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldSet {
    fields: Vec<Field>,
    #[serde(skip)]
    dropped: usize,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field set from a flat alternating key/value sequence.
    ///
    /// Pairing rules:
    /// - an odd-length sequence drops its final unmatched element
    /// - a non-string key at an even index drops that pair only, never the
    ///   whole sequence
    ///
    /// Malformed input is not an error; dropped pairs are counted and exposed
    /// through [`FieldSet::dropped`] so silent data loss stays observable.
    pub fn from_flat(args: Vec<Value>) -> Self {
        let mut fields = Vec::with_capacity(args.len() / 2);
        let mut dropped = 0;
        let mut iter = args.into_iter();
        while let Some(key) = iter.next() {
            let Some(value) = iter.next() else {
                dropped += 1;
                break;
            };
            match key {
                Value::String(name) => fields.push(Field { name, value }),
                _ => dropped += 1,
            }
        }
        Self { fields, dropped }
    }

    /// Appends a field, converting the value through serde.
    pub fn push(&mut self, name: impl Into<String>, value: impl Serialize) {
        self.fields.push(Field {
            name: name.into(),
            value: to_value(value),
        });
    }

    /// Iterates over fields in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Number of retained fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were retained.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of malformed pairs dropped while building this set.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Converts any serializable value into an opaque field value.
///
/// Values that fail to serialize collapse to `null` rather than failing the
/// log call.
pub fn to_value(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Builds a [`FieldSet`] from a flat alternating key/value list.
///
/// ```
/// use daylog::fields;
///
/// let set = fields!["port", 8080, "proto", "http"];
/// assert_eq!(set.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::FieldSet::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::FieldSet::from_flat(vec![$($crate::field::to_value($item)),+])
    };
}
