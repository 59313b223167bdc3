//! Explicit snapshot schema
//!
//! Each configuration section lists its fields, in output order, as one of
//! a closed set of value kinds. Anything outside these kinds cannot reach
//! the serializer.

use serde::ser::{Serialize, SerializeMap, Serializer};
use setupsmarters_core::GridCell;

/// The value kinds a snapshot field may hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Float(f64),
    Int(i64),
    Bool(bool),
    Cells(&'a [GridCell]),
}

impl FieldValue<'_> {
    /// Reason this value has no JSON form, if any.
    pub fn unrepresentable(&self) -> Option<String> {
        match self {
            FieldValue::Float(v) if v.is_nan() => Some("NaN has no JSON representation".to_string()),
            FieldValue::Float(v) if v.is_infinite() => {
                Some(format!("{} has no JSON representation", v))
            }
            _ => None,
        }
    }
}

impl Serialize for FieldValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Str(v) => serializer.serialize_str(v),
            FieldValue::Float(v) => serializer.serialize_f64(*v),
            FieldValue::Int(v) => serializer.serialize_i64(*v),
            FieldValue::Bool(v) => serializer.serialize_bool(*v),
            FieldValue::Cells(cells) => serializer.collect_seq(cells.iter()),
        }
    }
}

/// A top-level snapshot section.
pub trait SnapshotSection {
    /// Key of the section in the snapshot object
    const KEY: &'static str;

    /// Fields in declaration order.
    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)>;
}

/// Ordered field list rendered as a JSON object.
pub(crate) struct FieldMap<'a>(pub &'a [(&'static str, FieldValue<'a>)]);

impl Serialize for FieldMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
