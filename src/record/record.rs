use super::RecordType;
use crate::digest::digest_record;
use crate::inspect::write_value;
use crate::types::Values;
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::Write;

// ─── Record ─────────────────────────────────────────────────────────────────

/// One instance of a [`RecordType`]: exactly one value per member, in member order.
#[derive(Clone)]
pub struct Record {
    record_type: RecordType,
    pub(crate) values: Vec<Value>,
}

impl Record {
    #[inline]
    pub(crate) fn from_parts(record_type: RecordType, values: Vec<Value>) -> Self {
        debug_assert_eq!(
            record_type.len(),
            values.len(),
            "Record::from_parts: {} members but {} values",
            record_type.len(),
            values.len()
        );
        Self {
            record_type,
            values,
        }
    }

    #[inline]
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    /// Consume the record, returning its values in member order.
    #[inline]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Deterministic xxh64 hash of the `to_map` content.
    /// Strictly equal records always produce the same hash.
    #[inline]
    pub fn hash_code(&self) -> u64 {
        digest_record(self)
    }
}

// ─── Equality / Hash ────────────────────────────────────────────────────────

/// Strict (`eql?`) equality, so that `Eq` and `Hash` agree.
/// Use [`Record::equals`] for numeric-tolerant comparison.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl Eq for Record {}

impl std::hash::Hash for Record {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

// ─── Rendering ──────────────────────────────────────────────────────────────

/// `#<factory Name a=1, b="x">`; the name is empty for anonymous types.
impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#<factory {}", self.record_type.name().unwrap_or(""))?;
        for (i, (name, value)) in self.pairs().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write!(f, " {}=", name)?;
            write_value(f, value)?;
        }
        f.write_char('>')
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in self.pairs() {
            m.serialize_entry(k.as_str(), v)?;
        }
        m.end()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
