use super::Record;
use crate::error::RecordError;
use crate::types::{Accessor, AsKey, Key, Pairs, Values};
use crate::value::{Value, ValueMap};
use smol_str::SmolStr;

impl Record {
    // ════════════════════════════════════════════════════════════════════════
    // Keyed access
    // ════════════════════════════════════════════════════════════════════════

    /// Get a field by position (negative counts from the end) or by name.
    ///
    /// `IndexOutOfRange` outside `[-len, len)`, `UnknownField` for a missing
    /// name, `UnsupportedKey` for a key that is neither.
    #[inline]
    pub fn get<K: AsKey>(&self, key: K) -> Result<&Value, RecordError> {
        let pos = self.record_type().resolve(key.as_key()?)?;
        Ok(&self.values[pos])
    }

    /// Get a field through a pre-resolved accessor. O(1), no hashing.
    #[inline]
    pub fn read(&self, accessor: &Accessor) -> Result<&Value, RecordError> {
        self.check_accessor(accessor)?;
        Ok(&self.values[accessor.index])
    }

    #[inline]
    pub(crate) fn check_accessor(&self, accessor: &Accessor) -> Result<(), RecordError> {
        if !accessor.record_type.same_type(self.record_type()) || accessor.index >= self.values.len() {
            return Err(RecordError::ForeignAccessor);
        }
        Ok(())
    }

    /// Values at the given keys, resolved like [`Record::get`].
    pub fn values_at<I>(&self, keys: I) -> Result<Vec<&Value>, RecordError>
    where
        I: IntoIterator,
        I::Item: AsKey,
    {
        keys.into_iter().map(|k| self.get(k)).collect()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Shape
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn members(&self) -> &[SmolStr] {
        self.record_type().members()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Iteration
    // ════════════════════════════════════════════════════════════════════════

    /// Values in member order. Each call starts a fresh iterator.
    #[inline]
    pub fn iter(&self) -> Values<'_> {
        Values {
            record: self,
            pos: 0,
        }
    }

    /// `(name, value)` pairs in member order. Each call starts a fresh iterator.
    #[inline]
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs {
            record: self,
            pos: 0,
        }
    }

    /// Run `f` on every value in member order.
    pub fn each<F: FnMut(&Value)>(&self, mut f: F) -> &Self {
        self.iter().for_each(|v| f(v));
        self
    }

    /// Run `f` on every `(name, value)` pair in member order.
    pub fn each_pair<F: FnMut(&SmolStr, &Value)>(&self, mut f: F) -> &Self {
        self.pairs().for_each(|(k, v)| f(k, v));
        self
    }

    pub fn select<F: FnMut(&Value) -> bool>(&self, mut predicate: F) -> Vec<&Value> {
        self.iter().filter(|v| predicate(*v)).collect()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Conversions
    // ════════════════════════════════════════════════════════════════════════

    pub fn to_array(&self) -> Vec<Value> {
        self.values.clone()
    }

    #[inline]
    pub fn values(&self) -> Vec<Value> {
        self.to_array()
    }

    /// Member name -> value, in member order.
    pub fn to_map(&self) -> ValueMap {
        self.pairs().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Nested lookup
    // ════════════════════════════════════════════════════════════════════════

    /// Look up `name`, then follow `path` through nested maps, arrays and records.
    ///
    /// `name` must be a field name (`InvalidDigKey` otherwise). Returns `None`
    /// when any hop is missing or holds `Nil`, the final one included. Hopping
    /// into a scalar is `NotDiggable`.
    pub fn dig<K: AsKey>(&self, name: K, path: &[Key<'_>]) -> Result<Option<&Value>, RecordError> {
        let name = match name.as_key() {
            Ok(Key::Name(n)) => n,
            Ok(Key::Index(i)) => return Err(RecordError::InvalidDigKey(i.to_string())),
            Err(RecordError::UnsupportedKey(type_name)) => {
                return Err(RecordError::InvalidDigKey(type_name.to_string()));
            }
            Err(e) => return Err(e),
        };

        let Some(pos) = self.record_type().index_of(name) else {
            return Ok(None);
        };
        let mut current = &self.values[pos];
        for key in path {
            match dig_step(current, *key)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok((!current.is_nil()).then_some(current))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Equality
    // ════════════════════════════════════════════════════════════════════════

    /// `==`: same record type and pairwise equal values (`5555 == 5555.0`).
    pub fn equals(&self, other: &Record) -> bool {
        self.record_type().same_type(other.record_type())
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.loose_eq(b))
    }

    /// `eql?`: same record type and strictly equal values (`5555 != 5555.0`).
    pub fn strict_equals(&self, other: &Record) -> bool {
        self.record_type().same_type(other.record_type())
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.strict_eq(b))
    }
}

fn dig_step<'v>(value: &'v Value, key: Key<'_>) -> Result<Option<&'v Value>, RecordError> {
    match value {
        Value::Nil => Ok(None),
        Value::Map(map) => Ok(match key {
            Key::Name(n) => map.get(n),
            Key::Index(_) => None,
        }),
        Value::Array(arr) => match key {
            Key::Index(i) => {
                let len = arr.len() as i64;
                let pos = if i < 0 { i + len } else { i };
                Ok(usize::try_from(pos).ok().and_then(|p| arr.get(p)))
            }
            Key::Name(_) => Err(RecordError::UnsupportedKey("String")),
        },
        Value::Record(record) => match key {
            Key::Name(n) => Ok(record.record_type().index_of(n).map(|p| &record.values[p])),
            Key::Index(i) => Err(RecordError::InvalidDigKey(i.to_string())),
        },
        other => Err(RecordError::NotDiggable(other.type_name())),
    }
}
