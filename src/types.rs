use crate::error::RecordError;
use crate::record::{Record, RecordType};
use crate::value::{Number, Value};
use rustc_hash::FxHasher;
use smol_str::SmolStr;
use std::hash::BuildHasherDefault;

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;

// ─── Key ────────────────────────────────────────────────────────────────────

/// A resolved access key: a position (negative counts from the end) or a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Index(i64),
    Name(&'a str),
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl From<i64> for Key<'_> {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key<'_> {
    fn from(index: i32) -> Self {
        Key::Index(index as i64)
    }
}

/// Anything that can be used to address a field.
///
/// Integers and strings always convert; a [`Value`] converts only when it
/// holds an integer or a string, otherwise `UnsupportedKey` (TypeError).
pub trait AsKey {
    fn as_key(&self) -> Result<Key<'_>, RecordError>;
}

impl AsKey for Key<'_> {
    #[inline]
    fn as_key(&self) -> Result<Key<'_>, RecordError> {
        Ok(*self)
    }
}

macro_rules! signed_as_key {
    ($($t:ty),*) => {$(
        impl AsKey for $t {
            #[inline]
            fn as_key(&self) -> Result<Key<'_>, RecordError> {
                Ok(Key::Index(*self as i64))
            }
        }
    )*};
}

signed_as_key!(i8, i16, i32, i64);

impl AsKey for isize {
    #[inline]
    fn as_key(&self) -> Result<Key<'_>, RecordError> {
        Ok(Key::Index(*self as i64))
    }
}

impl AsKey for usize {
    #[inline]
    fn as_key(&self) -> Result<Key<'_>, RecordError> {
        // Anything past i64::MAX is out of range for every record anyway.
        Ok(Key::Index(i64::try_from(*self).unwrap_or(i64::MAX)))
    }
}

impl AsKey for u32 {
    #[inline]
    fn as_key(&self) -> Result<Key<'_>, RecordError> {
        Ok(Key::Index(*self as i64))
    }
}

impl AsKey for str {
    #[inline]
    fn as_key(&self) -> Result<Key<'_>, RecordError> {
        Ok(Key::Name(self))
    }
}

impl AsKey for String {
    #[inline]
    fn as_key(&self) -> Result<Key<'_>, RecordError> {
        Ok(Key::Name(self.as_str()))
    }
}

impl AsKey for SmolStr {
    #[inline]
    fn as_key(&self) -> Result<Key<'_>, RecordError> {
        Ok(Key::Name(self.as_str()))
    }
}

impl AsKey for Value {
    fn as_key(&self) -> Result<Key<'_>, RecordError> {
        match self {
            Value::Str(s) => Ok(Key::Name(s.as_str())),
            Value::Number(n @ (Number::I64(_) | Number::U64(_))) => Ok(Key::Index(
                n.as_i64().unwrap_or(i64::MAX),
            )),
            other => Err(RecordError::UnsupportedKey(other.type_name())),
        }
    }
}

impl<T: AsKey + ?Sized> AsKey for &T {
    #[inline]
    fn as_key(&self) -> Result<Key<'_>, RecordError> {
        (**self).as_key()
    }
}

// ─── Accessor (cached field position) ───────────────────────────────────────

/// A field resolved once against a record type, for O(1) repeat access.
///
/// Only valid for records of the type that produced it; using it on any
/// other record fails with `ForeignAccessor`. Holds its type alive, so a
/// later type can never be mistaken for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub(crate) record_type: RecordType,
    pub(crate) index: usize,
}

impl Accessor {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }
}

// ─── Iterators ──────────────────────────────────────────────────────────────

/// Values of a record in field order.
#[derive(Clone)]
pub struct Values<'a> {
    pub(crate) record: &'a Record,
    pub(crate) pos: usize,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.record.values.get(self.pos)?;
        self.pos += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.record.values.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Values<'a> {}

/// `(name, value)` pairs of a record in field order.
#[derive(Clone)]
pub struct Pairs<'a> {
    pub(crate) record: &'a Record,
    pub(crate) pos: usize,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a SmolStr, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.record.values.get(self.pos)?;
        let name = &self.record.record_type().members()[self.pos];
        self.pos += 1;
        Some((name, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.record.values.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Pairs<'a> {}
