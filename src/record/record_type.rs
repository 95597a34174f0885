use super::Record;
use crate::error::RecordError;
use crate::types::{Accessor, FastMap, Key};
use crate::value::Value;
use smol_str::SmolStr;
use std::sync::Arc;

// ─── Layout ─────────────────────────────────────────────────────────────────

struct Layout {
    name: Option<SmolStr>,
    members: Vec<SmolStr>,
    /// name -> position, built once at definition time.
    index: FastMap<SmolStr, usize>,
}

// ─── RecordType ─────────────────────────────────────────────────────────────

/// Shared handle to a record type: an ordered, immutable list of field names.
///
/// Cloning is cheap. Two handles are the same type only if they come from the
/// same definition; identical field lists defined twice are distinct types.
#[derive(Clone)]
pub struct RecordType {
    inner: Arc<Layout>,
}

impl RecordType {
    /// Define an anonymous record type.
    pub fn new<I, S>(fields: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self::build(None, fields.into_iter().map(Into::into).collect())
    }

    /// Define a record type bound to a public name. The name is not registered
    /// anywhere; see [`crate::Factory`] for a registry.
    pub fn named<I, S>(name: &str, fields: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        if !is_type_name(name) {
            return Err(RecordError::InvalidTypeName(SmolStr::new(name)));
        }
        Self::build(
            Some(SmolStr::new(name)),
            fields.into_iter().map(Into::into).collect(),
        )
    }

    fn build(name: Option<SmolStr>, members: Vec<SmolStr>) -> Result<Self, RecordError> {
        if members.is_empty() {
            return Err(RecordError::NoFields);
        }

        let mut index = FastMap::default();
        for (pos, member) in members.iter().enumerate() {
            if !is_field_name(member) {
                return Err(RecordError::InvalidFieldName(member.clone()));
            }
            if index.insert(member.clone(), pos).is_some() {
                return Err(RecordError::DuplicateField(member.clone()));
            }
        }

        log::debug!(
            "defined record type {} with members {:?}",
            name.as_deref().unwrap_or("<anonymous>"),
            members
        );

        Ok(Self {
            inner: Arc::new(Layout {
                name,
                members,
                index,
            }),
        })
    }

    /// Public name, `None` for anonymous types.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    #[inline]
    pub fn members(&self) -> &[SmolStr] {
        &self.inner.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.members.len()
    }

    /// Always false: a type cannot be defined without fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.members.is_empty()
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.inner.index.get(name).copied()
    }

    /// Resolve a key to a position in `0..len`.
    pub fn resolve(&self, key: Key<'_>) -> Result<usize, RecordError> {
        match key {
            Key::Index(i) => {
                let len = self.len() as i64;
                if i < -len || i >= len {
                    return Err(RecordError::IndexOutOfRange {
                        index: i,
                        len: self.len(),
                    });
                }
                Ok(if i < 0 { (i + len) as usize } else { i as usize })
            }
            Key::Name(name) => self
                .index_of(name)
                .ok_or_else(|| RecordError::UnknownField(SmolStr::new(name))),
        }
    }

    /// Resolve a field once for repeated access through [`Record::read`] and [`Record::write`].
    pub fn accessor(&self, name: &str) -> Result<Accessor, RecordError> {
        let index = self.resolve(Key::Name(name))?;
        Ok(Accessor {
            record_type: self.clone(),
            index,
        })
    }

    /// Build a record from positional values; missing trailing fields are `Nil`.
    pub fn construct<I>(&self, values: I) -> Result<Record, RecordError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() > self.len() {
            return Err(RecordError::TooManyValues {
                given: values.len(),
                expected: self.len(),
            });
        }
        values.resize(self.len(), Value::Nil);
        Ok(Record::from_parts(self.clone(), values))
    }

    /// A record with every field `Nil`.
    pub fn construct_empty(&self) -> Record {
        Record::from_parts(self.clone(), vec![Value::Nil; self.len()])
    }

    #[inline]
    pub fn same_type(&self, other: &RecordType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    #[inline]
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.same_type(other)
    }
}

impl Eq for RecordType {}

impl std::hash::Hash for RecordType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl std::fmt::Debug for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name())
            .field("members", &self.members())
            .finish()
    }
}

// ─── Name validation ────────────────────────────────────────────────────────

/// `[A-Z][A-Za-z0-9_]*`
pub(crate) fn is_type_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
