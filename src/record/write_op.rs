use super::Record;
use crate::error::RecordError;
use crate::types::{Accessor, AsKey};
use crate::value::Value;

impl Record {
    /// Set a field by position or name. Same key rules as [`Record::get`].
    #[inline]
    pub fn set<K: AsKey>(&mut self, key: K, value: impl Into<Value>) -> Result<(), RecordError> {
        *self.get_mut(key)? = value.into();
        Ok(())
    }

    /// Set a field and return the value it held before.
    pub fn replace<K: AsKey>(&mut self, key: K, value: impl Into<Value>) -> Result<Value, RecordError> {
        Ok(std::mem::replace(self.get_mut(key)?, value.into()))
    }

    /// Mutable access to a field by position or name.
    pub fn get_mut<K: AsKey>(&mut self, key: K) -> Result<&mut Value, RecordError> {
        let pos = self.record_type().resolve(key.as_key()?)?;
        Ok(&mut self.values[pos])
    }

    /// Set a field through a pre-resolved accessor. O(1), no hashing.
    #[inline]
    pub fn write(&mut self, accessor: &Accessor, value: impl Into<Value>) -> Result<(), RecordError> {
        self.check_accessor(accessor)?;
        self.values[accessor.index] = value.into();
        Ok(())
    }
}
