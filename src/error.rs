// ─── Error ──────────────────────────────────────────────────────────────────
use smol_str::SmolStr;
use thiserror::Error;

/// Broad failure category, matching the four ways a record operation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NameError,
    IndexError,
    TypeError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("wrong number of arguments (given 0, expected 1+)")]
    NoFields,
    #[error("duplicate member: {0}")]
    DuplicateField(SmolStr),
    #[error("factory size differs (given {given}, expected at most {expected})")]
    TooManyValues { given: usize, expected: usize },
    #[error("identifier {0} needs to be constant")]
    InvalidTypeName(SmolStr),
    #[error("invalid field name: {0}")]
    InvalidFieldName(SmolStr),
    #[error("record type {0} is already defined")]
    TypeAlreadyDefined(SmolStr),
    #[error("no member '{0}' in factory")]
    UnknownField(SmolStr),
    #[error("offset {index} out of range for factory(size: {len})")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("no implicit conversion of {0} into Integer")]
    UnsupportedKey(&'static str),
    #[error("{0} is not a symbol nor a string")]
    InvalidDigKey(String),
    #[error("{0} does not have #dig method")]
    NotDiggable(&'static str),
    #[error("accessor belongs to a different record type")]
    ForeignAccessor,
}

impl RecordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::NoFields
            | RecordError::DuplicateField(_)
            | RecordError::TooManyValues { .. } => ErrorKind::InvalidArgument,
            RecordError::InvalidTypeName(_)
            | RecordError::InvalidFieldName(_)
            | RecordError::TypeAlreadyDefined(_)
            | RecordError::UnknownField(_) => ErrorKind::NameError,
            RecordError::IndexOutOfRange { .. } => ErrorKind::IndexError,
            RecordError::UnsupportedKey(_)
            | RecordError::InvalidDigKey(_)
            | RecordError::NotDiggable(_)
            | RecordError::ForeignAccessor => ErrorKind::TypeError,
        }
    }
}
