/// Typed Accessors
///
/// Thin conversions from the untyped tree to concrete types.
/// The caller navigates to the right node first; no schema validation happens here.
/// A shape mismatch is reported as an `AccessError` instead of guessing a default.
use crate::value::{SequenceKind, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("expected a scalar, found a sequence")]
    NotAScalar,

    #[error("expected a sequence, found scalar '{0}'")]
    NotASequence(String),

    #[error("expected a key/value sequence")]
    NotAKeyValueSequence,

    #[error("'{0}' is not a valid integer")]
    NotAnInteger(String),

    #[error("'{0}' is not a boolean")]
    NotABoolean(String),

    #[error("missing key '{0}'")]
    MissingKey(String),

    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl Value {
    fn scalar_text(&self) -> Result<&str, AccessError> {
        self.raw().ok_or(AccessError::NotAScalar)
    }

    fn sequence_items(&self) -> Result<&[Value], AccessError> {
        match self {
            Value::Sequence { items, .. } => Ok(items),
            Value::Scalar(raw) => Err(AccessError::NotASequence(raw.clone())),
        }
    }

    pub fn as_int(&self) -> Result<i64, AccessError> {
        let raw = self.scalar_text()?;
        raw.parse()
            .map_err(|_| AccessError::NotAnInteger(raw.to_string()))
    }

    pub fn as_bool(&self) -> Result<bool, AccessError> {
        match self.scalar_text()? {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(AccessError::NotABoolean(other.to_string())),
        }
    }

    /// Raw scalar text; escape sequences are not interpreted
    pub fn as_string(&self) -> Result<String, AccessError> {
        self.scalar_text().map(str::to_string)
    }

    pub fn as_int_seq(&self) -> Result<Vec<i64>, AccessError> {
        self.sequence_items()?.iter().map(Value::as_int).collect()
    }

    pub fn as_string_seq(&self) -> Result<Vec<String>, AccessError> {
        self.sequence_items()?.iter().map(Value::as_string).collect()
    }

    /// Positional access into any sequence
    pub fn at(&self, index: usize) -> Result<&Value, AccessError> {
        let items = self.sequence_items()?;
        items.get(index).ok_or(AccessError::IndexOutOfRange {
            index,
            len: items.len(),
        })
    }

    /// Linear scan over adjacent key/value pairs; a repeated key resolves to its last occurrence
    pub fn get(&self, key: &str) -> Result<&Value, AccessError> {
        let items = match self {
            Value::Sequence {
                kind: SequenceKind::KeyValue,
                items,
            } => items,
            _ => return Err(AccessError::NotAKeyValueSequence),
        };

        items
            .chunks_exact(2)
            .rev()
            .find(|pair| pair[0].raw() == Some(key))
            .map(|pair| &pair[1])
            .ok_or_else(|| AccessError::MissingKey(key.to_string()))
    }
}
