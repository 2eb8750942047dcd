// SPDX-License-Identifier: GPL-3.0-only

use storage_types::{CapabilityParseError, UnknownCode};
use thiserror::Error;

use super::ValueType;

/// A response value did not have the shape the caller expected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected {expected}, found {found}")]
    WrongType { expected: ValueType, found: ValueType },

    #[error("integer {value} out of range for {target}")]
    OutOfRange { value: i128, target: &'static str },

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}': {source}")]
    Field {
        field: &'static str,
        source: Box<DecodeError>,
    },

    #[error("expected class '{expected}', found '{found}'")]
    WrongClass { expected: &'static str, found: String },

    #[error("expected {expected} elements, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        source: Box<DecodeError>,
    },

    #[error(transparent)]
    UnknownCode(#[from] UnknownCode),

    #[error("invalid capability table: {0}")]
    Capabilities(#[from] CapabilityParseError),

    #[error("{0}")]
    Invalid(String),
}

impl DecodeError {
    pub(crate) fn in_field(self, field: &'static str) -> Self {
        DecodeError::Field {
            field,
            source: Box::new(self),
        }
    }

    pub(crate) fn at_index(self, index: usize) -> Self {
        DecodeError::Element {
            index,
            source: Box::new(self),
        }
    }
}
