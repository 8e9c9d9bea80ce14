//! Error-related types.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// A validation error.
///
/// Returned when a value fails its well-formedness check, e.g., a callsign,
/// squawk code, or an argument text form.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub struct ValidationError {
    kind: ValidationErrorKind,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Validation failed: {}", self.kind)
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub(crate) enum ValidationErrorKind {
    #[error("Must not be empty")]
    Empty,
    #[error("Must not exceed {max} bytes")]
    TooLong { max: usize },
    #[error("Invalid byte b'\\x{byte:02x}' at index {at}")]
    InvalidByteAt { byte: u8, at: usize },
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },
    #[error("Not a valid {what}")]
    Malformed { what: &'static str },
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn empty() -> Self {
        Self::new(ValidationErrorKind::Empty)
    }

    pub(crate) fn too_long(max: usize) -> Self {
        Self::new(ValidationErrorKind::TooLong { max })
    }

    pub(crate) fn invalid_byte(byte: u8, at: usize) -> Self {
        Self::new(ValidationErrorKind::InvalidByteAt { byte, at })
    }

    pub(crate) fn out_of_range(what: &'static str) -> Self {
        Self::new(ValidationErrorKind::OutOfRange { what })
    }

    pub(crate) fn malformed(what: &'static str) -> Self {
        Self::new(ValidationErrorKind::Malformed { what })
    }
}
