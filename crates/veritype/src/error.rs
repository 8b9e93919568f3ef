//! Error types for the checking protocol.
//!
//! Every failure is local and synchronous: the single offending access is
//! rejected and prior state is left untouched. There is no retry path and no
//! logging side channel — errors are values, propagated to the caller of the
//! access that triggered them.

use std::fmt;

use thiserror::Error;

pub type TypeResult<T> = Result<T, TypeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A value failed to match its declared descriptor.
    #[error("{0}")]
    Mismatch(Mismatch),

    /// Get or set of a field absent from the descriptor table on a class
    /// without weak typing.
    #[error("field `{0}` doesn't have a declared type")]
    UndeclaredField(String),

    /// No descriptor rule accepts a value of this runtime kind.
    #[error("{0}")]
    UnregisteredKind(UnregisteredKind),

    /// A declared (or weak) field was read before anything was written to it.
    #[error("field `{0}` accessed before it was set")]
    UnsetField(String),

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("no entry for key {0}")]
    MissingKey(String),
}

impl TypeError {
    pub fn mismatch(
        field: Option<&str>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self::Mismatch(Mismatch {
            field: field.map(str::to_owned),
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }

    pub fn unregistered(field: Option<&str>, kind: impl fmt::Display) -> Self {
        Self::UnregisteredKind(UnregisteredKind {
            field: field.map(str::to_owned),
            kind: kind.to_string(),
        })
    }
}

/// The expected/actual pair behind `TypeError::Mismatch`. For unions,
/// `expected` carries the full alternative list joined by ` or `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub field: Option<String>,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        field_prefix(f, &self.field)?;
        write!(f, "expected {}, got {}", self.expected, self.actual)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisteredKind {
    pub field: Option<String>,
    pub kind: String,
}

impl fmt::Display for UnregisteredKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        field_prefix(f, &self.field)?;
        write!(f, "runtime kind `{}` doesn't fulfil any type descriptor", self.kind)
    }
}

fn field_prefix(f: &mut fmt::Formatter<'_>, field: &Option<String>) -> fmt::Result {
    match field {
        Some(name) => write!(f, "field `{name}`: "),
        None => Ok(()),
    }
}
