use crate::{Error, ErrorKind, def_error_base_on_kind, impl_error_conversion_with_kind};
use derive_more::Display;
use std::fmt;

/// An error with no reason.
#[derive(Error, Debug, Clone, Copy)]
#[error("no reason is provided")]
pub struct SilentError;

/// An error with only a string as the reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct OtherError(String);

/// A list specifying categories of internal errors.
///
/// Internal errors are never caused by the caller's input, they point at a bug or an exhausted
/// numeric range.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum InternalErrorKind {
    /// An arithmetic overflow occurs during capacity calculation,
    /// e.g. `Capacity::safe_add`
    CapacityOverflow,

    /// An arithmetic overflow occurs during token balance calculation.
    BalanceOverflow,

    /// Unknown system error
    System,
}

def_error_base_on_kind!(
    InternalError,
    InternalErrorKind,
    "An error caused by an internal inconsistency."
);

impl_error_conversion_with_kind!(InternalError, ErrorKind::Internal, Error);

impl From<InternalErrorKind> for Error {
    fn from(kind: InternalErrorKind) -> Self {
        Into::<InternalError>::into(kind).into()
    }
}

impl OtherError {
    /// Creates an error with only a string as the reason.
    pub fn new<T>(reason: T) -> Self
    where
        T: fmt::Display,
    {
        Self(reason.to_string())
    }
}
