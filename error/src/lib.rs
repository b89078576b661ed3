//! Underlying error types used over the transaction kit crates.

use std::{error::Error as StdError, fmt, ops::Deref, sync::Arc};

mod convert;
mod internal;
pub mod prelude;
pub mod util;

use derive_more::Display;
pub use internal::{InternalError, InternalErrorKind, OtherError, SilentError};
use prelude::*;

/// A wrapper around a dynamic error type.
#[derive(Debug, Clone)]
pub struct AnyError(Arc<anyhow::Error>);

/// A list specifying categories of error.
///
/// This list is intended to grow over time and it is not recommended to exhaustively match against
/// it.
///
/// It is used with [`Error`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display)]
pub enum ErrorKind {
    /// Bytes or strings failing to parse against the expected schema: wrong length, bad tag,
    /// bad checksum, bad hex.
    Malformed,
    /// An input or cell dep whose out-point cannot be resolved to a cell.
    Unresolvable,
    /// Coin selection exhausted the candidates before meeting the requirement.
    ///
    /// The reason carries the exact shortfall, the caller may top up and retry.
    InsufficientFunds,
    /// A caller supplied strategy broke a monotonicity rule. Always a caller bug.
    InvariantViolation,
    /// The signing primitive failed or returned data of an unexpected shape.
    Signer,
    /// The configuration is invalid.
    Config,
    /// It indicates that the underlying error is [`InternalError`].
    Internal,
    /// Failures raised by externally implemented resolvers, cell sources and oracles.
    External,
}

def_error_base_on_kind!(Error, ErrorKind, "Top-level error type.");

impl<E> From<E> for AnyError
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self(Arc::new(error.into()))
    }
}

impl Deref for AnyError {
    type Target = Arc<anyhow::Error>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
