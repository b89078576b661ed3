//! The error types to malformed bytes, addresses and unresolvable out-points.

use crate::packed::OutPoint;
use ckb_error::{Error, ErrorKind, impl_error_conversion_with_kind, prelude::*};
use molecule::error::VerificationError;

/// Errors raised while decoding bytes or strings into entities.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// The bytes do not match the molecule layout of the entity.
    #[error("{0}")]
    Schema(VerificationError),

    /// The script hash type byte is none of `data`, `type`, `data1` or `data2`.
    #[error("InvalidHashType({0:#04x})")]
    InvalidHashType(u8),

    /// The dep type byte is neither `code` nor `dep_group`.
    #[error("InvalidDepType({0:#04x})")]
    InvalidDepType(u8),

    /// A fixed-width value has another length.
    #[error("InvalidLength({name}): expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// What was being decoded.
        name: &'static str,
        /// The required length.
        expected: usize,
        /// The actual length.
        actual: usize,
    },

    /// A hex string which is odd in length or contains non-hex characters.
    #[error("InvalidHex({0})")]
    InvalidHex(String),

    /// A string naming an enum variant which does not exist.
    #[error("UnknownName({kind}: {value})")]
    UnknownName {
        /// The enum being parsed.
        kind: &'static str,
        /// The offending string.
        value: String,
    },

    /// A decimal number which does not fit or does not parse.
    #[error("InvalidNumber({0})")]
    InvalidNumber(String),
}

impl From<VerificationError> for EncodingError {
    fn from(error: VerificationError) -> Self {
        EncodingError::Schema(error)
    }
}

impl_error_conversion_with_kind!(EncodingError, ErrorKind::Malformed, Error);

/// Errors due to an address string that cannot be decoded into a script.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum AddressError {
    /// The bech32 or bech32m layer is broken, including a checksum of the wrong variant.
    #[error("InvalidEncoding({0})")]
    InvalidEncoding(String),

    /// The human-readable part is not the expected network prefix.
    #[error("PrefixMismatch: expected {expected}, got {actual}")]
    PrefixMismatch {
        /// The prefix the caller asked for.
        expected: String,
        /// The prefix in the address.
        actual: String,
    },

    /// The first payload byte is not a known format.
    #[error("UnknownFormat({0:#04x})")]
    UnknownFormat(u8),

    /// The short format refers to a code hash index which does not exist.
    #[error("UnknownCodeHashIndex({0})")]
    UnknownCodeHashIndex(u8),

    /// The payload is too short or inconsistent with its format.
    #[error("InvalidPayload({0})")]
    InvalidPayload(String),
}

impl_error_conversion_with_kind!(AddressError, ErrorKind::Malformed, Error);

/// Errors due to the fact that an out-point cannot be turned into a cell.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum OutPointError {
    /// The resolver does not know the cell.
    #[error("Unknown({0})")]
    Unknown(OutPoint),
}

impl_error_conversion_with_kind!(OutPointError, ErrorKind::Unresolvable, Error);
