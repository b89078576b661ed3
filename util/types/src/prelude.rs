//! This module includes several traits.
//!
//! Few traits are re-exported from other crates, few are used as aliases and others are syntactic sugar.

use crate::{bytes::Bytes, core::error::EncodingError, packed::Byte32};

pub use crate::conversion::LeNumber;

/// An entity with a canonical molecule encoding.
///
/// The encoding is the wire format and the hash input at the same time.
pub trait Entity: Sized {
    /// The schema name, used in decoding errors.
    const NAME: &'static str;

    /// Appends the canonical encoding to `out`.
    fn write_to(&self, out: &mut Vec<u8>);

    /// Decodes the canonical encoding, rejecting anything else.
    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError>;

    /// The canonical encoding.
    fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_to(&mut out);
        out
    }

    /// The canonical encoding as shared bytes.
    fn as_bytes(&self) -> Bytes {
        Bytes::from(self.to_vec())
    }

    /// Size of the canonical encoding.
    fn serialized_size(&self) -> usize {
        self.to_vec().len()
    }

    /// CKB hash of the canonical encoding.
    fn calc_hash(&self) -> Byte32 {
        ckb_hash::blake2b_256(self.to_vec()).into()
    }
}
