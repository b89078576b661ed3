use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use std::{fmt, str::FromStr};

use crate::{
    codec,
    conversion::{array_from_hex, hex_string},
    core::error::EncodingError,
    prelude::Entity,
};

/// A 32-byte hash.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Byte32([u8; 32]);

impl Byte32 {
    /// Wraps raw bytes.
    pub const fn new(inner: [u8; 32]) -> Self {
        Byte32(inner)
    }

    /// All zeros.
    pub const fn zero() -> Self {
        Byte32([0u8; 32])
    }

    /// Borrows the raw bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Copies out the raw bytes.
    pub fn raw_data(&self) -> [u8; 32] {
        self.0
    }

    /// Creates from a slice of exactly 32 bytes.
    pub fn from_raw_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        codec::check_struct(Self::NAME, slice, 32)?;
        let mut inner = [0u8; 32];
        inner.copy_from_slice(slice);
        Ok(Byte32(inner))
    }
}

impl Entity for Byte32 {
    const NAME: &'static str = "Byte32";

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }

    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        Self::from_raw_slice(slice)
    }
}

impl From<[u8; 32]> for Byte32 {
    fn from(inner: [u8; 32]) -> Self {
        Byte32(inner)
    }
}

impl AsRef<[u8]> for Byte32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex_string(&self.0))
    }
}

impl fmt::Debug for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Byte32({self})")
    }
}

impl FromStr for Byte32 {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        array_from_hex::<32>(s).map(Byte32)
    }
}

impl Serialize for Byte32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Byte32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
