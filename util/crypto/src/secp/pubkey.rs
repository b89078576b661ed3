use super::error::Error;
use super::signature::Signature;
use super::{Message, SECP256K1};
use secp256k1::{Message as SecpMessage, PublicKey, XOnlyPublicKey};
use std::fmt;

/// A secp256k1 public key.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub struct Pubkey {
    inner: PublicKey,
}

impl Pubkey {
    /// Checks that `signature` is a valid ECDSA signature for `message` using the public
    /// key `pubkey`
    pub fn verify(&self, message: &Message, signature: &Signature) -> Result<(), Error> {
        let context = &SECP256K1;
        let recoverable_signature = signature.to_recoverable()?;
        let signature = recoverable_signature.to_standard();
        let message = SecpMessage::from_digest(*message);
        context.verify_ecdsa(&message, &signature, &self.inner)?;
        Ok(())
    }

    /// 33 bytes compressed encoding.
    pub fn serialize(&self) -> Vec<u8> {
        self.inner.serialize().to_vec()
    }

    /// 65 bytes uncompressed encoding, prefixed with `0x04`.
    pub fn serialize_uncompressed(&self) -> [u8; 65] {
        self.inner.serialize_uncompressed()
    }

    /// The 32 bytes x-only key used by BIP-340 Schnorr signatures.
    pub fn x_only(&self) -> [u8; 32] {
        let (x_only, _parity): (XOnlyPublicKey, _) = self.inner.x_only_public_key();
        x_only.serialize()
    }

    /// Parses a compressed or uncompressed encoding.
    pub fn from_slice(data: &[u8]) -> Result<Self, Error> {
        Ok(PublicKey::from_slice(data)?.into())
    }
}

impl From<PublicKey> for Pubkey {
    fn from(inner: PublicKey) -> Self {
        Pubkey { inner }
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", faster_hex::hex_string(&self.serialize()))
    }
}
