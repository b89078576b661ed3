use super::error::Error;
use super::signature::Signature;
use super::{Message, SECP256K1};
use secp256k1::{Message as SecpMessage, PublicKey, SecretKey};
use std::{fmt, str::FromStr};

/// A secp256k1 private key.
#[derive(Clone, Eq, PartialEq)]
pub struct Privkey {
    inner: [u8; 32],
}

impl Privkey {
    /// Signs a 32 bytes digest, producing `r ‖ s ‖ recovery_id`.
    pub fn sign_recoverable(&self, message: &Message) -> Result<Signature, Error> {
        let context = &SECP256K1;
        let privkey = SecretKey::from_slice(&self.inner)?;
        let message = SecpMessage::from_digest(*message);
        let data = context.sign_ecdsa_recoverable(&message, &privkey);
        let (rec_id, data) = data.serialize_compact();
        Ok(Signature::from_compact(rec_id, data))
    }

    /// Derives the public key.
    pub fn pubkey(&self) -> Result<super::Pubkey, Error> {
        let context = &SECP256K1;
        let privkey = SecretKey::from_slice(&self.inner)?;
        Ok(PublicKey::from_secret_key(context, &privkey).into())
    }

    /// Creates from exactly 32 bytes. The scalar range is checked when the key is used.
    pub fn from_slice(key: &[u8]) -> Result<Self, Error> {
        let inner: [u8; 32] = key.try_into().map_err(|_| Error::InvalidPrivKey)?;
        Ok(Privkey { inner })
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.inner
    }
}

impl From<[u8; 32]> for Privkey {
    fn from(inner: [u8; 32]) -> Self {
        Privkey { inner }
    }
}

impl FromStr for Privkey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != 64 {
            return Err(Error::InvalidPrivKey);
        }
        let mut inner = [0u8; 32];
        faster_hex::hex_decode(hex.as_bytes(), &mut inner)
            .map_err(|err| Error::InvalidHex(err.to_string()))?;
        Ok(Privkey { inner })
    }
}

impl fmt::Debug for Privkey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Privkey(..)")
    }
}
