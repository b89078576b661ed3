use super::error::Error;
use super::pubkey::Pubkey;
use super::{Message, SECP256K1};
use faster_hex::hex_string;
use secp256k1::Message as SecpMessage;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use std::fmt;

/// RecoverableSignature compact serialize: `r ‖ s ‖ recovery_id`.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature([u8; 65]);

/// The curve order, big-endian.
const N: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

impl Signature {
    /// Get a slice into the 'r' portion of the data.
    pub fn r(&self) -> &[u8] {
        &self.0[0..32]
    }

    /// Get a slice into the 's' portion of the data.
    pub fn s(&self) -> &[u8] {
        &self.0[32..64]
    }

    /// Get the recovery id.
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// Builds from the compact serialization of a recoverable signature.
    pub fn from_compact(rec_id: RecoveryId, ret: [u8; 64]) -> Self {
        let mut data = [0; 65];
        data[0..64].copy_from_slice(&ret[0..64]);
        data[64] = Into::<i32>::into(rec_id) as u8;
        Signature(data)
    }

    /// Create a signature object from the sig.
    pub fn from_rsv(r: &[u8; 32], s: &[u8; 32], v: u8) -> Self {
        let mut sig = [0u8; 65];
        sig[0..32].copy_from_slice(r);
        sig[32..64].copy_from_slice(s);
        sig[64] = v;
        Signature(sig)
    }

    /// Parses 65 bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self, Error> {
        let sig: [u8; 65] = data.try_into().map_err(|_| Error::InvalidSignature)?;
        Ok(Signature(sig))
    }

    /// Check if each component of the signature is in range.
    pub fn is_valid(&self) -> bool {
        let in_range = |n: &[u8]| n < &N[..] && n.iter().any(|b| *b != 0);
        self.v() <= 1 && in_range(self.r()) && in_range(self.s())
    }

    /// Converts compact signature to a recoverable signature
    pub fn to_recoverable(&self) -> Result<RecoverableSignature, Error> {
        let recovery_id = RecoveryId::try_from(i32::from(self.0[64]))?;
        Ok(RecoverableSignature::from_compact(
            &self.0[0..64],
            recovery_id,
        )?)
    }

    /// Determines the public key for signature
    pub fn recover(&self, message: &Message) -> Result<Pubkey, Error> {
        let context = &SECP256K1;
        let recoverable_signature = self.to_recoverable()?;
        let message = SecpMessage::from_digest(*message);
        let pubkey = context.recover_ecdsa(&message, &recoverable_signature)?;
        Ok(pubkey.into())
    }

    /// The 65 bytes.
    pub fn serialize(&self) -> Vec<u8> {
        Vec::from(&self.0[..])
    }

    /// The 65 bytes, borrowed.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// `r ‖ s ‖ v` with `v` offset by 27, as EVM wallets return it.
    pub fn to_evm_rsv(&self) -> [u8; 65] {
        let mut rsv = self.0;
        rsv[64] += 27;
        rsv
    }

    /// The Bitcoin compact form `header ‖ r ‖ s` for a compressed public key.
    pub fn to_bitcoin_compact(&self) -> [u8; 65] {
        let mut compact = [0u8; 65];
        compact[0] = 27 + 4 + self.v();
        compact[1..].copy_from_slice(&self.0[..64]);
        compact
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.debug_struct("Signature")
            .field("r", &hex_string(&self.0[0..32]))
            .field("s", &hex_string(&self.0[32..64]))
            .field("v", &hex_string(&self.0[64..65]))
            .finish()
    }
}

impl From<[u8; 65]> for Signature {
    fn from(sig: [u8; 65]) -> Self {
        Signature(sig)
    }
}
