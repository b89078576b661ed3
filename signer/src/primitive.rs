//! Signing primitives.
//!
//! Each trait is the narrow interface a key holder exposes to one signer strategy. [`Privkey`]
//! implements all of them except the Nostr one.

use async_trait::async_trait;
use ckb_crypto::secp::{Privkey, Pubkey};
use ckb_error::Error;
use ckb_types::bytes::Bytes;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

use crate::error::SignerError;

const BITCOIN_MESSAGE_PREFIX: &[u8] = b"\x18Bitcoin Signed Message:\n";
const EVM_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Signs digests with a secp256k1 key, producing `r ‖ s ‖ recovery_id`.
#[async_trait]
pub trait RecoverableSign: Send + Sync {
    fn public_key(&self) -> Result<Pubkey, Error>;

    async fn sign_recoverable(&self, digest: &[u8; 32]) -> Result<Bytes, Error>;
}

/// Signs messages the way Bitcoin wallets do, producing `header ‖ r ‖ s`.
#[async_trait]
pub trait BitcoinMessageSign: Send + Sync {
    /// The compressed public key.
    fn public_key(&self) -> Result<Pubkey, Error>;

    async fn sign_message(&self, message: &str) -> Result<Bytes, Error>;
}

/// Signs messages the way EVM wallets do with `personal_sign`, producing `r ‖ s ‖ v`.
#[async_trait]
pub trait EvmMessageSign: Send + Sync {
    fn address(&self) -> Result<[u8; 20], Error>;

    async fn personal_sign(&self, message: &[u8]) -> Result<Bytes, Error>;
}

/// Signs Nostr event ids with a BIP-340 Schnorr key.
#[async_trait]
pub trait NostrEventSign: Send + Sync {
    /// The x-only public key.
    fn public_key(&self) -> Result<[u8; 32], Error>;

    /// Returns the 64 bytes Schnorr signature of the event id.
    async fn sign_event_id(&self, id: &[u8; 32]) -> Result<Bytes, Error>;
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// `ripemd160(sha256(data))`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

fn write_varint(out: &mut Vec<u8>, n: usize) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&(n as u64).to_le_bytes());
        }
    }
}

/// The digest a Bitcoin wallet signs for `message`.
pub fn bitcoin_message_hash(message: &[u8]) -> [u8; 32] {
    let mut data = Vec::with_capacity(BITCOIN_MESSAGE_PREFIX.len() + 9 + message.len());
    data.extend_from_slice(BITCOIN_MESSAGE_PREFIX);
    write_varint(&mut data, message.len());
    data.extend_from_slice(message);
    sha256(&sha256(&data))
}

/// The digest an EVM wallet signs for `message` with `personal_sign`.
pub fn evm_message_hash(message: &[u8]) -> [u8; 32] {
    let mut data = EVM_MESSAGE_PREFIX.to_vec();
    data.extend_from_slice(message.len().to_string().as_bytes());
    data.extend_from_slice(message);
    keccak256(&data)
}

/// The EVM address of `pubkey`: the last 20 bytes of the keccak256 of the uncompressed key.
pub fn evm_address(pubkey: &Pubkey) -> [u8; 20] {
    let uncompressed = pubkey.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

fn privkey_pubkey(privkey: &Privkey) -> Result<Pubkey, Error> {
    privkey
        .pubkey()
        .map_err(|err| SignerError::InvalidKey(err.to_string()).into())
}

fn sign_digest(privkey: &Privkey, digest: &[u8; 32]) -> Result<ckb_crypto::secp::Signature, Error> {
    privkey
        .sign_recoverable(digest)
        .map_err(|err| SignerError::from(err).into())
}

#[async_trait]
impl RecoverableSign for Privkey {
    fn public_key(&self) -> Result<Pubkey, Error> {
        privkey_pubkey(self)
    }

    async fn sign_recoverable(&self, digest: &[u8; 32]) -> Result<Bytes, Error> {
        Ok(Bytes::from(sign_digest(self, digest)?.serialize()))
    }
}

#[async_trait]
impl BitcoinMessageSign for Privkey {
    fn public_key(&self) -> Result<Pubkey, Error> {
        privkey_pubkey(self)
    }

    async fn sign_message(&self, message: &str) -> Result<Bytes, Error> {
        let signature = sign_digest(self, &bitcoin_message_hash(message.as_bytes()))?;
        Ok(Bytes::copy_from_slice(&signature.to_bitcoin_compact()))
    }
}

#[async_trait]
impl EvmMessageSign for Privkey {
    fn address(&self) -> Result<[u8; 20], Error> {
        Ok(evm_address(&privkey_pubkey(self)?))
    }

    async fn personal_sign(&self, message: &[u8]) -> Result<Bytes, Error> {
        let signature = sign_digest(self, &evm_message_hash(message))?;
        Ok(Bytes::copy_from_slice(&signature.to_evm_rsv()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_vectors() {
        assert_eq!(
            faster_hex::hex_string(&sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            faster_hex::hex_string(&keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            faster_hex::hex_string(&hash160(b"")),
            "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
        );
    }

    #[test]
    fn varint_boundaries() {
        let mut out = Vec::new();
        write_varint(&mut out, 0xfc);
        write_varint(&mut out, 0xfd);
        write_varint(&mut out, 0x1_0000);
        assert_eq!(out, vec![0xfc, 0xfd, 0xfd, 0x00, 0xfe, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn evm_address_of_key_one() {
        let privkey = Privkey::from([
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 1,
        ]);
        let address = EvmMessageSign::address(&privkey).unwrap();
        assert_eq!(
            faster_hex::hex_string(&address),
            "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[tokio::test]
    async fn privkey_signatures_recover() {
        let privkey = Privkey::from([7u8; 32]);
        let pubkey = RecoverableSign::public_key(&privkey).unwrap();

        let evm = privkey.personal_sign(b"hello").await.unwrap();
        assert!(evm[64] == 27 || evm[64] == 28);
        let mut rsv = evm.to_vec();
        rsv[64] -= 27;
        let signature = ckb_crypto::secp::Signature::from_slice(&rsv).unwrap();
        assert_eq!(signature.recover(&evm_message_hash(b"hello")).unwrap(), pubkey);

        let btc = privkey.sign_message("hello").await.unwrap();
        assert!((31..=34).contains(&btc[0]));
        let signature = ckb_crypto::secp::Signature::from_rsv(
            btc[1..33].try_into().unwrap(),
            btc[33..65].try_into().unwrap(),
            btc[0] - 31,
        );
        assert_eq!(signature.recover(&bitcoin_message_hash(b"hello")).unwrap(), pubkey);
    }
}
