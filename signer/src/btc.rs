use async_trait::async_trait;
use ckb_crypto::secp::Privkey;
use ckb_error::Error;
use ckb_traits::CellResolver;
use ckb_tx_builder::{PrepareTransaction, sighash::sighash_all};
use ckb_types::{
    conversion::hex_string,
    core::{KnownScript, KnownScripts},
    packed::{OmniLockWitnessLock, Script, Transaction},
    prelude::Entity,
};
use log::debug;
use std::sync::Arc;

use crate::{
    Signer, SignerKind,
    error::{SignerError, check_length},
    primitive::{BitcoinMessageSign, hash160},
    signer::{OwnedLock, script_info, write_witness_lock},
};

const SIGNATURE_SIZE: usize = 65;
/// OmniLock auth flag of Bitcoin P2PKH keys.
const AUTH_FLAG_BITCOIN: u8 = 0x04;
const OMNI_LOCK_FLAGS: u8 = 0x00;

/// The message a Bitcoin wallet is asked to sign for `digest`.
pub(crate) fn bitcoin_sign_message(digest: &[u8; 32]) -> String {
    format!("CKB (Bitcoin Layer) transaction: {}", hex_string(digest))
}

/// Remaps the header of a Bitcoin compact signature to the P2PKH compressed range 31..=34.
pub(crate) fn normalize_header(header: u8) -> Result<u8, SignerError> {
    if !(27..=42).contains(&header) {
        return Err(SignerError::InvalidSignatureHeader(header));
    }
    Ok(31 + (header - 27) % 4)
}

/// Signs OmniLock locks with the Bitcoin auth, for keys held by Bitcoin wallets.
///
/// The lock args are the auth flag, the hash160 of the compressed public key and the OmniLock
/// flags.
pub struct BtcSigner {
    primitive: Arc<dyn BitcoinMessageSign>,
    lock: OwnedLock,
}

impl BtcSigner {
    pub fn new(primitive: Arc<dyn BitcoinMessageSign>, known: &KnownScripts) -> Result<Self, Error> {
        let info = script_info(known, KnownScript::OmniLock)?;
        let pubkey = primitive.public_key()?;
        let mut args = vec![AUTH_FLAG_BITCOIN];
        args.extend_from_slice(&hash160(&pubkey.serialize()));
        args.push(OMNI_LOCK_FLAGS);
        let lock = OwnedLock::new(info, args);
        Ok(BtcSigner { primitive, lock })
    }

    pub fn from_privkey(privkey: Privkey, known: &KnownScripts) -> Result<Self, Error> {
        Self::new(Arc::new(privkey), known)
    }

    pub fn lock_script(&self) -> &Script {
        &self.lock.script
    }
}

#[async_trait]
impl PrepareTransaction for BtcSigner {
    async fn prepare_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        let lock_len = OmniLockWitnessLock::signature_only_size(SIGNATURE_SIZE);
        self.lock.prepare(tx, lock_len, resolver).await
    }
}

#[async_trait]
impl Signer for BtcSigner {
    fn kind(&self) -> SignerKind {
        SignerKind::Bitcoin
    }

    fn lock_scripts(&self) -> Vec<Script> {
        vec![self.lock.script.clone()]
    }

    async fn sign_only_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        let Some(info) = sighash_all(tx, &self.lock.script, resolver).await? else {
            debug!("bitcoin signer owns no input");
            return Ok(());
        };
        let signature = self
            .primitive
            .sign_message(&bitcoin_sign_message(&info.message))
            .await?;
        check_length(&signature, SIGNATURE_SIZE)?;
        let mut signature = signature.to_vec();
        signature[0] = normalize_header(signature[0])?;
        let lock = OmniLockWitnessLock::with_signature(signature).as_bytes();
        write_witness_lock(tx, info.position, lock)?;
        debug!("bitcoin signature written at witness {}", info.position);
        Ok(())
    }
}
