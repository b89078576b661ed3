use async_trait::async_trait;
use ckb_crypto::secp::Privkey;
use ckb_error::Error;
use ckb_traits::CellResolver;
use ckb_tx_builder::{PrepareTransaction, sighash::sighash_all};
use ckb_types::{
    bytes::Bytes,
    conversion::hex_string,
    core::{KnownScript, KnownScripts},
    packed::{OmniLockWitnessLock, Script, Transaction},
    prelude::Entity,
};
use log::debug;
use std::sync::Arc;

use crate::{
    Signer, SignerKind,
    error::check_length,
    primitive::EvmMessageSign,
    signer::{OwnedLock, script_info, write_witness_lock},
};

const SIGNATURE_SIZE: usize = 65;
/// OmniLock auth flag of Ethereum keys.
const AUTH_FLAG_ETHEREUM: u8 = 0x12;
const OMNI_LOCK_FLAGS: u8 = 0x00;

/// The message an EVM wallet is asked to sign for `digest` on the OmniLock path.
pub(crate) fn evm_sign_message(digest: &[u8; 32]) -> String {
    format!("CKB transaction: {}", hex_string(digest))
}

/// Turns an EVM `v` of 27 or 28 into a recovery id.
fn normalize_recovery(signature: &mut [u8]) {
    if let Some(v) = signature.last_mut() {
        if *v >= 27 {
            *v -= 27;
        }
    }
}

/// Signs locks of EVM accounts.
///
/// An account derives two OmniLock scripts with the Ethereum auth. The current one ends its args
/// with the OmniLock flags, is signed over a text message and packed in the OmniLock witness
/// lock. The legacy one has no flags byte and carries the raw signature of the digest.
pub struct EvmSigner {
    primitive: Arc<dyn EvmMessageSign>,
    omni_lock: OwnedLock,
    legacy_lock: OwnedLock,
}

impl EvmSigner {
    pub fn new(primitive: Arc<dyn EvmMessageSign>, known: &KnownScripts) -> Result<Self, Error> {
        let address = primitive.address()?;
        let info = script_info(known, KnownScript::OmniLock)?;
        let mut legacy_args = vec![AUTH_FLAG_ETHEREUM];
        legacy_args.extend_from_slice(&address);
        let mut args = legacy_args.clone();
        args.push(OMNI_LOCK_FLAGS);
        Ok(EvmSigner {
            primitive,
            omni_lock: OwnedLock::new(info, args),
            legacy_lock: OwnedLock::new(info, legacy_args),
        })
    }

    pub fn from_privkey(privkey: Privkey, known: &KnownScripts) -> Result<Self, Error> {
        Self::new(Arc::new(privkey), known)
    }

    pub fn omni_lock_script(&self) -> &Script {
        &self.omni_lock.script
    }

    /// OmniLock with the args of the legacy derivation, `0x12 ‖ address`.
    pub fn legacy_lock_script(&self) -> &Script {
        &self.legacy_lock.script
    }

    async fn sign_omni_lock(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        let Some(info) = sighash_all(tx, &self.omni_lock.script, resolver).await? else {
            return Ok(());
        };
        let message = evm_sign_message(&info.message);
        let signature = self.primitive.personal_sign(message.as_bytes()).await?;
        check_length(&signature, SIGNATURE_SIZE)?;
        let mut signature = signature.to_vec();
        normalize_recovery(&mut signature);
        let lock = OmniLockWitnessLock::with_signature(signature).as_bytes();
        write_witness_lock(tx, info.position, lock)?;
        debug!("evm omnilock signature written at witness {}", info.position);
        Ok(())
    }

    async fn sign_legacy_lock(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        let Some(info) = sighash_all(tx, &self.legacy_lock.script, resolver).await? else {
            return Ok(());
        };
        let signature = self.primitive.personal_sign(&info.message).await?;
        check_length(&signature, SIGNATURE_SIZE)?;
        let mut signature = signature.to_vec();
        normalize_recovery(&mut signature);
        write_witness_lock(tx, info.position, Bytes::from(signature))?;
        debug!("evm legacy signature written at witness {}", info.position);
        Ok(())
    }
}

#[async_trait]
impl PrepareTransaction for EvmSigner {
    async fn prepare_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        let lock_len = OmniLockWitnessLock::signature_only_size(SIGNATURE_SIZE);
        self.omni_lock.prepare(tx, lock_len, resolver).await?;
        self.legacy_lock.prepare(tx, SIGNATURE_SIZE, resolver).await
    }
}

#[async_trait]
impl Signer for EvmSigner {
    fn kind(&self) -> SignerKind {
        SignerKind::Evm
    }

    fn lock_scripts(&self) -> Vec<Script> {
        vec![
            self.omni_lock.script.clone(),
            self.legacy_lock.script.clone(),
        ]
    }

    async fn sign_only_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        self.sign_legacy_lock(tx, resolver).await?;
        self.sign_omni_lock(tx, resolver).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_byte() {
        let mut signature = vec![0u8; 64];
        signature.push(28);
        normalize_recovery(&mut signature);
        assert_eq!(signature[64], 1);
        normalize_recovery(&mut signature);
        assert_eq!(signature[64], 1);
    }
}
