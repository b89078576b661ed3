use async_trait::async_trait;
use ckb_crypto::secp::Privkey;
use ckb_error::Error;
use ckb_hash::blake160;
use ckb_traits::CellResolver;
use ckb_tx_builder::{PrepareTransaction, sighash::sighash_all};
use ckb_types::{
    core::{KnownScript, KnownScripts},
    packed::{Script, Transaction},
};
use log::debug;
use std::sync::Arc;

use crate::{
    Signer, SignerKind,
    error::check_length,
    primitive::RecoverableSign,
    signer::{OwnedLock, script_info, write_witness_lock},
};

const SIGNATURE_SIZE: usize = 65;

/// Signs secp256k1-blake160 locks, whose args are the blake160 of the compressed public key.
pub struct NativeSigner {
    primitive: Arc<dyn RecoverableSign>,
    lock: OwnedLock,
}

impl NativeSigner {
    pub fn new(primitive: Arc<dyn RecoverableSign>, known: &KnownScripts) -> Result<Self, Error> {
        let info = script_info(known, KnownScript::Secp256k1Blake160)?;
        let pubkey = primitive.public_key()?;
        let lock = OwnedLock::new(info, blake160(pubkey.serialize()).to_vec());
        Ok(NativeSigner { primitive, lock })
    }

    pub fn from_privkey(privkey: Privkey, known: &KnownScripts) -> Result<Self, Error> {
        Self::new(Arc::new(privkey), known)
    }

    pub fn lock_script(&self) -> &Script {
        &self.lock.script
    }
}

#[async_trait]
impl PrepareTransaction for NativeSigner {
    async fn prepare_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        self.lock.prepare(tx, SIGNATURE_SIZE, resolver).await
    }
}

#[async_trait]
impl Signer for NativeSigner {
    fn kind(&self) -> SignerKind {
        SignerKind::Native
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
            debug!("native signer owns no input");
            return Ok(());
        };
        let signature = self.primitive.sign_recoverable(&info.message).await?;
        check_length(&signature, SIGNATURE_SIZE)?;
        write_witness_lock(tx, info.position, signature)?;
        debug!("native signature written at witness {}", info.position);
        Ok(())
    }
}
