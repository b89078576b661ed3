use async_trait::async_trait;
use ckb_error::Error;
use ckb_traits::CellResolver;
use ckb_tx_builder::{PrepareTransaction, sighash::prepare_sighash_all_witness};
use ckb_types::{
    bytes::Bytes,
    core::{KnownScript, KnownScripts, ScriptInfo},
    packed::{CellDep, Script, Transaction},
};
use log::debug;

use crate::{BtcSigner, EvmSigner, NativeSigner, NostrSigner};

/// The signing ecosystems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignerKind {
    Native,
    Bitcoin,
    Evm,
    Nostr,
}

/// Signs the lock groups it owns.
///
/// Signing a transaction without any input locked by the signer leaves it unchanged.
#[async_trait]
pub trait Signer: PrepareTransaction {
    fn kind(&self) -> SignerKind;

    /// The lock scripts this signer unlocks, also where its cells are searched.
    fn lock_scripts(&self) -> Vec<Script>;

    /// Writes signatures into prepared witnesses.
    async fn sign_only_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error>;

    /// Prepares the witnesses and signs.
    async fn sign_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        self.prepare_transaction(tx, resolver).await?;
        self.sign_only_transaction(tx, resolver).await
    }
}

/// A lock script owned by a signer, with the cell deps it needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OwnedLock {
    pub(crate) script: Script,
    pub(crate) cell_deps: Vec<CellDep>,
}

impl OwnedLock {
    pub(crate) fn new(info: &ScriptInfo, args: impl Into<Bytes>) -> Self {
        OwnedLock {
            script: info.script(args),
            cell_deps: info.cell_deps.clone(),
        }
    }

    /// Adds the cell deps and a zero filled witness lock of `lock_len` bytes to the group.
    pub(crate) async fn prepare(
        &self,
        tx: &mut Transaction,
        lock_len: usize,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        if let Some(position) =
            prepare_sighash_all_witness(tx, &self.script, lock_len, resolver).await?
        {
            debug!("placeholder of {lock_len} bytes at witness {position}");
            tx.add_cell_deps(self.cell_deps.iter().cloned());
        }
        Ok(())
    }
}

pub(crate) fn script_info(known: &KnownScripts, script: KnownScript) -> Result<&ScriptInfo, Error> {
    known
        .get(script)
        .ok_or_else(|| ckb_error::ErrorKind::Config.other(format!("{script:?} is not configured")))
}

/// Replaces the lock of the witness at `position`.
pub(crate) fn write_witness_lock(
    tx: &mut Transaction,
    position: usize,
    lock: Bytes,
) -> Result<(), Error> {
    let mut witness = tx.witness_args_at(position)?.unwrap_or_default();
    witness.lock = Some(lock);
    tx.set_witness_args_at(position, &witness);
    Ok(())
}

/// One of the signer strategies, chosen at run time.
pub enum AnySigner {
    Native(NativeSigner),
    Bitcoin(BtcSigner),
    Evm(EvmSigner),
    Nostr(NostrSigner),
}

macro_rules! dispatch {
    ($self:ident, $signer:ident => $body:expr) => {
        match $self {
            AnySigner::Native($signer) => $body,
            AnySigner::Bitcoin($signer) => $body,
            AnySigner::Evm($signer) => $body,
            AnySigner::Nostr($signer) => $body,
        }
    };
}

#[async_trait]
impl PrepareTransaction for AnySigner {
    async fn prepare_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        dispatch!(self, signer => signer.prepare_transaction(tx, resolver).await)
    }
}

#[async_trait]
impl Signer for AnySigner {
    fn kind(&self) -> SignerKind {
        dispatch!(self, signer => signer.kind())
    }

    fn lock_scripts(&self) -> Vec<Script> {
        dispatch!(self, signer => signer.lock_scripts())
    }

    async fn sign_only_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        dispatch!(self, signer => signer.sign_only_transaction(tx, resolver).await)
    }
}

impl From<NativeSigner> for AnySigner {
    fn from(signer: NativeSigner) -> Self {
        AnySigner::Native(signer)
    }
}

impl From<BtcSigner> for AnySigner {
    fn from(signer: BtcSigner) -> Self {
        AnySigner::Bitcoin(signer)
    }
}

impl From<EvmSigner> for AnySigner {
    fn from(signer: EvmSigner) -> Self {
        AnySigner::Evm(signer)
    }
}

impl From<NostrSigner> for AnySigner {
    fn from(signer: NostrSigner) -> Self {
        AnySigner::Nostr(signer)
    }
}
