use async_trait::async_trait;
use ckb_error::Error;
use ckb_hash::blake160;
use ckb_traits::CellResolver;
use ckb_tx_builder::{PrepareTransaction, sighash::sighash_all};
use ckb_types::{
    bytes::Bytes,
    core::{KnownScript, KnownScripts},
    packed::{Script, Transaction},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    Signer, SignerKind,
    error::{SignerError, check_length},
    primitive::{NostrEventSign, sha256},
    signer::{OwnedLock, script_info, write_witness_lock},
};

/// Kind of the events signing a transaction.
pub const NOSTR_EVENT_KIND: u32 = 23334;
/// Content of the events signing a transaction.
pub const NOSTR_SIGN_CONTENT: &str = "Signing a CKB transaction\n\nIMPORTANT: Please verify the integrity and authenticity of connected Nostr client before signing this message\n";
/// Tag carrying the hex digest without prefix.
const SIGHASH_TAG: &str = "ckb_sighash_all";
/// Reserved witness lock, large enough for any signed event.
const WITNESS_LOCK_SIZE: usize = 572;
const SCHNORR_SIGNATURE_SIZE: usize = 64;

/// A signed Nostr event, NIP-01.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NostrEvent {
    pub id: String,
    pub pubkey: String,
    pub created_at: u64,
    pub kind: u32,
    pub tags: Vec<Vec<String>>,
    pub content: String,
    pub sig: String,
}

impl NostrEvent {
    /// The id of an event: the sha256 of its canonical serialization.
    pub fn compute_id(
        pubkey: &str,
        created_at: u64,
        kind: u32,
        tags: &[Vec<String>],
        content: &str,
    ) -> Result<[u8; 32], Error> {
        let canonical = serde_json::to_string(&(0, pubkey, created_at, kind, tags, content))
            .map_err(|err| SignerError::Primitive(err.to_string()))?;
        Ok(sha256(canonical.as_bytes()))
    }
}

/// Signs Nostr locks, whose args are a zero byte followed by the blake160 of the x-only key.
///
/// The witness lock is the JSON of an event whose tag carries the signing digest.
pub struct NostrSigner {
    primitive: Arc<dyn NostrEventSign>,
    pubkey: [u8; 32],
    lock: OwnedLock,
    created_at: Option<u64>,
}

impl NostrSigner {
    pub fn new(primitive: Arc<dyn NostrEventSign>, known: &KnownScripts) -> Result<Self, Error> {
        let info = script_info(known, KnownScript::NostrLock)?;
        let pubkey = primitive.public_key()?;
        let mut args = vec![0u8];
        args.extend_from_slice(&blake160(pubkey));
        let lock = OwnedLock::new(info, args);
        Ok(NostrSigner {
            primitive,
            pubkey,
            lock,
            created_at: None,
        })
    }

    /// Pins the `created_at` of signed events, which otherwise is the current unix time.
    pub fn with_created_at(mut self, created_at: u64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    fn created_at(&self) -> u64 {
        self.created_at.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default()
        })
    }

    pub fn lock_script(&self) -> &Script {
        &self.lock.script
    }

    /// Builds and signs the event carrying `digest`.
    pub async fn sign_digest(&self, digest: &[u8; 32]) -> Result<NostrEvent, Error> {
        let pubkey = faster_hex::hex_string(&self.pubkey);
        let tags = vec![vec![SIGHASH_TAG.to_owned(), faster_hex::hex_string(digest)]];
        let created_at = self.created_at();
        let id = NostrEvent::compute_id(&pubkey, created_at, NOSTR_EVENT_KIND, &tags, NOSTR_SIGN_CONTENT)?;
        let sig = self.primitive.sign_event_id(&id).await?;
        check_length(&sig, SCHNORR_SIGNATURE_SIZE)?;
        Ok(NostrEvent {
            id: faster_hex::hex_string(&id),
            pubkey,
            created_at,
            kind: NOSTR_EVENT_KIND,
            tags,
            content: NOSTR_SIGN_CONTENT.to_owned(),
            sig: faster_hex::hex_string(&sig),
        })
    }
}

#[async_trait]
impl PrepareTransaction for NostrSigner {
    async fn prepare_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        self.lock.prepare(tx, WITNESS_LOCK_SIZE, resolver).await
    }
}

#[async_trait]
impl Signer for NostrSigner {
    fn kind(&self) -> SignerKind {
        SignerKind::Nostr
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
            debug!("nostr signer owns no input");
            return Ok(());
        };
        let event = self.sign_digest(&info.message).await?;
        let lock = serde_json::to_vec(&event)
            .map_err(|err| SignerError::Primitive(err.to_string()))?;
        write_witness_lock(tx, info.position, Bytes::from(lock))?;
        debug!("nostr event written at witness {}", info.position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_serialization() {
        let tags = vec![vec!["t".to_owned(), "v".to_owned()]];
        let expected = sha256(br#"[0,"ab",1,23334,[["t","v"]],"line\nbreak"]"#);
        assert_eq!(
            NostrEvent::compute_id("ab", 1, NOSTR_EVENT_KIND, &tags, "line\nbreak").unwrap(),
            expected
        );
    }
}
