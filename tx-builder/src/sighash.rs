//! Signing digests of lock groups.
//!
//! All inputs locked by the same script form a group. The group is unlocked by one signature
//! stored in the witness at the index of its first input. The digest covers the transaction
//! hash followed by every witness, each prefixed by its length as a little-endian `u64`.

use ckb_error::Error;
use ckb_hash::new_blake2b;
use ckb_traits::CellResolver;
use ckb_types::{
    bytes::Bytes,
    packed::{Script, Transaction},
};
use log::debug;

use crate::resolve::{resolve_input, resolve_inputs};

/// Where a lock group is signed and what it signs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SighashInfo {
    /// Index of the witness holding the group signature.
    pub position: usize,
    /// The digest to sign.
    pub message: [u8; 32],
}

/// Folds the transaction hash and all witnesses into the signing digest.
pub fn signing_message(tx: &Transaction) -> [u8; 32] {
    let mut hasher = new_blake2b();
    hasher.update(tx.hash().as_slice());
    for witness in &tx.witnesses {
        hasher.update(&(witness.len() as u64).to_le_bytes());
        hasher.update(witness);
    }
    let mut message = [0u8; 32];
    hasher.finalize(&mut message);
    message
}

/// Index of the first input locked by `lock`.
pub async fn find_input_index_by_lock(
    tx: &mut Transaction,
    lock: &Script,
    resolver: &dyn CellResolver,
) -> Result<Option<usize>, Error> {
    for (index, input) in tx.inputs.iter_mut().enumerate() {
        let (output, _) = resolve_input(input, resolver).await?;
        if &output.lock == lock {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// The digest the group of `lock` signs, or `None` when no input is locked by `lock`.
///
/// Every input must be resolvable.
pub async fn sighash_all(
    tx: &mut Transaction,
    lock: &Script,
    resolver: &dyn CellResolver,
) -> Result<Option<SighashInfo>, Error> {
    resolve_inputs(tx, resolver).await?;
    let position = tx.inputs.iter().position(|input| {
        input
            .resolved()
            .is_some_and(|(output, _)| &output.lock == lock)
    });
    let Some(position) = position else {
        debug!("no input locked by {}", lock.hash());
        return Ok(None);
    };
    Ok(Some(SighashInfo {
        position,
        message: signing_message(tx),
    }))
}

/// Puts a zero filled witness lock of `lock_len` bytes at the position of the group of `lock`.
///
/// Existing `input_type` and `output_type` are kept. Returns the position, or `None` when no
/// input is locked by `lock`.
pub async fn prepare_sighash_all_witness(
    tx: &mut Transaction,
    lock: &Script,
    lock_len: usize,
    resolver: &dyn CellResolver,
) -> Result<Option<usize>, Error> {
    let Some(position) = find_input_index_by_lock(tx, lock, resolver).await? else {
        return Ok(None);
    };
    let mut witness = tx.witness_args_at(position)?.unwrap_or_default();
    witness.lock = Some(Bytes::from(vec![0u8; lock_len]));
    tx.set_witness_args_at(position, &witness);
    Ok(Some(position))
}
