#![allow(dead_code)]

use ckb_crypto::secp::Privkey;
use ckb_signer::Signer;
use ckb_test_chain_utils::{MockChain, secp_lock};
use ckb_tx_builder::{PrepareTransaction, sighash::sighash_all};
use ckb_types::{
    address::NetworkType,
    bytes::Bytes,
    core::{DepType, KnownScript, KnownScripts, ScriptHashType, capacity_bytes},
    packed::{Byte32, CellDep, CellInput, CellOutput, OutPoint, Script, Transaction},
};

pub fn cell_dep(byte: u8) -> CellDep {
    CellDep::new(OutPoint::new(Byte32::new([byte; 32]), 0), DepType::Code)
}

/// Testnet genesis scripts plus the locks deployed after genesis.
pub fn known_scripts() -> KnownScripts {
    let mut known = KnownScripts::builtin(NetworkType::Testnet);
    for (script, byte) in [
        (KnownScript::OmniLock, 0x0a),
        (KnownScript::NostrLock, 0x0b),
    ] {
        known.insert(
            script,
            ckb_types::core::ScriptInfo {
                code_hash: Byte32::new([byte; 32]),
                hash_type: ScriptHashType::Type,
                cell_deps: vec![cell_dep(byte)],
            },
        );
    }
    known
}

pub fn privkey() -> Privkey {
    Privkey::from([7u8; 32])
}

/// A transaction spending a cell of `lock` and a cell of a stranger.
pub fn spend(chain: &MockChain, lock: &Script) -> Transaction {
    let stranger = secp_lock([0xee; 20]);
    let mut tx = Transaction::default();
    for lock in [&stranger, lock] {
        let cell = chain.add_capacity_cell(lock, capacity_bytes!(1000));
        tx.add_input(CellInput::new(cell.out_point, 0));
    }
    tx.add_output(
        CellOutput::new(capacity_bytes!(100), stranger, None),
        Bytes::new(),
    )
    .unwrap();
    tx
}

/// The digest the signer of `lock` signs once `tx` is prepared.
pub async fn prepared_digest(
    signer: &dyn Signer,
    tx: &Transaction,
    lock: &Script,
    chain: &MockChain,
) -> (Transaction, [u8; 32]) {
    let mut prepared = tx.clone();
    signer.prepare_transaction(&mut prepared, chain).await.unwrap();
    let info = sighash_all(&mut prepared, lock, chain)
        .await
        .unwrap()
        .unwrap();
    (prepared, info.message)
}

pub fn witness_lock(tx: &Transaction, index: usize) -> Bytes {
    tx.witness_args_at(index).unwrap().unwrap().lock.unwrap()
}
