mod common;

use ckb_crypto::secp::Signature;
use ckb_signer::{
    EvmSigner, Signer, SignerKind,
    primitive::{EvmMessageSign, evm_message_hash},
};
use ckb_error::ErrorKind;
use ckb_test_chain_utils::MockChain;
use ckb_tx_builder::{PrepareTransaction, sighash::sighash_all};
use ckb_types::{
    address::NetworkType,
    bytes::Bytes,
    conversion::hex_string,
    core::{KnownScripts, capacity_bytes},
    packed::{CellInput, OmniLockWitnessLock},
    prelude::Entity,
};

use common::{known_scripts, prepared_digest, privkey, spend, witness_lock};

fn recover(signature: &[u8], message: &[u8]) -> ckb_crypto::secp::Pubkey {
    assert!(signature[64] <= 1);
    Signature::from_slice(signature)
        .unwrap()
        .recover(&evm_message_hash(message))
        .unwrap()
}

#[tokio::test]
async fn omni_lock_with_ethereum_auth() {
    let chain = MockChain::new();
    let signer = EvmSigner::from_privkey(privkey(), &known_scripts()).unwrap();
    assert_eq!(signer.kind(), SignerKind::Evm);
    let address = privkey().address().unwrap();
    let lock = signer.omni_lock_script().clone();
    let mut args = vec![0x12];
    args.extend_from_slice(&address);
    args.push(0x00);
    assert_eq!(lock.args, Bytes::from(args));

    let tx = spend(&chain, &lock);
    let (mut prepared, digest) = prepared_digest(&signer, &tx, &lock, &chain).await;
    assert_eq!(witness_lock(&prepared, 1).len(), 85);
    assert_eq!(prepared.cell_deps, vec![common::cell_dep(0x0a)]);

    signer.sign_only_transaction(&mut prepared, &chain).await.unwrap();
    let signature = OmniLockWitnessLock::from_slice(&witness_lock(&prepared, 1))
        .unwrap()
        .signature
        .unwrap();
    let message = format!("CKB transaction: {}", hex_string(&digest));
    assert_eq!(
        recover(&signature, message.as_bytes()),
        privkey().pubkey().unwrap()
    );
}

#[tokio::test]
async fn legacy_derivation_signs_the_raw_digest() {
    let chain = MockChain::new();
    let signer = EvmSigner::from_privkey(privkey(), &known_scripts()).unwrap();
    let omni_lock = signer.omni_lock_script().clone();
    let legacy_lock = signer.legacy_lock_script().clone();
    assert_eq!(legacy_lock.code_hash, omni_lock.code_hash);
    assert_eq!(&legacy_lock.args[..], &omni_lock.args[..21]);
    assert_eq!(signer.lock_scripts(), vec![omni_lock.clone(), legacy_lock.clone()]);

    let mut tx = spend(&chain, &legacy_lock);
    let cell = chain.add_capacity_cell(&omni_lock, capacity_bytes!(100));
    tx.add_input(CellInput::new(cell.out_point, 0));

    let (mut prepared, digest) = prepared_digest(&signer, &tx, &legacy_lock, &chain).await;
    assert_eq!(witness_lock(&prepared, 1), Bytes::from(vec![0u8; 65]));
    assert_eq!(witness_lock(&prepared, 2).len(), 85);
    assert_eq!(prepared.cell_deps, vec![common::cell_dep(0x0a)]);

    signer.sign_only_transaction(&mut prepared, &chain).await.unwrap();
    let signature = witness_lock(&prepared, 1);
    assert_eq!(signature.len(), 65);
    assert_eq!(recover(&signature, &digest), privkey().pubkey().unwrap());

    // the current derivation is signed last, over the signed legacy witness
    let info = sighash_all(&mut prepared, &omni_lock, &chain)
        .await
        .unwrap()
        .unwrap();
    let signature = OmniLockWitnessLock::from_slice(&witness_lock(&prepared, 2))
        .unwrap()
        .signature
        .unwrap();
    let message = format!("CKB transaction: {}", hex_string(&info.message));
    assert_eq!(
        recover(&signature, message.as_bytes()),
        privkey().pubkey().unwrap()
    );
}

#[tokio::test]
async fn legacy_derivation_alone() {
    let chain = MockChain::new();
    let signer = EvmSigner::from_privkey(privkey(), &known_scripts()).unwrap();
    let legacy_lock = signer.legacy_lock_script().clone();
    let mut tx = spend(&chain, &legacy_lock);
    signer.prepare_transaction(&mut tx, &chain).await.unwrap();
    assert_eq!(tx.witnesses.len(), 2);
    assert_eq!(witness_lock(&tx, 1).len(), 65);
    signer.sign_only_transaction(&mut tx, &chain).await.unwrap();
    assert_ne!(witness_lock(&tx, 1), Bytes::from(vec![0u8; 65]));
    assert!(tx.witnesses[0].is_empty());
}

#[test]
fn omni_lock_is_required() {
    let known = KnownScripts::builtin(NetworkType::Testnet);
    let err = EvmSigner::from_privkey(privkey(), &known).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Config);
}
