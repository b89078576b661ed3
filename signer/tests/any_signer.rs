mod common;

use ckb_crypto::secp::Signature;
use ckb_signer::{AnySigner, BtcSigner, EvmSigner, NativeSigner, Signer, SignerKind};
use ckb_test_chain_utils::MockChain;
use ckb_tx_builder::{PrepareTransaction, sighash::sighash_all};
use ckb_types::{bytes::Bytes, core::capacity_bytes, packed::CellInput};

use common::{known_scripts, privkey, spend, witness_lock};

fn signers() -> Vec<AnySigner> {
    let known = known_scripts();
    vec![
        NativeSigner::from_privkey(privkey(), &known).unwrap().into(),
        BtcSigner::from_privkey(privkey(), &known).unwrap().into(),
        EvmSigner::from_privkey(privkey(), &known).unwrap().into(),
    ]
}

#[test]
fn kinds_and_locks() {
    let signers = signers();
    let kinds: Vec<_> = signers.iter().map(Signer::kind).collect();
    assert_eq!(
        kinds,
        vec![SignerKind::Native, SignerKind::Bitcoin, SignerKind::Evm]
    );
    let locks: Vec<_> = signers.iter().flat_map(Signer::lock_scripts).collect();
    assert_eq!(locks.len(), 4);
    for (i, lock) in locks.iter().enumerate() {
        assert!(!locks[i + 1..].contains(lock));
    }
}

#[tokio::test]
async fn each_signer_fills_its_group() {
    let chain = MockChain::new();
    let signers = signers();
    let native_lock = signers[0].lock_scripts().remove(0);
    let btc_lock = signers[1].lock_scripts().remove(0);

    let mut tx = spend(&chain, &native_lock);
    let cell = chain.add_capacity_cell(&btc_lock, capacity_bytes!(100));
    tx.add_input(CellInput::new(cell.out_point, 0));

    for signer in &signers {
        signer.prepare_transaction(&mut tx, &chain).await.unwrap();
    }
    let digest = sighash_all(&mut tx, &native_lock, &chain)
        .await
        .unwrap()
        .unwrap()
        .message;
    for signer in &signers {
        signer.sign_only_transaction(&mut tx, &chain).await.unwrap();
    }

    assert_eq!(tx.witnesses.len(), 3);
    assert!(tx.witnesses[0].is_empty());
    let native = Signature::from_slice(&witness_lock(&tx, 1)).unwrap();
    assert_eq!(native.recover(&digest).unwrap(), privkey().pubkey().unwrap());
    assert_eq!(witness_lock(&tx, 2).len(), 85);
    assert_ne!(witness_lock(&tx, 2), Bytes::from(vec![0u8; 85]));
}
