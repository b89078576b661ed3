use ckb_error::ErrorKind;
use ckb_hash::new_blake2b;
use ckb_test_chain_utils::{MockChain, secp_lock};
use ckb_tx_builder::{
    SighashInfo,
    resolve::resolve_inputs,
    sighash::{find_input_index_by_lock, prepare_sighash_all_witness, sighash_all, signing_message},
};
use ckb_types::{
    bytes::Bytes,
    core::capacity_bytes,
    packed::{Byte32, CellInput, OutPoint, Script, Transaction, WitnessArgs},
};

/// Inputs locked by A, B, A with one witness each.
fn grouped(chain: &MockChain) -> (Transaction, Script, Script) {
    let a = secp_lock([0xa; 20]);
    let b = secp_lock([0xb; 20]);
    let mut tx = Transaction::default();
    for lock in [&a, &b, &a] {
        let cell = chain.add_capacity_cell(lock, capacity_bytes!(100));
        tx.add_input(CellInput::new(cell.out_point, 0));
    }
    tx.witnesses = vec![
        Bytes::from_static(&[1; 10]),
        Bytes::from_static(&[2; 20]),
        Bytes::from_static(&[3; 30]),
    ];
    (tx, a, b)
}

fn fold(tx: &Transaction, witnesses: &[Bytes]) -> [u8; 32] {
    let mut hasher = new_blake2b();
    hasher.update(tx.hash().as_slice());
    for witness in witnesses {
        hasher.update(&(witness.len() as u64).to_le_bytes());
        hasher.update(witness);
    }
    let mut digest = [0u8; 32];
    hasher.finalize(&mut digest);
    digest
}

#[tokio::test]
async fn group_digest_folds_every_witness() {
    let chain = MockChain::new();
    let (mut tx, a, b) = grouped(&chain);

    let info = sighash_all(&mut tx, &a, &chain).await.unwrap().unwrap();
    let witnesses = tx.witnesses.clone();
    assert_eq!(
        info,
        SighashInfo {
            position: 0,
            message: fold(&tx, &witnesses),
        }
    );

    let info_b = sighash_all(&mut tx, &b, &chain).await.unwrap().unwrap();
    assert_eq!(info_b.position, 1);
    assert_eq!(info_b.message, info.message);

    // the witness of an input outside the group is covered
    let mut tampered = tx.clone();
    tampered.witnesses[1] = Bytes::from_static(&[9; 20]);
    assert_ne!(signing_message(&tampered), info.message);

    // so is a trailing witness beyond the inputs
    let mut trailing = tx.clone();
    trailing.witnesses.push(Bytes::from_static(b"proof"));
    let info = sighash_all(&mut trailing, &a, &chain).await.unwrap().unwrap();
    let witnesses = trailing.witnesses.clone();
    assert_eq!(info.message, fold(&trailing, &witnesses));
}

#[tokio::test]
async fn absent_lock_needs_no_signature() {
    let chain = MockChain::new();
    let (mut tx, _, _) = grouped(&chain);
    let c = secp_lock([0xc; 20]);
    assert_eq!(sighash_all(&mut tx, &c, &chain).await.unwrap(), None);
    assert_eq!(find_input_index_by_lock(&mut tx, &c, &chain).await.unwrap(), None);
    let before = tx.clone();
    assert_eq!(
        prepare_sighash_all_witness(&mut tx, &c, 65, &chain).await.unwrap(),
        None
    );
    assert_eq!(tx.witnesses, before.witnesses);
}

#[tokio::test]
async fn unresolvable_input_is_fatal() {
    let chain = MockChain::new();
    let (mut tx, a, _) = grouped(&chain);
    tx.add_input(CellInput::new(OutPoint::new(Byte32::new([0xee; 32]), 0), 0));
    let err = sighash_all(&mut tx, &a, &chain).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unresolvable);
}

#[tokio::test]
async fn resolved_cells_are_memoized() {
    let chain = MockChain::new();
    let (mut tx, a, _) = grouped(&chain);
    resolve_inputs(&mut tx, &chain).await.unwrap();
    assert!(tx.inputs.iter().all(|input| input.is_resolved()));
    for input in &tx.inputs {
        chain.fail_on(&input.previous_output);
    }
    assert!(sighash_all(&mut tx, &a, &chain).await.unwrap().is_some());
}

#[tokio::test]
async fn placeholder_keeps_other_fields() {
    let chain = MockChain::new();
    let (mut tx, _, b) = grouped(&chain);
    tx.witnesses.truncate(1);
    tx.set_witness_args_at(
        1,
        &WitnessArgs {
            lock: None,
            input_type: Some(Bytes::from_static(b"in")),
            output_type: None,
        },
    );

    let position = prepare_sighash_all_witness(&mut tx, &b, 65, &chain)
        .await
        .unwrap();
    assert_eq!(position, Some(1));
    let witness = tx.witness_args_at(1).unwrap().unwrap();
    assert_eq!(witness.lock, Some(Bytes::from(vec![0u8; 65])));
    assert_eq!(witness.input_type, Some(Bytes::from_static(b"in")));
    assert_eq!(tx.witnesses[0], Bytes::from_static(&[1; 10]));
}
