use ckb_error::ErrorKind;
use ckb_test_chain_utils::{MockChain, secp_lock};
use ckb_tx_builder::{
    CompletionError, FeeError, FeeSettings, SkipPreparation, TransactionCompleter,
};
use ckb_types::{
    bytes::Bytes,
    core::{Capacity, FeeRate, capacity_bytes},
    packed::{Byte32, CellInput, CellOutput, OutPoint, Script, Transaction},
};

const RATE: FeeRate = FeeRate::from_u64(1000);

fn pay(lock: &Script, capacity: Capacity) -> Transaction {
    let mut tx = Transaction::default();
    tx.add_output(CellOutput::new(capacity, lock.clone(), None), Bytes::new())
        .unwrap();
    tx
}

/// The fee of `tx` once one more input is added.
fn fee_with_one_input(tx: &Transaction) -> Capacity {
    let mut probe = tx.clone();
    probe.add_input(CellInput::new(OutPoint::new(Byte32::zero(), 0), 0));
    probe.estimate_fee(RATE)
}

#[tokio::test]
async fn change_to_lock_converges() {
    let chain = MockChain::new();
    let owner = secp_lock([1; 20]);
    chain.add_capacity_cell(&owner, capacity_bytes!(1000));
    let completer = TransactionCompleter::from_chain(&chain);

    let mut tx = pay(&secp_lock([2; 20]), capacity_bytes!(100));
    let completion = completer
        .complete_fee_change_to_lock(&mut tx, &[owner.clone()], &SkipPreparation, &owner, Some(RATE))
        .await
        .unwrap();
    assert_eq!(completion.added_inputs, 1);
    assert!(completion.change_created);
    assert_eq!(tx.outputs.len(), 2);
    assert_eq!(tx.outputs[1].lock, owner);

    let fee = completer.fee(&mut tx).await.unwrap();
    assert_eq!(fee, tx.estimate_fee(RATE));
    assert_eq!(
        tx.outputs_capacity().unwrap().safe_add(fee).unwrap(),
        capacity_bytes!(1000)
    );
}

#[tokio::test]
async fn change_to_output_grows_it_in_place() {
    let chain = MockChain::new();
    let owner = secp_lock([1; 20]);
    chain.add_capacity_cell(&owner, capacity_bytes!(200));
    let completer = TransactionCompleter::from_chain(&chain);

    let mut tx = pay(&owner, capacity_bytes!(100));
    let completion = completer
        .complete_fee_change_to_output(&mut tx, &[owner.clone()], &SkipPreparation, 0, Some(RATE))
        .await
        .unwrap();
    assert!(completion.change_created);
    assert_eq!(tx.outputs.len(), 1);
    let fee = tx.estimate_fee(RATE);
    assert_eq!(completer.fee(&mut tx).await.unwrap(), fee);
    assert_eq!(
        tx.outputs[0].capacity,
        capacity_bytes!(200).safe_sub(fee).unwrap()
    );

    let err = completer
        .complete_fee_change_to_output(&mut tx, &[owner], &SkipPreparation, 5, Some(RATE))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<FeeError>(),
        Some(&FeeError::OutputIndexOutOfRange { index: 5, len: 1 })
    );
}

#[tokio::test]
async fn exact_payment_needs_no_change() {
    let chain = MockChain::new();
    let owner = secp_lock([1; 20]);
    let mut tx = pay(&secp_lock([2; 20]), capacity_bytes!(100));
    let fee = fee_with_one_input(&tx);
    chain.add_capacity_cell(&owner, capacity_bytes!(100).safe_add(fee).unwrap());
    let completer = TransactionCompleter::from_chain(&chain);

    let completion = completer
        .complete_fee_change_to_lock(&mut tx, &[owner.clone()], &SkipPreparation, &owner, Some(RATE))
        .await
        .unwrap();
    assert!(!completion.change_created);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(completer.fee(&mut tx).await.unwrap(), fee);
}

#[tokio::test]
async fn leftover_below_change_occupation_needs_more_cells() {
    let chain = MockChain::new();
    let owner = secp_lock([1; 20]);
    let mut tx = pay(&secp_lock([2; 20]), capacity_bytes!(100));
    let fee = fee_with_one_input(&tx);
    chain.add_capacity_cell(
        &owner,
        capacity_bytes!(110).safe_add(fee).unwrap(),
    );
    let completer = TransactionCompleter::from_chain(&chain);

    let err = completer
        .complete_fee_change_to_lock(&mut tx, &[owner.clone()], &SkipPreparation, &owner, Some(RATE))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
    match err.downcast_ref::<CompletionError>() {
        Some(CompletionError::InsufficientCapacity { for_change, .. }) => assert!(*for_change),
        other => panic!("unexpected {other:?}"),
    }
    // the transaction is untouched on failure
    assert!(tx.inputs.is_empty());

    // a second cell funds the change
    chain.add_capacity_cell(&owner, capacity_bytes!(100));
    let completion = completer
        .complete_fee_change_to_lock(&mut tx, &[owner.clone()], &SkipPreparation, &owner, Some(RATE))
        .await
        .unwrap();
    assert_eq!(completion.added_inputs, 2);
    assert!(completion.change_created);
    assert_eq!(completer.fee(&mut tx).await.unwrap(), tx.estimate_fee(RATE));
}

#[tokio::test]
async fn change_shrinking_outputs_is_rejected() {
    let chain = MockChain::new();
    let owner = secp_lock([1; 20]);
    chain.add_capacity_cell(&owner, capacity_bytes!(1000));
    let completer = TransactionCompleter::from_chain(&chain);

    let mut tx = pay(&owner, capacity_bytes!(100));
    let err = completer
        .complete_fee(&mut tx, &[owner], &SkipPreparation, Some(RATE), |tx, _| {
            tx.outputs[0].capacity = capacity_bytes!(61);
            Ok(Capacity::zero())
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    assert_eq!(
        err.downcast_ref::<FeeError>(),
        Some(&FeeError::ChangeReducedOutputs {
            before: capacity_bytes!(100),
            after: capacity_bytes!(61),
        })
    );
}

#[tokio::test]
async fn change_must_take_all_leftover() {
    let chain = MockChain::new();
    let owner = secp_lock([1; 20]);
    chain.add_capacity_cell(&owner, capacity_bytes!(1000));
    let completer = TransactionCompleter::from_chain(&chain);

    let mut tx = pay(&owner, capacity_bytes!(100));
    let err = completer
        .complete_fee(&mut tx, &[owner], &SkipPreparation, Some(RATE), |_, _| {
            Ok(Capacity::zero())
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FeeError>(),
        Some(FeeError::ChangeLeftCapacity { .. })
    ));
}

#[tokio::test]
async fn growing_change_hits_the_iteration_cap() {
    let chain = MockChain::new();
    let owner = secp_lock([1; 20]);
    chain.add_capacity_cell(&owner, capacity_bytes!(10_000));
    let completer = TransactionCompleter::from_chain(&chain).with_settings(FeeSettings {
        max_iterations: 4,
        ..Default::default()
    });

    let mut tx = pay(&owner, capacity_bytes!(100));
    let change_lock = owner.clone();
    let mut round = 0;
    let err = completer
        .complete_fee(&mut tx, &[owner], &SkipPreparation, Some(RATE), |tx, leftover| {
            round += 1;
            let output = CellOutput::new(leftover, change_lock.clone(), None);
            tx.add_output(output, vec![0u8; round * 1000])?;
            Ok(Capacity::zero())
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    assert_eq!(
        err.downcast_ref::<FeeError>(),
        Some(&FeeError::NotConverged { iterations: 4 })
    );
}

#[tokio::test]
async fn oracle_rate_is_floored() {
    let chain = MockChain::new();
    let completer = TransactionCompleter::from_chain(&chain);
    chain.set_fee_rate(FeeRate::from_u64(500));
    assert_eq!(
        completer.resolve_fee_rate(None).await.unwrap(),
        FeeRate::from_u64(1000)
    );
    chain.set_fee_rate(FeeRate::from_u64(3000));
    assert_eq!(
        completer.resolve_fee_rate(None).await.unwrap(),
        FeeRate::from_u64(3000)
    );
    assert_eq!(
        completer.resolve_fee_rate(Some(FeeRate::from_u64(1))).await.unwrap(),
        FeeRate::from_u64(1)
    );
}

#[tokio::test]
async fn fee_and_fee_rate_of_a_transaction() {
    let chain = MockChain::new();
    let owner = secp_lock([1; 20]);
    let cell = chain.add_capacity_cell(&owner, capacity_bytes!(100));
    let completer = TransactionCompleter::from_chain(&chain);

    let mut tx = pay(&owner, capacity_bytes!(99));
    tx.add_input(CellInput::new(cell.out_point.clone(), 0));
    assert_eq!(completer.fee(&mut tx).await.unwrap(), capacity_bytes!(1));
    let size = tx.serialized_size_in_block() as u64;
    assert_eq!(
        completer.fee_rate(&mut tx).await.unwrap(),
        FeeRate::from_u64(100_000_000 * 1000 / size)
    );

    let mut overspent = pay(&owner, capacity_bytes!(101));
    overspent.add_input(CellInput::new(cell.out_point, 0));
    let err = completer.fee(&mut overspent).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
    assert_eq!(
        err.downcast_ref::<CompletionError>(),
        Some(&CompletionError::NegativeFee {
            deficit: capacity_bytes!(1)
        })
    );
}
