use super::{sample_transaction, secp_lock};
use crate::{
    bytes::Bytes,
    core::{Capacity, DepType, FeeRate, capacity_bytes},
    packed::{Byte32, CellDep, CellOutput, OutPoint, Script, Transaction, WitnessArgs},
};

#[test]
fn add_output_fills_occupied_capacity() {
    let mut tx = Transaction::default();
    let lock = secp_lock([0; 20]);
    tx.add_output(CellOutput::new(Capacity::zero(), lock.clone(), None), Bytes::new())
        .unwrap();
    // 8 capacity + 32 code hash + 1 hash type + 20 args
    assert_eq!(tx.outputs[0].capacity, capacity_bytes!(61));

    let type_ = Script::default();
    tx.add_output(
        CellOutput::new(Capacity::zero(), lock.clone(), Some(type_)),
        vec![0u8; 16],
    )
    .unwrap();
    assert_eq!(tx.outputs[1].capacity, capacity_bytes!(61 + 33 + 16));

    tx.add_output(CellOutput::new(capacity_bytes!(1000), lock, None), Bytes::new())
        .unwrap();
    assert_eq!(tx.outputs[2].capacity, capacity_bytes!(1000));
    assert_eq!(tx.outputs_data.len(), 3);
    assert_eq!(tx.outputs_capacity().unwrap(), capacity_bytes!(61 + 110 + 1000));
}

#[test]
fn deps_are_deduplicated() {
    let mut tx = sample_transaction();
    let dep = tx.cell_deps[0].clone();
    let other = CellDep::new(OutPoint::new(Byte32::new([0x44; 32]), 0), DepType::Code);
    tx.add_cell_deps(vec![dep, other.clone(), other]);
    assert_eq!(tx.cell_deps.len(), 2);

    let header = Byte32::new([5; 32]);
    tx.add_header_deps(vec![header, header]);
    assert_eq!(tx.header_deps, vec![header]);
}

#[test]
fn witness_args_access() {
    let mut tx = sample_transaction();
    assert_eq!(tx.witness_args_at(0).unwrap(), Some(WitnessArgs::placeholder(65)));
    assert_eq!(tx.witness_args_at(5).unwrap(), None);

    let witness = WitnessArgs {
        output_type: Some(Bytes::from_static(b"xyz")),
        ..Default::default()
    };
    tx.set_witness_args_at(3, &witness);
    assert_eq!(tx.witnesses.len(), 4);
    assert!(tx.witnesses[1].is_empty());
    assert_eq!(tx.witness_args_at(1).unwrap(), None);
    assert_eq!(tx.witness_args_at(3).unwrap(), Some(witness));

    tx.witnesses[2] = Bytes::from_static(b"not a witness args");
    assert!(tx.witness_args_at(2).is_err());
}

#[test]
fn size_and_fee() {
    let tx = sample_transaction();
    assert_eq!(tx.serialized_size_in_block(), 355);
    assert_eq!(tx.estimate_fee(FeeRate::from_u64(1000)), Capacity::shannons(355));
    assert_eq!(tx.estimate_fee(FeeRate::from_u64(1500)), Capacity::shannons(533));
}

#[test]
fn token_balance_of_outputs() {
    let mut tx = Transaction::default();
    let token = Script::new(Byte32::new([7; 32]), crate::core::ScriptHashType::Type, vec![1]);
    let lock = secp_lock([0; 20]);
    for amount in [100u128, 250] {
        tx.add_output(
            CellOutput::new(Capacity::zero(), lock.clone(), Some(token.clone())),
            amount.to_le_bytes().to_vec(),
        )
        .unwrap();
    }
    tx.add_output(CellOutput::new(Capacity::zero(), lock.clone(), None), Bytes::new())
        .unwrap();
    assert_eq!(tx.outputs_token_balance(&token).unwrap(), 350);
    assert_eq!(tx.outputs_token_balance(&lock).unwrap(), 0);

    tx.add_output(
        CellOutput::new(Capacity::zero(), lock, Some(token.clone())),
        u128::MAX.to_le_bytes().to_vec(),
    )
    .unwrap();
    assert!(tx.outputs_token_balance(&token).is_err());
}
