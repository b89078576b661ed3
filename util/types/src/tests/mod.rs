mod address;
mod transaction;

use crate::{
    bytes::Bytes,
    core::{DepType, ScriptHashType, capacity_bytes},
    packed::{Byte32, CellDep, CellInput, CellOutput, OutPoint, Script, Transaction, WitnessArgs},
};

pub(crate) const SECP256K1_CODE_HASH: &str =
    "0x9bd7e06f3ecf4be0f2fcd2188b23f1b9fcc88e5d4b65a8637b17723bbda3cce8";

pub(crate) fn secp_lock(args: [u8; 20]) -> Script {
    Script::new(
        SECP256K1_CODE_HASH.parse().unwrap(),
        ScriptHashType::Type,
        args.to_vec(),
    )
}

/// One dep group, one input, one 100 CKB output and a 65 bytes placeholder witness.
pub(crate) fn sample_transaction() -> Transaction {
    let mut tx = Transaction::default();
    tx.add_cell_deps(Some(CellDep::new(
        OutPoint::new(Byte32::new([0x11; 32]), 0),
        DepType::DepGroup,
    )));
    tx.add_input(CellInput::new(OutPoint::new(Byte32::new([0x22; 32]), 1), 0));
    tx.add_output(
        CellOutput::new(capacity_bytes!(100), secp_lock([0x33; 20]), None),
        Bytes::new(),
    )
    .unwrap();
    tx.set_witness_args_at(0, &WitnessArgs::placeholder(65));
    tx
}
