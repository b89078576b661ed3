use crate::{
    bytes::Bytes,
    core::Capacity,
    packed::{CellInput, CellOutput, OutPoint},
};

/// Length of the little-endian `u128` balance at the head of token cell data.
pub const UDT_BALANCE_SIZE: usize = 16;

/// A live cell together with where it lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Where the cell lives.
    pub out_point: OutPoint,
    /// Capacity and scripts.
    pub output: CellOutput,
    /// Data stored in the cell.
    pub data: Bytes,
}

impl Cell {
    /// Creates a cell.
    pub fn new(out_point: OutPoint, output: CellOutput, data: Bytes) -> Self {
        Cell {
            out_point,
            output,
            data,
        }
    }

    /// Capacity held by the cell.
    pub fn capacity(&self) -> Capacity {
        self.output.capacity
    }

    /// Token balance stored in the cell data.
    pub fn udt_balance(&self) -> u128 {
        udt_balance_from_data(&self.data)
    }

    /// An input spending this cell, with the cell already resolved.
    pub fn into_input(self, since: u64) -> CellInput {
        CellInput::new_resolved(self.out_point, since, self.output, self.data)
    }
}

/// Decodes the little-endian `u128` balance from the head of token cell data.
///
/// Data shorter than 16 bytes decodes the available bytes.
pub fn udt_balance_from_data(data: &[u8]) -> u128 {
    let mut buf = [0u8; UDT_BALANCE_SIZE];
    let len = data.len().min(UDT_BALANCE_SIZE);
    buf[..len].copy_from_slice(&data[..len]);
    u128::from_le_bytes(buf)
}
