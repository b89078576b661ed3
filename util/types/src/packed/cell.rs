use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    bytes::Bytes,
    codec,
    core::{Capacity, DepType, error::EncodingError},
    packed::{Byte32, Script},
    prelude::Entity,
};

/// Reference to an output of a committed transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutPoint {
    /// Hash of the transaction which created the cell.
    pub tx_hash: Byte32,
    /// Index of the cell in the transaction outputs.
    pub index: u32,
}

impl OutPoint {
    /// Encoded size.
    pub const SIZE: usize = 36;

    /// Creates an out-point.
    pub fn new(tx_hash: Byte32, index: u32) -> Self {
        OutPoint { tx_hash, index }
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.tx_hash, self.index)
    }
}

impl Entity for OutPoint {
    const NAME: &'static str = "OutPoint";

    fn write_to(&self, out: &mut Vec<u8>) {
        self.tx_hash.write_to(out);
        out.extend_from_slice(&self.index.to_le_bytes());
    }

    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        codec::check_struct(Self::NAME, slice, Self::SIZE)?;
        Ok(OutPoint {
            tx_hash: Byte32::from_slice(&slice[..32])?,
            index: codec::read_u32("Uint32", &slice[32..])?,
        })
    }
}

/// A cell output: capacity, lock script and an optional type script.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellOutput {
    /// Native capacity held by the cell.
    pub capacity: Capacity,
    /// Who can consume the cell.
    pub lock: Script,
    /// Rules the cell data follows, if any.
    pub type_: Option<Script>,
}

impl CellOutput {
    /// Creates an output.
    pub fn new(capacity: Capacity, lock: Script, type_: Option<Script>) -> Self {
        CellOutput {
            capacity,
            lock,
            type_,
        }
    }

    /// Bytes the output occupies without its data.
    pub fn occupied_size(&self) -> usize {
        8 + self.lock.occupied_size() + self.type_.as_ref().map_or(0, Script::occupied_size)
    }

    /// Minimal capacity to hold this output together with `data_len` bytes of data.
    pub fn occupied_capacity(&self, data_len: usize) -> ckb_occupied_capacity::Result<Capacity> {
        Capacity::bytes(self.occupied_size() + data_len)
    }
}

impl Entity for CellOutput {
    const NAME: &'static str = "CellOutput";

    fn write_to(&self, out: &mut Vec<u8>) {
        let capacity = self.capacity.as_u64().to_le_bytes();
        let lock = self.lock.to_vec();
        let mut type_ = Vec::new();
        Script::write_option(self.type_.as_ref(), &mut type_);
        codec::write_dynamic(out, &[&capacity[..], &lock[..], &type_[..]]);
    }

    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        let fields = codec::read_table(Self::NAME, slice, 3)?;
        Ok(CellOutput {
            capacity: Capacity::shannons(codec::read_u64("Uint64", fields[0])?),
            lock: Script::from_slice(fields[1])?,
            type_: codec::read_option(fields[2], Script::from_slice)?,
        })
    }
}

/// An input spending a live cell.
///
/// The referenced cell is resolved lazily and memoized in the input. Once populated the cache is
/// never fetched again. The cache takes no part in encoding or equality.
#[derive(Clone, Debug, Default)]
pub struct CellInput {
    /// The cell being spent.
    pub previous_output: OutPoint,
    /// Lock time, see [`Since`](crate::core::Since).
    pub since: u64,
    cell_output: Option<CellOutput>,
    output_data: Option<Bytes>,
}

impl CellInput {
    /// Encoded size.
    pub const SIZE: usize = 44;

    /// Creates an input with an unresolved cell.
    pub fn new(previous_output: OutPoint, since: u64) -> Self {
        CellInput {
            previous_output,
            since,
            cell_output: None,
            output_data: None,
        }
    }

    /// Creates an input whose cell is already known.
    pub fn new_resolved(
        previous_output: OutPoint,
        since: u64,
        cell_output: CellOutput,
        output_data: Bytes,
    ) -> Self {
        CellInput {
            previous_output,
            since,
            cell_output: Some(cell_output),
            output_data: Some(output_data),
        }
    }

    /// The memoized cell, if resolved.
    pub fn resolved(&self) -> Option<(&CellOutput, &Bytes)> {
        match (&self.cell_output, &self.output_data) {
            (Some(output), Some(data)) => Some((output, data)),
            _ => None,
        }
    }

    /// Whether the cell has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.resolved().is_some()
    }

    /// Memoizes the resolved cell. An already populated cache is kept.
    pub fn set_resolved(&mut self, cell_output: CellOutput, output_data: Bytes) {
        if !self.is_resolved() {
            self.cell_output = Some(cell_output);
            self.output_data = Some(output_data);
        }
    }
}

impl PartialEq for CellInput {
    fn eq(&self, other: &Self) -> bool {
        self.previous_output == other.previous_output && self.since == other.since
    }
}

impl Eq for CellInput {}

impl Entity for CellInput {
    const NAME: &'static str = "CellInput";

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.since.to_le_bytes());
        self.previous_output.write_to(out);
    }

    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        codec::check_struct(Self::NAME, slice, Self::SIZE)?;
        Ok(CellInput::new(
            OutPoint::from_slice(&slice[8..])?,
            codec::read_u64("Uint64", &slice[..8])?,
        ))
    }
}

/// A dependency on code or data living in another cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellDep {
    /// The referenced cell.
    pub out_point: OutPoint,
    /// How the cell is loaded.
    pub dep_type: DepType,
}

impl CellDep {
    /// Encoded size.
    pub const SIZE: usize = 37;

    /// Creates a cell dep.
    pub fn new(out_point: OutPoint, dep_type: DepType) -> Self {
        CellDep {
            out_point,
            dep_type,
        }
    }
}

impl Entity for CellDep {
    const NAME: &'static str = "CellDep";

    fn write_to(&self, out: &mut Vec<u8>) {
        self.out_point.write_to(out);
        out.push(self.dep_type.into());
    }

    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        codec::check_struct(Self::NAME, slice, Self::SIZE)?;
        Ok(CellDep {
            out_point: OutPoint::from_slice(&slice[..OutPoint::SIZE])?,
            dep_type: DepType::try_from(slice[OutPoint::SIZE])?,
        })
    }
}
