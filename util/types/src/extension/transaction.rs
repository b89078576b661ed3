use ckb_error::{Error, InternalErrorKind};

use crate::{
    bytes::Bytes,
    core::{Capacity, CapacityResult, FeeRate, cell::udt_balance_from_data, error::EncodingError},
    packed::{Byte32, CellDep, CellInput, CellOutput, Script, Transaction, WitnessArgs},
    prelude::Entity,
};

/// Bytes a transaction adds to a block beyond its own encoding: its offset in the transactions vector.
pub const TX_OFFSET_IN_BLOCK: usize = 4;

impl Transaction {
    /// Appends an input.
    pub fn add_input(&mut self, input: CellInput) {
        self.inputs.push(input);
    }

    /// Appends an output and its data.
    ///
    /// A zero capacity is replaced by the minimal capacity the output occupies with its data.
    pub fn add_output(&mut self, mut output: CellOutput, data: impl Into<Bytes>) -> CapacityResult<()> {
        let data = data.into();
        if output.capacity == Capacity::zero() {
            output.capacity = output.occupied_capacity(data.len())?;
        }
        self.outputs.push(output);
        self.outputs_data.push(data);
        Ok(())
    }

    /// Appends cell deps which are not already present.
    pub fn add_cell_deps<I: IntoIterator<Item = CellDep>>(&mut self, cell_deps: I) {
        for cell_dep in cell_deps {
            if !self.cell_deps.contains(&cell_dep) {
                self.cell_deps.push(cell_dep);
            }
        }
    }

    /// Appends header deps which are not already present.
    pub fn add_header_deps<I: IntoIterator<Item = Byte32>>(&mut self, header_deps: I) {
        for header_dep in header_deps {
            if !self.header_deps.contains(&header_dep) {
                self.header_deps.push(header_dep);
            }
        }
    }

    /// Decodes the witness at `index` as `WitnessArgs`.
    ///
    /// A missing or empty witness is `None`.
    pub fn witness_args_at(&self, index: usize) -> Result<Option<WitnessArgs>, EncodingError> {
        match self.witnesses.get(index) {
            Some(witness) if !witness.is_empty() => WitnessArgs::from_slice(witness).map(Some),
            _ => Ok(None),
        }
    }

    /// Stores `witness` at `index`, padding missing witnesses with empty bytes.
    pub fn set_witness_args_at(&mut self, index: usize, witness: &WitnessArgs) {
        if self.witnesses.len() <= index {
            self.witnesses.resize(index + 1, Bytes::new());
        }
        self.witnesses[index] = witness.as_bytes();
    }

    /// Size the transaction takes in a block.
    pub fn serialized_size_in_block(&self) -> usize {
        self.serialized_size() + TX_OFFSET_IN_BLOCK
    }

    /// Fee paid at `fee_rate` by the current size.
    pub fn estimate_fee(&self, fee_rate: FeeRate) -> Capacity {
        fee_rate.fee(self.serialized_size_in_block())
    }

    /// Sum of the outputs capacity.
    pub fn outputs_capacity(&self) -> CapacityResult<Capacity> {
        Capacity::safe_sum(self.outputs.iter().map(|output| output.capacity))
    }

    /// Sum of the token balance over outputs whose type script is `type_script`.
    pub fn outputs_token_balance(&self, type_script: &Script) -> Result<u128, Error> {
        self.outputs
            .iter()
            .zip(self.outputs_data.iter())
            .filter(|(output, _)| output.type_.as_ref() == Some(type_script))
            .try_fold(0u128, |sum, (_, data)| {
                sum.checked_add(udt_balance_from_data(data))
                    .ok_or_else(|| InternalErrorKind::BalanceOverflow.into())
            })
    }
}
