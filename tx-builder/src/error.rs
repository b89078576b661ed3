use ckb_error::{Error, ErrorKind, impl_error_conversion_with_kind, prelude::*};
use ckb_types::{core::Capacity, packed::Script};

/// Coin selection could not meet its requirement.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CompletionError {
    /// The candidates ran out `shortfall` short of the required capacity.
    #[error("insufficient capacity, {shortfall} more needed{}", change_note(.for_change))]
    InsufficientCapacity {
        shortfall: Capacity,
        /// The shortfall arose while funding a change output.
        for_change: bool,
    },

    /// The candidates ran out `shortfall` short of the required token amount.
    #[error("insufficient token of type {type_script_hash}, {shortfall} more needed")]
    InsufficientToken {
        type_script_hash: String,
        shortfall: u128,
    },

    /// Outputs hold more capacity than inputs.
    #[error("outputs exceed inputs by {deficit}")]
    NegativeFee { deficit: Capacity },

    /// No live cell is available for the transaction.
    #[error("no live cell is available")]
    NoLiveCells,
}

fn change_note(for_change: &bool) -> &'static str {
    if *for_change { " for the change" } else { "" }
}

impl CompletionError {
    pub(crate) fn insufficient_token(type_script: &Script, shortfall: u128) -> Self {
        CompletionError::InsufficientToken {
            type_script_hash: type_script.hash().to_string(),
            shortfall,
        }
    }
}

impl_error_conversion_with_kind!(CompletionError, ErrorKind::InsufficientFunds, Error);

/// A change strategy broke the rules of the fee loop.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FeeError {
    #[error("the change reduced the outputs capacity from {before} to {after}")]
    ChangeReducedOutputs { before: Capacity, after: Capacity },

    #[error("the change left {actual} for the fee while {expected} is expected")]
    ChangeLeftCapacity { expected: Capacity, actual: Capacity },

    #[error("the fee decreased from {before} to {after} after the change")]
    FeeDecreased { before: Capacity, after: Capacity },

    #[error("the fee did not converge in {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("no output at index {index}, the transaction has {len}")]
    OutputIndexOutOfRange { index: usize, len: usize },
}

impl_error_conversion_with_kind!(FeeError, ErrorKind::InvariantViolation, Error);
