//! The fee loop.
//!
//! The fee depends on the transaction size, which grows with the inputs collected to pay the fee
//! and with the change output. Each round works on a copy of the transaction:
//!
//! 1. collect inputs covering the outputs, the fee estimate and the capacity the change asked for;
//! 2. let the preparer place placeholder witnesses, then estimate the fee if none is known yet;
//! 3. stop when the surplus equals the fee, otherwise hand the leftover to the change strategy;
//! 4. if the change needs more capacity, collect again; otherwise re-estimate the fee and stop when
//!    it is unchanged.
//!
//! The copy replaces the transaction only when a round converges.

use ckb_error::Error;
use ckb_types::{
    bytes::Bytes,
    core::{Capacity, FeeRate},
    packed::{CellOutput, Script, Transaction},
};
use log::debug;

use crate::{
    completer::TransactionCompleter,
    error::{CompletionError, FeeError},
    prepare::PrepareTransaction,
    resolve,
};

/// Result of a converged fee loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeCompletion {
    /// Inputs appended to the transaction.
    pub added_inputs: usize,
    /// Whether the change strategy took the leftover capacity.
    pub change_created: bool,
}

fn for_change(err: Error) -> Error {
    match err.downcast_ref::<CompletionError>() {
        Some(CompletionError::InsufficientCapacity { shortfall, .. }) => {
            CompletionError::InsufficientCapacity {
                shortfall: *shortfall,
                for_change: true,
            }
            .into()
        }
        _ => err,
    }
}

impl TransactionCompleter<'_> {
    /// `fee_rate`, or the oracle rate floored at the minimum fee rate.
    pub async fn resolve_fee_rate(&self, fee_rate: Option<FeeRate>) -> Result<FeeRate, Error> {
        match fee_rate {
            Some(fee_rate) => Ok(fee_rate),
            None => Ok(self.fee_rates.fee_rate().await?.max(self.settings.min_fee_rate)),
        }
    }

    /// The capacity inputs spend beyond outputs.
    pub async fn fee(&self, tx: &mut Transaction) -> Result<Capacity, Error> {
        let inputs = self.inputs_capacity(tx).await?;
        let outputs = tx.outputs_capacity()?;
        inputs.safe_sub(outputs).map_err(|_| {
            CompletionError::NegativeFee {
                deficit: Capacity::shannons(outputs.as_u64() - inputs.as_u64()),
            }
            .into()
        })
    }

    /// The fee rate `tx` pays by its size in a block.
    pub async fn fee_rate(&self, tx: &mut Transaction) -> Result<FeeRate, Error> {
        let fee = self.fee(tx).await?;
        Ok(FeeRate::from_fee(fee, tx.serialized_size_in_block()))
    }

    /// Runs the fee loop with a caller supplied change strategy.
    ///
    /// `change` receives the candidate and the capacity left after the fee. It either takes all
    /// of it into outputs and returns zero, or returns the capacity it needs in addition to
    /// create the change.
    pub async fn complete_fee<F>(
        &self,
        tx: &mut Transaction,
        from: &[Script],
        preparer: &dyn PrepareTransaction,
        fee_rate: Option<FeeRate>,
        mut change: F,
    ) -> Result<FeeCompletion, Error>
    where
        F: FnMut(&mut Transaction, Capacity) -> Result<Capacity, Error>,
    {
        let fee_rate = self.resolve_fee_rate(fee_rate).await?;
        resolve::resolve_inputs(tx, self.resolver).await?;

        let mut least_fee = Capacity::zero();
        let mut least_extra = Capacity::zero();
        for round in 0..self.settings.max_iterations {
            let mut candidate = tx.clone();
            let added = self
                .complete_inputs_by_capacity(&mut candidate, from, least_fee.safe_add(least_extra)?)
                .await
                .map_err(|err| {
                    if least_extra == Capacity::zero() {
                        err
                    } else {
                        for_change(err)
                    }
                })?;
            preparer
                .prepare_transaction(&mut candidate, self.resolver)
                .await?;
            if least_fee == Capacity::zero() {
                least_fee = candidate.estimate_fee(fee_rate);
            }

            let inputs = self.inputs_capacity(&mut candidate).await?;
            let outputs = candidate.outputs_capacity()?;
            let extra = inputs.safe_sub(outputs)?;
            debug!(
                "fee round {round}: {added} inputs added, extra {extra}, fee {least_fee}"
            );
            if extra == least_fee {
                *tx = candidate;
                return Ok(FeeCompletion {
                    added_inputs: added,
                    change_created: false,
                });
            }
            if extra < least_fee {
                continue;
            }

            let needed = change(&mut candidate, extra.safe_sub(least_fee)?)?;
            let changed_outputs = candidate.outputs_capacity()?;
            if changed_outputs < outputs {
                return Err(FeeError::ChangeReducedOutputs {
                    before: outputs,
                    after: changed_outputs,
                }
                .into());
            }
            if needed > Capacity::zero() {
                debug!("the change needs {needed} more");
                least_extra = needed;
                continue;
            }
            let remaining = inputs.safe_sub(changed_outputs).unwrap_or_default();
            if remaining != least_fee {
                return Err(FeeError::ChangeLeftCapacity {
                    expected: least_fee,
                    actual: remaining,
                }
                .into());
            }

            preparer
                .prepare_transaction(&mut candidate, self.resolver)
                .await?;
            let changed_fee = candidate.estimate_fee(fee_rate);
            if changed_fee < least_fee {
                return Err(FeeError::FeeDecreased {
                    before: least_fee,
                    after: changed_fee,
                }
                .into());
            }
            if changed_fee == least_fee {
                *tx = candidate;
                return Ok(FeeCompletion {
                    added_inputs: added,
                    change_created: true,
                });
            }
            least_fee = changed_fee;
        }
        Err(FeeError::NotConverged {
            iterations: self.settings.max_iterations,
        }
        .into())
    }

    /// Runs the fee loop sending the change to a new output locked by `change_lock`.
    pub async fn complete_fee_change_to_lock(
        &self,
        tx: &mut Transaction,
        from: &[Script],
        preparer: &dyn PrepareTransaction,
        change_lock: &Script,
        fee_rate: Option<FeeRate>,
    ) -> Result<FeeCompletion, Error> {
        self.complete_fee(tx, from, preparer, fee_rate, |tx, leftover| {
            let output = CellOutput::new(Capacity::zero(), change_lock.clone(), None);
            let occupied = output.occupied_capacity(0)?;
            if leftover < occupied {
                return Ok(occupied);
            }
            tx.add_output(CellOutput { capacity: leftover, ..output }, Bytes::new())?;
            Ok(Capacity::zero())
        })
        .await
    }

    /// Runs the fee loop adding the change to the output at `index`.
    pub async fn complete_fee_change_to_output(
        &self,
        tx: &mut Transaction,
        from: &[Script],
        preparer: &dyn PrepareTransaction,
        index: usize,
        fee_rate: Option<FeeRate>,
    ) -> Result<FeeCompletion, Error> {
        let len = tx.outputs.len();
        if index >= len {
            return Err(FeeError::OutputIndexOutOfRange { index, len }.into());
        }
        self.complete_fee(tx, from, preparer, fee_rate, |tx, leftover| {
            let len = tx.outputs.len();
            let output = tx
                .outputs
                .get_mut(index)
                .ok_or(FeeError::OutputIndexOutOfRange { index, len })?;
            output.capacity = output.capacity.safe_add(leftover)?;
            Ok(Capacity::zero())
        })
        .await
    }
}
