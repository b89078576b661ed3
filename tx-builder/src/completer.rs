use ckb_error::Error;
use ckb_traits::{CellFilter, CellResolver, FeeRateProvider, LiveCellSource, SearchKey};
use ckb_types::{
    core::{Capacity, Cell, FeeRate},
    packed::{Script, Transaction},
};
use futures::TryStreamExt;
use log::{debug, trace};
use std::ops::ControlFlow;

use crate::{error::CompletionError, resolve};

/// Fee rate floor applied to rates reported by the oracle, in shannons per 1000 bytes.
pub const DEFAULT_MIN_FEE_RATE: FeeRate = FeeRate::from_u64(1000);
/// Rounds of the fee loop before it gives up.
pub const DEFAULT_MAX_ITERATIONS: usize = 32;

/// Settings of the fee loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSettings {
    pub min_fee_rate: FeeRate,
    pub max_iterations: usize,
}

impl Default for FeeSettings {
    fn default() -> Self {
        FeeSettings {
            min_fee_rate: DEFAULT_MIN_FEE_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// How an input completion ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Accumulated<T> {
    /// The accumulator reported the requirement met.
    Fulfilled,
    /// The candidates ran out, carrying the last accumulated value.
    Exhausted(T),
}

/// Result of [`TransactionCompleter::complete_inputs`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputsCompletion<T> {
    /// Inputs appended to the transaction.
    pub added: usize,
    pub accumulated: Accumulated<T>,
}

/// Cells holding only capacity: no type script and no data.
pub fn capacity_filter() -> CellFilter {
    CellFilter {
        script_len_range: Some([0, 1]),
        output_data_len_range: Some([0, 1]),
        ..Default::default()
    }
}

/// Token cells of `type_script`, whose data starts with a 16 bytes balance.
pub fn token_filter(type_script: Script) -> CellFilter {
    CellFilter {
        script: Some(type_script),
        output_data_len_range: Some([16, 0xFFFF_FFFF]),
        ..Default::default()
    }
}

/// Completes transactions with cells from a live chain.
///
/// Inputs are selected greedily: candidates are taken in the order the source yields them until
/// the requirement is met. Cells already spent by the transaction are skipped.
pub struct TransactionCompleter<'a> {
    pub(crate) resolver: &'a dyn CellResolver,
    pub(crate) cells: &'a dyn LiveCellSource,
    pub(crate) fee_rates: &'a dyn FeeRateProvider,
    pub(crate) settings: FeeSettings,
    pub(crate) capacity_filter: CellFilter,
}

impl<'a> TransactionCompleter<'a> {
    pub fn new(
        resolver: &'a dyn CellResolver,
        cells: &'a dyn LiveCellSource,
        fee_rates: &'a dyn FeeRateProvider,
    ) -> Self {
        TransactionCompleter {
            resolver,
            cells,
            fee_rates,
            settings: FeeSettings::default(),
            capacity_filter: capacity_filter(),
        }
    }

    /// Uses one chain client for all three interfaces.
    pub fn from_chain<C>(chain: &'a C) -> Self
    where
        C: CellResolver + LiveCellSource + FeeRateProvider,
    {
        Self::new(chain, chain, chain)
    }

    pub fn with_settings(mut self, settings: FeeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the filter used to find cells paying capacity and fees.
    pub fn with_capacity_filter(mut self, filter: CellFilter) -> Self {
        self.capacity_filter = filter;
        self
    }

    pub fn settings(&self) -> FeeSettings {
        self.settings
    }

    pub fn resolver(&self) -> &'a dyn CellResolver {
        self.resolver
    }

    /// Sum of the capacity spent by inputs.
    pub async fn inputs_capacity(&self, tx: &mut Transaction) -> Result<Capacity, Error> {
        resolve::inputs_capacity(tx, self.resolver).await
    }

    /// Appends cells locked by `from` and matching `filter` until `accumulator` breaks.
    ///
    /// The accumulator sees each cell before it is appended. The cell is appended either way, a
    /// `Break` then stops pulling candidates.
    pub async fn complete_inputs<T, F>(
        &self,
        tx: &mut Transaction,
        from: &[Script],
        filter: &CellFilter,
        init: T,
        accumulator: F,
    ) -> Result<InputsCompletion<T>, Error>
    where
        F: FnMut(T, &Cell) -> Result<ControlFlow<(), T>, Error>,
    {
        self.complete_inputs_where(tx, from, filter, |_| true, init, accumulator)
            .await
    }

    /// Like `complete_inputs`, skipping candidates rejected by `accept`.
    async fn complete_inputs_where<T, P, F>(
        &self,
        tx: &mut Transaction,
        from: &[Script],
        filter: &CellFilter,
        accept: P,
        init: T,
        mut accumulator: F,
    ) -> Result<InputsCompletion<T>, Error>
    where
        P: Fn(&Cell) -> bool,
        F: FnMut(T, &Cell) -> Result<ControlFlow<(), T>, Error>,
    {
        let mut acc = init;
        let mut added = 0;
        for lock in from {
            let key = SearchKey::by_lock(lock.clone()).with_filter(filter.clone());
            let mut cells = self.cells.find_cells(key);
            while let Some(cell) = cells.try_next().await? {
                if tx
                    .inputs
                    .iter()
                    .any(|input| input.previous_output == cell.out_point)
                {
                    trace!("skip cell {} already spent by the transaction", cell.out_point);
                    continue;
                }
                if !accept(&cell) {
                    trace!("skip cell {} rejected by the caller", cell.out_point);
                    continue;
                }
                trace!("collect cell {} of {}", cell.out_point, cell.capacity());
                let flow = accumulator(acc, &cell)?;
                tx.add_input(cell.into_input(0));
                added += 1;
                match flow {
                    ControlFlow::Break(()) => {
                        debug!("requirement met after collecting {added} cells");
                        return Ok(InputsCompletion {
                            added,
                            accumulated: Accumulated::Fulfilled,
                        });
                    }
                    ControlFlow::Continue(next) => acc = next,
                }
            }
        }
        debug!("candidates exhausted after collecting {added} cells");
        Ok(InputsCompletion {
            added,
            accumulated: Accumulated::Exhausted(acc),
        })
    }

    /// Adds inputs until they cover the outputs capacity plus `extra`.
    ///
    /// Returns the number of inputs added, zero when the inputs already suffice.
    pub async fn complete_inputs_by_capacity(
        &self,
        tx: &mut Transaction,
        from: &[Script],
        extra: Capacity,
    ) -> Result<usize, Error> {
        let expected =
            u128::from(tx.outputs_capacity()?.as_u64()) + u128::from(extra.as_u64());
        let collected = u128::from(self.inputs_capacity(tx).await?.as_u64());
        if collected >= expected {
            return Ok(0);
        }
        debug!("collect capacity, {collected} of {expected} shannons available");
        let completion = self
            .complete_inputs(tx, from, &self.capacity_filter, collected, |sum, cell| {
                let sum = sum + u128::from(cell.capacity().as_u64());
                Ok(if sum >= expected {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(sum)
                })
            })
            .await?;
        match completion.accumulated {
            Accumulated::Fulfilled => Ok(completion.added),
            Accumulated::Exhausted(sum) => {
                let shortfall = u64::try_from(expected - sum).unwrap_or(u64::MAX);
                Err(CompletionError::InsufficientCapacity {
                    shortfall: Capacity::shannons(shortfall),
                    for_change: false,
                }
                .into())
            }
        }
    }

    /// Adds token cells of `type_script` until inputs cover the outputs balance plus `extra`.
    pub async fn complete_inputs_by_token(
        &self,
        tx: &mut Transaction,
        from: &[Script],
        type_script: &Script,
        extra: u128,
    ) -> Result<usize, Error> {
        let expected = tx
            .outputs_token_balance(type_script)?
            .checked_add(extra)
            .ok_or(ckb_error::InternalErrorKind::BalanceOverflow)?;
        let collected = resolve::inputs_token_balance(tx, type_script, self.resolver).await?;
        if collected >= expected {
            return Ok(0);
        }
        debug!("collect token {}, {collected} of {expected} available", type_script.hash());
        // the filter matches type scripts by prefix
        let filter = token_filter(type_script.clone());
        let same_token = |cell: &Cell| cell.output.type_.as_ref() == Some(type_script);
        let completion = self
            .complete_inputs_where(tx, from, &filter, same_token, collected, |sum, cell| {
                let sum = sum
                    .checked_add(cell.udt_balance())
                    .ok_or(ckb_error::InternalErrorKind::BalanceOverflow)?;
                Ok(if sum >= expected {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(sum)
                })
            })
            .await?;
        match completion.accumulated {
            Accumulated::Fulfilled => Ok(completion.added),
            Accumulated::Exhausted(sum) => {
                Err(CompletionError::insufficient_token(type_script, expected - sum).into())
            }
        }
    }

    /// Adds every matching cell, defaulting to the capacity filter.
    pub async fn complete_inputs_all(
        &self,
        tx: &mut Transaction,
        from: &[Script],
        filter: Option<&CellFilter>,
    ) -> Result<usize, Error> {
        let filter = filter.unwrap_or(&self.capacity_filter);
        let completion = self
            .complete_inputs(tx, from, filter, (), |(), _| Ok(ControlFlow::Continue(())))
            .await?;
        Ok(completion.added)
    }

    /// Adds one capacity cell when the transaction has no input.
    pub async fn complete_inputs_at_least_one(
        &self,
        tx: &mut Transaction,
        from: &[Script],
    ) -> Result<usize, Error> {
        if !tx.inputs.is_empty() {
            return Ok(0);
        }
        let completion = self
            .complete_inputs(tx, from, &self.capacity_filter, (), |(), _| {
                Ok(ControlFlow::Break(()))
            })
            .await?;
        match completion.accumulated {
            Accumulated::Fulfilled => Ok(completion.added),
            Accumulated::Exhausted(()) => Err(CompletionError::NoLiveCells.into()),
        }
    }

    /// Tells the cell source the inputs of `tx` are spent by a pending transaction.
    pub async fn mark_inputs_used(&self, tx: &Transaction) -> Result<(), Error> {
        for input in &tx.inputs {
            self.cells.mark_unusable(&input.previous_output).await?;
        }
        Ok(())
    }
}
