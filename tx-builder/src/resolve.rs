//! Resolution of the cells spent by inputs.
//!
//! A resolved cell is memoized in its input and never fetched again.

use ckb_error::Error;
use ckb_traits::CellResolver;
use ckb_types::{
    bytes::Bytes,
    core::{Capacity, cell::udt_balance_from_data, error::OutPointError},
    packed::{CellInput, CellOutput, Script, Transaction},
};
use log::trace;

/// Resolves the cell spent by `input`, fetching it on first use.
pub async fn resolve_input<'i>(
    input: &'i mut CellInput,
    resolver: &dyn CellResolver,
) -> Result<(&'i CellOutput, &'i Bytes), Error> {
    if !input.is_resolved() {
        trace!("resolve input {}", input.previous_output);
        let cell = resolver
            .get_cell(&input.previous_output)
            .await?
            .ok_or_else(|| OutPointError::Unknown(input.previous_output.clone()))?;
        input.set_resolved(cell.output, cell.data);
    }
    input
        .resolved()
        .ok_or_else(|| OutPointError::Unknown(input.previous_output.clone()).into())
}

/// Resolves every input of `tx`.
pub async fn resolve_inputs(tx: &mut Transaction, resolver: &dyn CellResolver) -> Result<(), Error> {
    for input in tx.inputs.iter_mut() {
        resolve_input(input, resolver).await?;
    }
    Ok(())
}

/// Sum of the capacity spent by inputs.
pub async fn inputs_capacity(
    tx: &mut Transaction,
    resolver: &dyn CellResolver,
) -> Result<Capacity, Error> {
    let mut total = Capacity::zero();
    for input in tx.inputs.iter_mut() {
        let (output, _) = resolve_input(input, resolver).await?;
        total = total.safe_add(output.capacity)?;
    }
    Ok(total)
}

/// Sum of the token balance spent by inputs whose type script is `type_script`.
pub async fn inputs_token_balance(
    tx: &mut Transaction,
    type_script: &Script,
    resolver: &dyn CellResolver,
) -> Result<u128, Error> {
    let mut total = 0u128;
    for input in tx.inputs.iter_mut() {
        let (output, data) = resolve_input(input, resolver).await?;
        if output.type_.as_ref() == Some(type_script) {
            total = total
                .checked_add(udt_balance_from_data(data))
                .ok_or(ckb_error::InternalErrorKind::BalanceOverflow)?;
        }
    }
    Ok(total)
}
