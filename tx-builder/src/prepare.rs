use async_trait::async_trait;
use ckb_error::Error;
use ckb_traits::CellResolver;
use ckb_types::packed::Transaction;

/// Brings a transaction to its final shape before the fee is estimated.
///
/// Signers implement this to add their cell deps and placeholder witnesses, so the estimated
/// size covers the signatures to come.
#[async_trait]
pub trait PrepareTransaction: Send + Sync {
    async fn prepare_transaction(
        &self,
        tx: &mut Transaction,
        resolver: &dyn CellResolver,
    ) -> Result<(), Error>;
}

/// Leaves the transaction untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkipPreparation;

#[async_trait]
impl PrepareTransaction for SkipPreparation {
    async fn prepare_transaction(
        &self,
        _tx: &mut Transaction,
        _resolver: &dyn CellResolver,
    ) -> Result<(), Error> {
        Ok(())
    }
}
