use async_trait::async_trait;
use ckb_error::Error;
use ckb_types::{core::Cell, packed::OutPoint};
use std::sync::Arc;

/// Resolves an out-point to the cell it references.
#[async_trait]
pub trait CellResolver: Send + Sync {
    /// Returns `None` when the cell is unknown.
    async fn get_cell(&self, out_point: &OutPoint) -> Result<Option<Cell>, Error>;
}

#[async_trait]
impl<T: CellResolver + ?Sized> CellResolver for Arc<T> {
    async fn get_cell(&self, out_point: &OutPoint) -> Result<Option<Cell>, Error> {
        self.as_ref().get_cell(out_point).await
    }
}
