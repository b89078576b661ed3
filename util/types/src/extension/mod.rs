//! Build and query operations on the packed entities.

mod transaction;

pub use transaction::TX_OFFSET_IN_BLOCK;
