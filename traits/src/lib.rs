//! The interfaces the transaction kit consumes.
//!
//! Implementations wrap a node RPC, an indexer or an in-memory chain. Errors they return are
//! propagated unmodified, usually tagged with [`ErrorKind::External`](ckb_error::ErrorKind).

mod cell_resolver;
mod fee_rate_provider;
mod live_cell_source;

pub use cell_resolver::CellResolver;
pub use fee_rate_provider::FeeRateProvider;
pub use live_cell_source::{CellFilter, LiveCellSource, ScriptType, SearchKey, SearchMode};
