//! Completes CKB transactions against a live chain.
//!
//! - [`resolve`] fetches and memoizes the cells referenced by inputs.
//! - [`sighash`] finds the witness a lock group signs and the digest it must sign.
//! - [`TransactionCompleter`] selects input cells and converges the fee.

mod completer;
mod error;
mod fee;
mod prepare;
pub mod resolve;
pub mod sighash;

pub use completer::{
    Accumulated, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_FEE_RATE, FeeSettings, InputsCompletion,
    TransactionCompleter, capacity_filter, token_filter,
};
pub use error::{CompletionError, FeeError};
pub use fee::FeeCompletion;
pub use prepare::{PrepareTransaction, SkipPreparation};
pub use sighash::SighashInfo;
