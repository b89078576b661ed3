//! Configuration of the transaction kit.
//!
//! ```toml
//! network = "testnet"
//!
//! [fee]
//! min_fee_rate = 1000
//! max_iterations = 32
//!
//! [[scripts]]
//! name = "OmniLock"
//! code_hash = "0x..."
//! hash_type = "type"
//! cell_deps = [{ out_point = { tx_hash = "0x...", index = 0 }, dep_type = "code" }]
//! ```
mod error;
mod sdk_config;

pub use error::ConfigError;
pub use sdk_config::{FeeConfig, ScriptConfig, SdkConfig};

#[cfg(test)]
mod tests;
