//! Rust types.
//!
//! Plain enums and helpers built around the packed entities.

pub mod cell;
pub mod error;
pub mod known_scripts;

mod blockchain;
mod fee_rate;
mod since;

pub use blockchain::{DepType, ScriptHashType};
pub use cell::Cell;
pub use fee_rate::FeeRate;
pub use known_scripts::{KnownScript, KnownScripts, ScriptInfo};
pub use since::{Since, SinceMetric};

pub use ckb_occupied_capacity::{Capacity, Result as CapacityResult, capacity_bytes};
/// Version of a transaction.
pub type Version = u32;
