//! # The Core Types Library
//!
//! This Library provides the transaction entities, their canonical molecule encoding and the
//! address codec.

pub mod prelude;

pub use bytes;
pub use molecule::error;

mod codec;
pub mod packed;
pub mod core;

pub mod address;
pub mod conversion;
mod extension;
pub mod partial;

pub use extension::TX_OFFSET_IN_BLOCK;

#[cfg(test)]
mod tests;
