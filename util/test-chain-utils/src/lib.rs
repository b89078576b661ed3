//! Provide an in-memory chain used for testing.
mod mock_chain;

pub use mock_chain::{MockChain, secp_lock};
