//! The entities with a canonical molecule encoding.
//!
//! Schema, all numbers little-endian:
//!
//! ```text
//! struct OutPoint { tx_hash: Byte32, index: Uint32 }
//! struct CellInput { since: Uint64, previous_output: OutPoint }
//! struct CellDep { out_point: OutPoint, dep_type: byte }
//! table Script { code_hash: Byte32, hash_type: byte, args: Bytes }
//! table CellOutput { capacity: Uint64, lock: Script, type_: ScriptOpt }
//! table WitnessArgs { lock: BytesOpt, input_type: BytesOpt, output_type: BytesOpt }
//! table RawTransaction {
//!     version: Uint32, cell_deps: CellDepVec, header_deps: Byte32Vec,
//!     inputs: CellInputVec, outputs: CellOutputVec, outputs_data: BytesVec,
//! }
//! table Transaction { raw: RawTransaction, witnesses: BytesVec }
//! ```

mod byte32;
mod cell;
mod script;
mod transaction;
mod witness;

pub use byte32::Byte32;
pub use cell::{CellDep, CellInput, CellOutput, OutPoint};
pub use script::Script;
pub use transaction::Transaction;
pub use witness::{OmniLockWitnessLock, WitnessArgs};
