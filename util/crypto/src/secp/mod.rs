//! secp256k1 keys and 65 bytes recoverable signatures.

use once_cell::sync::Lazy;

/// A 32 bytes digest to be signed.
pub type Message = [u8; 32];

/// The global secp256k1 context.
pub static SECP256K1: Lazy<secp256k1::Secp256k1<secp256k1::All>> =
    Lazy::new(secp256k1::Secp256k1::new);

mod error;
mod generator;
mod privkey;
mod pubkey;
mod signature;

pub use self::error::Error;
pub use self::generator::Generator;
pub use self::privkey::Privkey;
pub use self::pubkey::Pubkey;
pub use self::signature::Signature;
