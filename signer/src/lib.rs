//! Transaction signers.
//!
//! A [`Signer`] owns one or more lock scripts. It prepares the witnesses of the lock groups it
//! owns and later fills them with signatures, never touching other witnesses. The key material
//! stays behind a signing primitive: a private key, a hardware device or a wallet extension.
//!
//! | strategy        | lock                           | witness lock                      |
//! |-----------------|--------------------------------|-----------------------------------|
//! | [`NativeSigner`]| secp256k1-blake160             | 65 bytes recoverable signature    |
//! | [`BtcSigner`]   | OmniLock, Bitcoin P2PKH auth   | OmniLock witness lock, 85 bytes   |
//! | [`EvmSigner`]   | OmniLock, Ethereum auth        | OmniLock witness lock, 85 bytes   |
//! |                 | OmniLock, legacy Ethereum args | 65 bytes personal-sign signature  |
//! | [`NostrSigner`] | Nostr lock                     | signed event JSON                 |

mod btc;
mod error;
mod evm;
mod native;
mod nostr;
pub mod primitive;
mod signer;

pub use btc::BtcSigner;
pub use error::SignerError;
pub use evm::EvmSigner;
pub use native::NativeSigner;
pub use nostr::{NOSTR_EVENT_KIND, NOSTR_SIGN_CONTENT, NostrEvent, NostrSigner};
pub use signer::{AnySigner, Signer, SignerKind};
