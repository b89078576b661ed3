//! Transaction construction, canonical serialization and multi-chain signing for CKB.
//!
//! A transfer is built in four steps:
//!
//! 1. fill outputs on a [`Transaction`], for instance to an [`Address`] decoded against the
//!    [`KnownScripts`] of [`SdkConfig::known_scripts`];
//! 2. collect inputs and a change output with [`TransactionCompleter::complete_fee_change_to_lock`],
//!    passing the signer as the preparer so the fee covers the final witnesses;
//! 3. sign with [`Signer::sign_only_transaction`];
//! 4. serialize with [`Entity::as_bytes`].
//!
//! The resolver, live cell source and fee rate oracle are the [`traits`] the caller implements
//! on top of a node or an indexer.

pub use ckb_app_config as app_config;
pub use ckb_crypto as crypto;
pub use ckb_error as error;
pub use ckb_hash as hash;
pub use ckb_signer as signer;
pub use ckb_traits as traits;
pub use ckb_tx_builder as tx_builder;
pub use ckb_types as types;

pub use ckb_app_config::SdkConfig;
pub use ckb_error::{Error, ErrorKind};
pub use ckb_occupied_capacity::{Capacity, capacity_bytes};
pub use ckb_signer::{AnySigner, BtcSigner, EvmSigner, NativeSigner, NostrSigner, Signer, SignerKind};
pub use ckb_tx_builder::{FeeCompletion, FeeSettings, PrepareTransaction, TransactionCompleter};
pub use ckb_types::{
    address::{Address, NetworkType},
    core::{FeeRate, KnownScript, KnownScripts},
    packed::{Script, Transaction},
    prelude::Entity,
};
