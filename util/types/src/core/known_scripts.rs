//! Scripts deployed at well-known locations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    address::NetworkType,
    core::{DepType, ScriptHashType},
    packed::{Byte32, CellDep, OutPoint, Script},
};

/// Scripts the kit knows how to locate and unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KnownScript {
    /// The default lock: secp256k1 signature over blake160 of the public key.
    Secp256k1Blake160,
    /// M of N secp256k1 multisig.
    Secp256k1Multisig,
    /// Anyone-can-pay lock.
    AnyoneCanPay,
    /// OmniLock, unlocked by Bitcoin and EVM signers.
    OmniLock,
    /// Lock unlocked by a Nostr signed event.
    NostrLock,
}

/// Where a script lives and how to reference it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInfo {
    /// Code hash for scripts of this kind.
    pub code_hash: Byte32,
    /// Hash type for scripts of this kind.
    pub hash_type: ScriptHashType,
    /// Cell deps a transaction unlocking this script needs.
    pub cell_deps: Vec<CellDep>,
}

impl ScriptInfo {
    /// A script of this kind with `args`.
    pub fn script(&self, args: impl Into<crate::bytes::Bytes>) -> Script {
        Script::new(self.code_hash, self.hash_type, args)
    }

    /// Whether `script` is of this kind, regardless of args.
    pub fn matches(&self, script: &Script) -> bool {
        script.code_hash == self.code_hash && script.hash_type == self.hash_type
    }
}

const SECP256K1_BLAKE160_CODE_HASH: [u8; 32] = [
    0x9b, 0xd7, 0xe0, 0x6f, 0x3e, 0xcf, 0x4b, 0xe0, 0xf2, 0xfc, 0xd2, 0x18, 0x8b, 0x23, 0xf1, 0xb9,
    0xfc, 0xc8, 0x8e, 0x5d, 0x4b, 0x65, 0xa8, 0x63, 0x7b, 0x17, 0x72, 0x3b, 0xbd, 0xa3, 0xcc, 0xe8,
];
const SECP256K1_MULTISIG_CODE_HASH: [u8; 32] = [
    0x5c, 0x50, 0x69, 0xeb, 0x08, 0x57, 0xef, 0xc6, 0x5e, 0x1b, 0xca, 0x0c, 0x07, 0xdf, 0x34, 0xc3,
    0x16, 0x63, 0xb3, 0x62, 0x2f, 0xd3, 0x87, 0x6c, 0x87, 0x63, 0x20, 0xfc, 0x96, 0x34, 0xe2, 0xa8,
];
const MAINNET_SECP256K1_DEP_GROUP: [u8; 32] = [
    0x71, 0xa7, 0xba, 0x8f, 0xc9, 0x63, 0x49, 0xfe, 0xa0, 0xed, 0x3a, 0x5c, 0x47, 0x99, 0x2e, 0x3b,
    0x40, 0x84, 0xb0, 0x31, 0xa4, 0x22, 0x64, 0xa0, 0x18, 0xe0, 0x07, 0x2e, 0x81, 0x72, 0xe4, 0x6c,
];
const TESTNET_SECP256K1_DEP_GROUP: [u8; 32] = [
    0xf8, 0xde, 0x3b, 0xb4, 0x7d, 0x05, 0x5c, 0xdf, 0x46, 0x0d, 0x93, 0xa2, 0xa6, 0xe1, 0xb0, 0x5f,
    0x74, 0x32, 0xf9, 0x77, 0x7c, 0x8c, 0x47, 0x4a, 0xbf, 0x4e, 0xec, 0x1d, 0x4a, 0xee, 0x5d, 0x37,
];
const MAINNET_ACP_CODE_HASH: [u8; 32] = [
    0xd3, 0x69, 0x59, 0x7f, 0xf4, 0x7f, 0x29, 0xfb, 0xc0, 0xd4, 0x7d, 0x2e, 0x37, 0x75, 0x37, 0x0d,
    0x12, 0x50, 0xb8, 0x51, 0x40, 0xc6, 0x70, 0xe4, 0x71, 0x8a, 0xf7, 0x12, 0x98, 0x3a, 0x23, 0x54,
];
const MAINNET_ACP_DEP_GROUP: [u8; 32] = [
    0x41, 0x53, 0xa2, 0x01, 0x49, 0x52, 0xd7, 0xca, 0xc4, 0x5f, 0x28, 0x5c, 0xe9, 0xa7, 0xc5, 0xc0,
    0xc0, 0xe1, 0xb2, 0x1f, 0x2d, 0x37, 0x8b, 0x82, 0xac, 0x14, 0x33, 0xcb, 0x11, 0xc2, 0x5c, 0x4d,
];
const TESTNET_ACP_CODE_HASH: [u8; 32] = [
    0x34, 0x19, 0xa1, 0xc0, 0x9e, 0xb2, 0x56, 0x7f, 0x65, 0x52, 0xee, 0x7a, 0x8e, 0xcf, 0xfd, 0x64,
    0x15, 0x5c, 0xff, 0xe0, 0xf1, 0x79, 0x6e, 0x6e, 0x61, 0xec, 0x08, 0x8d, 0x74, 0x0c, 0x13, 0x56,
];
const TESTNET_ACP_DEP_GROUP: [u8; 32] = [
    0xec, 0x26, 0xb0, 0xf8, 0x5e, 0xd8, 0x39, 0xec, 0xe5, 0xf1, 0x1c, 0x4c, 0x4e, 0x83, 0x7e, 0xc3,
    0x59, 0xf5, 0xad, 0xc4, 0x42, 0x04, 0x10, 0xf6, 0x45, 0x3b, 0x1f, 0x6b, 0x60, 0xfb, 0x96, 0xa6,
];

fn dep_group(tx_hash: [u8; 32], index: u32) -> CellDep {
    CellDep::new(OutPoint::new(Byte32::new(tx_hash), index), DepType::DepGroup)
}

/// A registry of known scripts for one network.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnownScripts {
    scripts: HashMap<KnownScript, ScriptInfo>,
}

impl KnownScripts {
    /// The genesis scripts of `network`. OmniLock and NostrLock are not included.
    pub fn builtin(network: NetworkType) -> Self {
        let (secp_dep_group, acp_code_hash, acp_dep_group) = match network {
            NetworkType::Mainnet => (
                MAINNET_SECP256K1_DEP_GROUP,
                MAINNET_ACP_CODE_HASH,
                MAINNET_ACP_DEP_GROUP,
            ),
            NetworkType::Testnet => (
                TESTNET_SECP256K1_DEP_GROUP,
                TESTNET_ACP_CODE_HASH,
                TESTNET_ACP_DEP_GROUP,
            ),
        };
        let mut scripts = HashMap::new();
        scripts.insert(
            KnownScript::Secp256k1Blake160,
            ScriptInfo {
                code_hash: Byte32::new(SECP256K1_BLAKE160_CODE_HASH),
                hash_type: ScriptHashType::Type,
                cell_deps: vec![dep_group(secp_dep_group, 0)],
            },
        );
        scripts.insert(
            KnownScript::Secp256k1Multisig,
            ScriptInfo {
                code_hash: Byte32::new(SECP256K1_MULTISIG_CODE_HASH),
                hash_type: ScriptHashType::Type,
                cell_deps: vec![dep_group(secp_dep_group, 1)],
            },
        );
        scripts.insert(
            KnownScript::AnyoneCanPay,
            ScriptInfo {
                code_hash: Byte32::new(acp_code_hash),
                hash_type: ScriptHashType::Type,
                cell_deps: vec![dep_group(acp_dep_group, 0)],
            },
        );
        KnownScripts { scripts }
    }

    /// Looks up a script.
    pub fn get(&self, script: KnownScript) -> Option<&ScriptInfo> {
        self.scripts.get(&script)
    }

    /// Adds or replaces a script.
    pub fn insert(&mut self, script: KnownScript, info: ScriptInfo) {
        self.scripts.insert(script, info);
    }

    /// Finds which known script `script` is an instance of.
    pub fn identify(&self, script: &Script) -> Option<KnownScript> {
        let mut matched: Vec<_> = self
            .scripts
            .iter()
            .filter(|(_, info)| info.matches(script))
            .map(|(known, _)| *known)
            .collect();
        matched.sort();
        matched.into_iter().next()
    }
}
