//! Human readable addresses.
//!
//! An address is the bech32m encoding of a one byte format tag followed by the script. The full
//! format is the only one produced; the deprecated formats are still accepted when decoding.
//!
//! | tag    | checksum | payload                              |
//! |--------|----------|--------------------------------------|
//! | `0x00` | bech32m  | code_hash, hash_type, args            |
//! | `0x01` | bech32   | code hash index, args (short format)  |
//! | `0x02` | bech32   | code_hash, args, hash type `data`     |
//! | `0x04` | bech32   | code_hash, args, hash type `type`     |

use bech32::{Bech32, Bech32m, Hrp, primitives::decode::CheckedHrpstring};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    bytes::Bytes,
    core::{KnownScript, KnownScripts, ScriptHashType, error::AddressError},
    packed::{Byte32, Script},
};

const PREFIX_MAINNET: &str = "ckb";
const PREFIX_TESTNET: &str = "ckt";

const FORMAT_FULL: u8 = 0x00;
const FORMAT_SHORT: u8 = 0x01;
const FORMAT_FULL_DATA: u8 = 0x02;
const FORMAT_FULL_TYPE: u8 = 0x04;

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    #[default]
    Testnet,
}

impl NetworkType {
    pub fn from_prefix(value: &str) -> Option<NetworkType> {
        match value {
            PREFIX_MAINNET => Some(NetworkType::Mainnet),
            PREFIX_TESTNET => Some(NetworkType::Testnet),
            _ => None,
        }
    }

    pub fn to_prefix(self) -> &'static str {
        match self {
            NetworkType::Mainnet => PREFIX_MAINNET,
            NetworkType::Testnet => PREFIX_TESTNET,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NetworkType::Mainnet => f.write_str("mainnet"),
            NetworkType::Testnet => f.write_str("testnet"),
        }
    }
}

/// A script bound to a human readable prefix.
#[derive(Hash, Eq, PartialEq, Debug, Clone)]
pub struct Address {
    /// The human readable part, `ckb` or `ckt` on the public networks.
    pub prefix: String,
    /// The script the address stands for.
    pub script: Script,
}

/// Code hash indices of the short format.
fn short_format_script(index: u8) -> Option<KnownScript> {
    match index {
        0x00 => Some(KnownScript::Secp256k1Blake160),
        0x01 => Some(KnownScript::Secp256k1Multisig),
        0x02 => Some(KnownScript::AnyoneCanPay),
        _ => None,
    }
}

impl Address {
    pub fn new(prefix: impl Into<String>, script: Script) -> Self {
        Address {
            prefix: prefix.into(),
            script,
        }
    }

    pub fn from_script(network: NetworkType, script: Script) -> Self {
        Address::new(network.to_prefix(), script)
    }

    /// Encodes in the full format.
    pub fn encode(&self) -> Result<String, AddressError> {
        let hrp = Hrp::parse(&self.prefix)
            .map_err(|err| AddressError::InvalidEncoding(err.to_string()))?;
        let mut payload = Vec::with_capacity(34 + self.script.args.len());
        payload.push(FORMAT_FULL);
        payload.extend_from_slice(self.script.code_hash.as_slice());
        payload.push(self.script.hash_type.into());
        payload.extend_from_slice(&self.script.args);
        bech32::encode::<Bech32m>(hrp, &payload)
            .map_err(|err| AddressError::InvalidEncoding(err.to_string()))
    }

    /// Decodes an address of any supported format.
    ///
    /// `known_scripts` resolves the code hash index of the short format.
    pub fn decode(input: &str, known_scripts: &KnownScripts) -> Result<Address, AddressError> {
        let (checked, is_bech32m) = match CheckedHrpstring::new::<Bech32m>(input) {
            Ok(checked) => (checked, true),
            Err(bech32m_err) => match CheckedHrpstring::new::<Bech32>(input) {
                Ok(checked) => (checked, false),
                Err(_) => return Err(AddressError::InvalidEncoding(bech32m_err.to_string())),
            },
        };
        let prefix = checked.hrp().to_lowercase();
        let payload: Vec<u8> = checked.byte_iter().collect();
        let (&format, body) = payload
            .split_first()
            .ok_or_else(|| AddressError::InvalidPayload("empty payload".to_owned()))?;

        let expect_bech32m = format == FORMAT_FULL;
        if !matches!(
            format,
            FORMAT_FULL | FORMAT_SHORT | FORMAT_FULL_DATA | FORMAT_FULL_TYPE
        ) {
            return Err(AddressError::UnknownFormat(format));
        }
        if expect_bech32m != is_bech32m {
            return Err(AddressError::InvalidEncoding(format!(
                "format {format:#04x} with the wrong checksum variant"
            )));
        }

        let script = match format {
            FORMAT_FULL => {
                if body.len() < 33 {
                    return Err(AddressError::InvalidPayload(format!(
                        "full format payload has {} bytes",
                        body.len()
                    )));
                }
                let hash_type = ScriptHashType::try_from(body[32])
                    .map_err(|err| AddressError::InvalidPayload(err.to_string()))?;
                Script::new(
                    code_hash_from(&body[..32])?,
                    hash_type,
                    Bytes::copy_from_slice(&body[33..]),
                )
            }
            FORMAT_SHORT => {
                let (&index, args) = body.split_first().ok_or_else(|| {
                    AddressError::InvalidPayload("short format without code hash index".to_owned())
                })?;
                let info = short_format_script(index)
                    .and_then(|known| known_scripts.get(known))
                    .ok_or(AddressError::UnknownCodeHashIndex(index))?;
                info.script(Bytes::copy_from_slice(args))
            }
            _ => {
                if body.len() < 32 {
                    return Err(AddressError::InvalidPayload(format!(
                        "deprecated full format payload has {} bytes",
                        body.len()
                    )));
                }
                let hash_type = if format == FORMAT_FULL_DATA {
                    ScriptHashType::Data
                } else {
                    ScriptHashType::Type
                };
                Script::new(
                    code_hash_from(&body[..32])?,
                    hash_type,
                    Bytes::copy_from_slice(&body[32..]),
                )
            }
        };
        Ok(Address { prefix, script })
    }

    /// Decodes and requires the prefix to be `prefix`.
    pub fn decode_with_prefix(
        input: &str,
        prefix: &str,
        known_scripts: &KnownScripts,
    ) -> Result<Script, AddressError> {
        let address = Address::decode(input, known_scripts)?;
        if address.prefix != prefix {
            return Err(AddressError::PrefixMismatch {
                expected: prefix.to_owned(),
                actual: address.prefix,
            });
        }
        Ok(address.script)
    }

    /// The network of the prefix, if it is a public one.
    pub fn network(&self) -> Option<NetworkType> {
        NetworkType::from_prefix(&self.prefix)
    }
}

fn code_hash_from(slice: &[u8]) -> Result<Byte32, AddressError> {
    Byte32::from_raw_slice(slice).map_err(|err| AddressError::InvalidPayload(err.to_string()))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let encoded = self.encode().map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}
