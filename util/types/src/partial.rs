//! Loosely typed inputs for the entities.
//!
//! Every `*Like` type deserializes from JSON style data where hashes and bytes are hex strings,
//! numbers are hex strings, decimal strings or plain numbers, and enums are named. Each one turns
//! into its entity through `TryFrom`, failing with [`ErrorKind::Malformed`](ckb_error::ErrorKind).

use ckb_error::Error;
use serde::{Deserialize, Serialize};

use crate::{
    bytes::Bytes,
    conversion::bytes_from_hex,
    core::{Capacity, error::EncodingError},
    packed::{Byte32, CellDep, CellInput, CellOutput, OutPoint, Script, Transaction, WitnessArgs},
};

/// A number given as a JSON number, a `0x` hex string or a decimal string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumLike {
    Num(u64),
    Str(String),
}

impl NumLike {
    pub fn to_u128(&self) -> Result<u128, EncodingError> {
        match self {
            NumLike::Num(num) => Ok(u128::from(*num)),
            NumLike::Str(s) => {
                let parsed = match s.strip_prefix("0x") {
                    Some(hex) if !hex.is_empty() => u128::from_str_radix(hex, 16),
                    Some(_) => return Err(EncodingError::InvalidNumber(s.clone())),
                    None => s.parse::<u128>(),
                };
                parsed.map_err(|_| EncodingError::InvalidNumber(s.clone()))
            }
        }
    }

    pub fn to_u64(&self) -> Result<u64, EncodingError> {
        let num = self.to_u128()?;
        u64::try_from(num).map_err(|_| EncodingError::InvalidNumber(format!("{num} exceeds u64")))
    }

    pub fn to_u32(&self) -> Result<u32, EncodingError> {
        let num = self.to_u128()?;
        u32::try_from(num).map_err(|_| EncodingError::InvalidNumber(format!("{num} exceeds u32")))
    }
}

impl From<u64> for NumLike {
    fn from(num: u64) -> Self {
        NumLike::Num(num)
    }
}

fn bytes_from(hex: &str) -> Result<Bytes, EncodingError> {
    bytes_from_hex(hex).map(Bytes::from)
}

fn opt_bytes_from(hex: Option<&String>) -> Result<Option<Bytes>, EncodingError> {
    hex.map(|hex| bytes_from(hex)).transpose()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLike {
    pub code_hash: String,
    pub hash_type: String,
    #[serde(default)]
    pub args: String,
}

impl TryFrom<ScriptLike> for Script {
    type Error = Error;

    fn try_from(like: ScriptLike) -> Result<Self, Self::Error> {
        Ok(Script::new(
            like.code_hash.parse()?,
            like.hash_type.parse()?,
            bytes_from(&like.args)?,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutPointLike {
    pub tx_hash: String,
    pub index: NumLike,
}

impl TryFrom<OutPointLike> for OutPoint {
    type Error = Error;

    fn try_from(like: OutPointLike) -> Result<Self, Self::Error> {
        Ok(OutPoint::new(like.tx_hash.parse()?, like.index.to_u32()?))
    }
}

/// An output whose capacity, in shannons, may be omitted to have it computed from the occupied
/// size when added to a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOutputLike {
    #[serde(default)]
    pub capacity: Option<NumLike>,
    pub lock: ScriptLike,
    #[serde(default, rename = "type")]
    pub type_: Option<ScriptLike>,
}

impl TryFrom<CellOutputLike> for CellOutput {
    type Error = Error;

    fn try_from(like: CellOutputLike) -> Result<Self, Self::Error> {
        let capacity = match like.capacity {
            Some(capacity) => Capacity::shannons(capacity.to_u64()?),
            None => Capacity::zero(),
        };
        Ok(CellOutput::new(
            capacity,
            like.lock.try_into()?,
            like.type_.map(Script::try_from).transpose()?,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellInputLike {
    pub previous_output: OutPointLike,
    #[serde(default)]
    pub since: Option<NumLike>,
}

impl TryFrom<CellInputLike> for CellInput {
    type Error = Error;

    fn try_from(like: CellInputLike) -> Result<Self, Self::Error> {
        let since = like.since.map(|since| since.to_u64()).transpose()?;
        Ok(CellInput::new(
            like.previous_output.try_into()?,
            since.unwrap_or_default(),
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDepLike {
    pub out_point: OutPointLike,
    pub dep_type: String,
}

impl TryFrom<CellDepLike> for CellDep {
    type Error = Error;

    fn try_from(like: CellDepLike) -> Result<Self, Self::Error> {
        Ok(CellDep::new(like.out_point.try_into()?, like.dep_type.parse()?))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WitnessArgsLike {
    pub lock: Option<String>,
    pub input_type: Option<String>,
    pub output_type: Option<String>,
}

impl TryFrom<WitnessArgsLike> for WitnessArgs {
    type Error = Error;

    fn try_from(like: WitnessArgsLike) -> Result<Self, Self::Error> {
        Ok(WitnessArgs {
            lock: opt_bytes_from(like.lock.as_ref())?,
            input_type: opt_bytes_from(like.input_type.as_ref())?,
            output_type: opt_bytes_from(like.output_type.as_ref())?,
        })
    }
}

/// A transaction in loose form.
///
/// Outputs without capacity get their occupied capacity; missing output data is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionLike {
    pub version: Option<NumLike>,
    pub cell_deps: Vec<CellDepLike>,
    pub header_deps: Vec<String>,
    pub inputs: Vec<CellInputLike>,
    pub outputs: Vec<CellOutputLike>,
    pub outputs_data: Vec<String>,
    pub witnesses: Vec<String>,
}

impl TryFrom<TransactionLike> for Transaction {
    type Error = Error;

    fn try_from(like: TransactionLike) -> Result<Self, Self::Error> {
        if like.outputs_data.len() > like.outputs.len() {
            return Err(EncodingError::InvalidLength {
                name: "outputs_data",
                expected: like.outputs.len(),
                actual: like.outputs_data.len(),
            }
            .into());
        }
        let mut tx = Transaction {
            version: like
                .version
                .map(|version| version.to_u32())
                .transpose()?
                .unwrap_or_default(),
            ..Default::default()
        };
        // kept as given, duplicates included
        for cell_dep in like.cell_deps {
            tx.cell_deps.push(CellDep::try_from(cell_dep)?);
        }
        for header_dep in like.header_deps {
            tx.header_deps.push(header_dep.parse::<Byte32>()?);
        }
        for input in like.inputs {
            tx.add_input(CellInput::try_from(input)?);
        }
        let mut outputs_data = like.outputs_data.into_iter();
        for output in like.outputs {
            let data = match outputs_data.next() {
                Some(data) => bytes_from(&data)?,
                None => Bytes::new(),
            };
            tx.add_output(CellOutput::try_from(output)?, data)?;
        }
        tx.witnesses = like
            .witnesses
            .iter()
            .map(|witness| bytes_from(witness))
            .collect::<Result<_, _>>()?;
        Ok(tx)
    }
}
