use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::core::error::EncodingError;

/// Specifies how the script `code_hash` is used to match the script code and how to run the code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptHashType {
    /// Type "data" matches script code via cell data hash, and run the script code in v0 CKB VM.
    #[default]
    Data = 0,
    /// Type "type" matches script code via cell type script hash.
    Type = 1,
    /// Type "data1" matches script code via cell data hash, and run the script code in v1 CKB VM.
    Data1 = 2,
    /// Type "data2" matches script code via cell data hash, and run the script code in v2 CKB VM.
    Data2 = 4,
}

impl TryFrom<u8> for ScriptHashType {
    type Error = EncodingError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ScriptHashType::Data),
            1 => Ok(ScriptHashType::Type),
            2 => Ok(ScriptHashType::Data1),
            4 => Ok(ScriptHashType::Data2),
            _ => Err(EncodingError::InvalidHashType(v)),
        }
    }
}

impl From<ScriptHashType> for u8 {
    #[inline]
    fn from(hash_type: ScriptHashType) -> u8 {
        hash_type as u8
    }
}

impl FromStr for ScriptHashType {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(ScriptHashType::Data),
            "type" => Ok(ScriptHashType::Type),
            "data1" => Ok(ScriptHashType::Data1),
            "data2" => Ok(ScriptHashType::Data2),
            _ => Err(EncodingError::UnknownName {
                kind: "ScriptHashType",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ScriptHashType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ScriptHashType::Data => "data",
            ScriptHashType::Type => "type",
            ScriptHashType::Data1 => "data1",
            ScriptHashType::Data2 => "data2",
        };
        f.write_str(name)
    }
}

/// How a cell dep is loaded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepType {
    /// The referenced cell itself holds the code.
    #[default]
    Code = 0,
    /// The referenced cell holds a vector of out-points, each of them is loaded as a code dep.
    #[serde(alias = "depGroup")]
    DepGroup = 1,
}

impl TryFrom<u8> for DepType {
    type Error = EncodingError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(DepType::Code),
            1 => Ok(DepType::DepGroup),
            _ => Err(EncodingError::InvalidDepType(v)),
        }
    }
}

impl From<DepType> for u8 {
    #[inline]
    fn from(dep_type: DepType) -> u8 {
        dep_type as u8
    }
}

impl FromStr for DepType {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(DepType::Code),
            "dep_group" | "depGroup" => Ok(DepType::DepGroup),
            _ => Err(EncodingError::UnknownName {
                kind: "DepType",
                value: s.to_owned(),
            }),
        }
    }
}
