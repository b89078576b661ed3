use ckb_error::Error;
use ckb_tx_builder::{DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_FEE_RATE, FeeSettings};
use ckb_types::{
    address::NetworkType,
    core::{FeeRate, KnownScript, KnownScripts, ScriptHashType, ScriptInfo},
    packed::{Byte32, CellDep},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

use crate::ConfigError;

/// The whole configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdkConfig {
    /// The chain to build transactions for.
    #[serde(default)]
    pub network: NetworkType,
    /// Fee policy.
    #[serde(default)]
    pub fee: FeeConfig,
    /// Deployed scripts, overriding or extending the genesis ones.
    #[serde(default)]
    pub scripts: Vec<ScriptConfig>,
}

/// Fee config options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeeConfig {
    /// Rates reported by the node are raised to this floor, in shannons per 1000 bytes.
    #[serde(default = "default_min_fee_rate")]
    pub min_fee_rate: FeeRate,
    /// Rounds the fee loop may run before giving up.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_min_fee_rate() -> FeeRate {
    DEFAULT_MIN_FEE_RATE
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Default for FeeConfig {
    fn default() -> Self {
        FeeConfig {
            min_fee_rate: DEFAULT_MIN_FEE_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Where a known script is deployed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    pub name: KnownScript,
    pub code_hash: Byte32,
    pub hash_type: ScriptHashType,
    #[serde(default)]
    pub cell_deps: Vec<CellDep>,
}

impl From<&ScriptConfig> for ScriptInfo {
    fn from(config: &ScriptConfig) -> Self {
        ScriptInfo {
            code_hash: config.code_hash,
            hash_type: config.hash_type,
            cell_deps: config.cell_deps.clone(),
        }
    }
}

impl SdkConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        let config: SdkConfig = toml::from_str(content).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_owned(),
            reason: err.to_string(),
        })?;
        debug!("load config from {}", path.display());
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fee.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        let mut seen = HashSet::new();
        for script in &self.scripts {
            if !seen.insert(script.name) {
                return Err(ConfigError::DuplicateScript(script.name));
            }
        }
        Ok(())
    }

    /// The genesis scripts of the network with the configured scripts laid over.
    pub fn known_scripts(&self) -> KnownScripts {
        let mut known = KnownScripts::builtin(self.network);
        for script in &self.scripts {
            known.insert(script.name, script.into());
        }
        known
    }

    pub fn fee_settings(&self) -> FeeSettings {
        FeeSettings {
            min_fee_rate: self.fee.min_fee_rate,
            max_iterations: self.fee.max_iterations,
        }
    }

    /// The configured script named `name`, if any.
    pub fn script(&self, name: KnownScript) -> Option<&ScriptConfig> {
        self.scripts.iter().find(|script| script.name == name)
    }
}
