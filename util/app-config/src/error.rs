use ckb_error::{Error, ErrorKind, impl_error_conversion_with_kind, prelude::*};
use ckb_types::core::KnownScript;
use std::path::PathBuf;

/// The configuration cannot be loaded.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("{0:?} is configured more than once")]
    DuplicateScript(KnownScript),

    #[error("fee.max_iterations must be positive")]
    ZeroIterations,
}

impl_error_conversion_with_kind!(ConfigError, ErrorKind::Config, Error);

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
