use secp256k1::Error as SecpError;
use thiserror::Error;

/// Key or signature material rejected by secp256k1.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("the private key is not a valid scalar")]
    InvalidPrivKey,
    #[error("the public key is not a point on the curve")]
    InvalidPubKey,
    #[error("the signature is malformed")]
    InvalidSignature,
    /// Verification failed against the given key and digest.
    #[error("the signature does not match")]
    IncorrectSignature,
    #[error("the recovery id is not in 0..=3")]
    InvalidRecoveryId,
    #[error("invalid hex key: {0}")]
    InvalidHex(String),
}

impl From<SecpError> for Error {
    fn from(e: SecpError) -> Self {
        match e {
            SecpError::InvalidPublicKey => Error::InvalidPubKey,
            SecpError::InvalidSecretKey => Error::InvalidPrivKey,
            SecpError::InvalidRecoveryId => Error::InvalidRecoveryId,
            SecpError::IncorrectSignature => Error::IncorrectSignature,
            _ => Error::InvalidSignature,
        }
    }
}
