use ckb_error::{Error, ErrorKind, impl_error_conversion_with_kind, prelude::*};

/// A signing primitive misbehaved.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SignerError {
    #[error("the signature has {actual} bytes, {expected} expected")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("the signature header {0} is out of range")]
    InvalidSignatureHeader(u8),

    #[error("the key is invalid: {0}")]
    InvalidKey(String),

    #[error("{0}")]
    Primitive(String),
}

impl_error_conversion_with_kind!(SignerError, ErrorKind::Signer, Error);

impl From<ckb_crypto::secp::Error> for SignerError {
    fn from(err: ckb_crypto::secp::Error) -> Self {
        SignerError::Primitive(err.to_string())
    }
}

pub(crate) fn check_length(signature: &[u8], expected: usize) -> Result<(), SignerError> {
    if signature.len() != expected {
        return Err(SignerError::InvalidSignatureLength {
            expected,
            actual: signature.len(),
        });
    }
    Ok(())
}
