use crate::{bytes::Bytes, codec, core::error::EncodingError, prelude::Entity};

fn write_bytes_opt(bytes: Option<&Bytes>) -> Vec<u8> {
    let mut out = Vec::new();
    codec::write_option(&mut out, bytes.is_some(), |out| {
        if let Some(bytes) = bytes {
            codec::write_bytes(out, bytes);
        }
    });
    out
}

fn read_bytes_opt(slice: &[u8]) -> Result<Option<Bytes>, EncodingError> {
    codec::read_option(slice, |slice| {
        codec::read_bytes("Bytes", slice).map(Bytes::copy_from_slice)
    })
}

/// The conventional layout of a witness: the unlock proof of the input's lock group, followed by
/// data for the input and output type scripts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WitnessArgs {
    /// Proof for the lock script, usually a signature.
    pub lock: Option<Bytes>,
    /// Data for the type script of the input at the same index.
    pub input_type: Option<Bytes>,
    /// Data for the type script of the output at the same index.
    pub output_type: Option<Bytes>,
}

impl WitnessArgs {
    /// A witness whose lock is `len` zero bytes, used to reserve room before signing.
    pub fn placeholder(len: usize) -> Self {
        WitnessArgs {
            lock: Some(Bytes::from(vec![0u8; len])),
            ..Default::default()
        }
    }
}

impl Entity for WitnessArgs {
    const NAME: &'static str = "WitnessArgs";

    fn write_to(&self, out: &mut Vec<u8>) {
        let parts = [
            write_bytes_opt(self.lock.as_ref()),
            write_bytes_opt(self.input_type.as_ref()),
            write_bytes_opt(self.output_type.as_ref()),
        ];
        codec::write_dynamic(out, &parts);
    }

    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        let fields = codec::read_table(Self::NAME, slice, 3)?;
        Ok(WitnessArgs {
            lock: read_bytes_opt(fields[0])?,
            input_type: read_bytes_opt(fields[1])?,
            output_type: read_bytes_opt(fields[2])?,
        })
    }
}

/// The witness lock layout of the OmniLock script.
///
/// The Bitcoin and EVM signers put their signature here instead of writing it directly to the
/// witness lock.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OmniLockWitnessLock {
    /// The signature.
    pub signature: Option<Bytes>,
    /// The encoded identity table used by administrator mode, kept opaque.
    pub omni_identity: Option<Bytes>,
    /// Preimage for exec and dynamic linking modes.
    pub preimage: Option<Bytes>,
}

impl OmniLockWitnessLock {
    /// Wraps a signature.
    pub fn with_signature(signature: impl Into<Bytes>) -> Self {
        OmniLockWitnessLock {
            signature: Some(signature.into()),
            ..Default::default()
        }
    }

    /// Encoded length of a witness lock holding only a signature of `signature_len` bytes.
    pub fn signature_only_size(signature_len: usize) -> usize {
        16 + 4 + signature_len
    }
}

impl Entity for OmniLockWitnessLock {
    const NAME: &'static str = "OmniLockWitnessLock";

    fn write_to(&self, out: &mut Vec<u8>) {
        let identity = self.omni_identity.clone().unwrap_or_default();
        let parts = [
            write_bytes_opt(self.signature.as_ref()),
            identity.to_vec(),
            write_bytes_opt(self.preimage.as_ref()),
        ];
        codec::write_dynamic(out, &parts);
    }

    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        let fields = codec::read_table(Self::NAME, slice, 3)?;
        Ok(OmniLockWitnessLock {
            signature: read_bytes_opt(fields[0])?,
            omni_identity: codec::read_option(fields[1], |slice| {
                Ok(Bytes::copy_from_slice(slice))
            })?,
            preimage: read_bytes_opt(fields[2])?,
        })
    }
}
