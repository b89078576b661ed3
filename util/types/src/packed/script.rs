use crate::{
    bytes::Bytes,
    codec,
    core::{ScriptHashType, error::EncodingError},
    packed::Byte32,
    prelude::Entity,
};

/// A predicate attached to a cell, identified by its code and fed with `args`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Script {
    /// Hash which locates the script code, interpreted per `hash_type`.
    pub code_hash: Byte32,
    /// How `code_hash` matches the code.
    pub hash_type: ScriptHashType,
    /// Arguments passed to the script.
    pub args: Bytes,
}

impl Script {
    /// Creates a script.
    pub fn new(code_hash: Byte32, hash_type: ScriptHashType, args: impl Into<Bytes>) -> Self {
        Script {
            code_hash,
            hash_type,
            args: args.into(),
        }
    }

    /// The script hash, which is the CKB hash of its encoding.
    pub fn hash(&self) -> Byte32 {
        self.calc_hash()
    }

    /// Bytes the script occupies in a cell: code hash, hash type and args.
    pub fn occupied_size(&self) -> usize {
        32 + 1 + self.args.len()
    }

    pub(crate) fn write_option(script: Option<&Script>, out: &mut Vec<u8>) {
        codec::write_option(out, script.is_some(), |out| {
            if let Some(script) = script {
                script.write_to(out);
            }
        });
    }
}

impl Entity for Script {
    const NAME: &'static str = "Script";

    fn write_to(&self, out: &mut Vec<u8>) {
        let mut args = Vec::with_capacity(self.args.len() + 4);
        codec::write_bytes(&mut args, &self.args);
        let hash_type = [u8::from(self.hash_type)];
        let parts: [&[u8]; 3] = [self.code_hash.as_slice(), &hash_type, &args];
        codec::write_dynamic(out, &parts);
    }

    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        let fields = codec::read_table(Self::NAME, slice, 3)?;
        let code_hash = Byte32::from_slice(fields[0])?;
        codec::check_struct("Byte", fields[1], 1)?;
        let hash_type = ScriptHashType::try_from(fields[1][0])?;
        let args = codec::read_bytes("Bytes", fields[2])?;
        Ok(Script {
            code_hash,
            hash_type,
            args: Bytes::copy_from_slice(args),
        })
    }
}
