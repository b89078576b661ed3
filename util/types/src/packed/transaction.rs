use crate::{
    bytes::Bytes,
    codec,
    core::error::EncodingError,
    packed::{Byte32, CellDep, CellInput, CellOutput},
    prelude::Entity,
};

/// A transaction.
///
/// `outputs_data` is aligned with `outputs`. `witnesses` is aligned with `inputs` by convention
/// and may carry trailing extra items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Always 0 for now.
    pub version: u32,
    /// Code and data the scripts depend on.
    pub cell_deps: Vec<CellDep>,
    /// Headers the scripts may read.
    pub header_deps: Vec<Byte32>,
    /// Cells being consumed.
    pub inputs: Vec<CellInput>,
    /// Cells being created.
    pub outputs: Vec<CellOutput>,
    /// Data of the created cells.
    pub outputs_data: Vec<Bytes>,
    /// Unlock proofs and other auxiliary data.
    pub witnesses: Vec<Bytes>,
}

fn write_bytes_vec(out: &mut Vec<u8>, items: &[Bytes]) {
    let parts: Vec<Vec<u8>> = items
        .iter()
        .map(|item| {
            let mut part = Vec::with_capacity(item.len() + 4);
            codec::write_bytes(&mut part, item);
            part
        })
        .collect();
    codec::write_dynamic(out, &parts);
}

fn read_bytes_vec(slice: &[u8]) -> Result<Vec<Bytes>, EncodingError> {
    codec::read_dynvec("BytesVec", slice)?
        .into_iter()
        .map(|item| codec::read_bytes("Bytes", item).map(Bytes::copy_from_slice))
        .collect()
}

impl Transaction {
    /// Appends the encoding of the raw transaction, which excludes witnesses.
    pub fn write_raw_to(&self, out: &mut Vec<u8>) {
        let version = self.version.to_le_bytes();
        let mut cell_deps = Vec::with_capacity(4 + self.cell_deps.len() * CellDep::SIZE);
        codec::write_fixvec(&mut cell_deps, &self.cell_deps, Entity::write_to);
        let mut header_deps = Vec::with_capacity(4 + self.header_deps.len() * 32);
        codec::write_fixvec(&mut header_deps, &self.header_deps, Entity::write_to);
        let mut inputs = Vec::with_capacity(4 + self.inputs.len() * CellInput::SIZE);
        codec::write_fixvec(&mut inputs, &self.inputs, Entity::write_to);
        let outputs_parts: Vec<Vec<u8>> = self.outputs.iter().map(Entity::to_vec).collect();
        let mut outputs = Vec::new();
        codec::write_dynamic(&mut outputs, &outputs_parts);
        let mut outputs_data = Vec::new();
        write_bytes_vec(&mut outputs_data, &self.outputs_data);
        codec::write_dynamic(
            out,
            &[
                &version[..],
                &cell_deps[..],
                &header_deps[..],
                &inputs[..],
                &outputs[..],
                &outputs_data[..],
            ],
        );
    }

    /// The encoding of the raw transaction.
    pub fn raw_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_raw_to(&mut out);
        out
    }

    /// The transaction hash, which is the CKB hash of the raw transaction.
    pub fn hash(&self) -> Byte32 {
        ckb_hash::blake2b_256(self.raw_bytes()).into()
    }

    /// The CKB hash of the full encoding including witnesses.
    pub fn witness_hash(&self) -> Byte32 {
        self.calc_hash()
    }

    fn read_raw(slice: &[u8]) -> Result<Self, EncodingError> {
        let fields = codec::read_table("RawTransaction", slice, 6)?;
        let cell_deps = codec::read_fixvec("CellDepVec", fields[1], CellDep::SIZE)?
            .into_iter()
            .map(CellDep::from_slice)
            .collect::<Result<_, _>>()?;
        let header_deps = codec::read_fixvec("Byte32Vec", fields[2], 32)?
            .into_iter()
            .map(Byte32::from_slice)
            .collect::<Result<_, _>>()?;
        let inputs = codec::read_fixvec("CellInputVec", fields[3], CellInput::SIZE)?
            .into_iter()
            .map(CellInput::from_slice)
            .collect::<Result<_, _>>()?;
        let outputs = codec::read_dynvec("CellOutputVec", fields[4])?
            .into_iter()
            .map(CellOutput::from_slice)
            .collect::<Result<_, _>>()?;
        Ok(Transaction {
            version: codec::read_u32("Uint32", fields[0])?,
            cell_deps,
            header_deps,
            inputs,
            outputs,
            outputs_data: read_bytes_vec(fields[5])?,
            witnesses: Vec::new(),
        })
    }
}

impl Entity for Transaction {
    const NAME: &'static str = "Transaction";

    fn write_to(&self, out: &mut Vec<u8>) {
        let raw = self.raw_bytes();
        let mut witnesses = Vec::new();
        write_bytes_vec(&mut witnesses, &self.witnesses);
        codec::write_dynamic(out, &[raw, witnesses]);
    }

    fn from_slice(slice: &[u8]) -> Result<Self, EncodingError> {
        let fields = codec::read_table(Self::NAME, slice, 2)?;
        let mut tx = Self::read_raw(fields[0])?;
        tx.witnesses = read_bytes_vec(fields[1])?;
        Ok(tx)
    }
}
