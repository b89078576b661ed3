use async_trait::async_trait;
use ckb_error::{Error, ErrorKind};
use ckb_hash::blake2b_256;
use ckb_traits::{CellResolver, FeeRateProvider, LiveCellSource, SearchKey};
use ckb_types::{
    address::NetworkType,
    bytes::Bytes,
    core::{Capacity, Cell, FeeRate, KnownScript, KnownScripts},
    packed::{Byte32, CellOutput, OutPoint, Script},
};
use futures::{StreamExt, stream::BoxStream};
use parking_lot::RwLock;
use std::{
    collections::HashSet,
    sync::atomic::{AtomicUsize, Ordering},
};

/// The testnet secp256k1-blake160 lock with `args`.
pub fn secp_lock(args: [u8; 20]) -> Script {
    let known = KnownScripts::builtin(NetworkType::Testnet);
    match known.get(KnownScript::Secp256k1Blake160) {
        Some(info) => info.script(args.to_vec()),
        None => unreachable!("secp256k1-blake160 is a builtin script"),
    }
}

/// A chain kept in memory.
///
/// Cells are yielded in insertion order. Every cell pulled from a stream returned by
/// `find_cells` is counted, so tests can observe when a caller stops pulling.
pub struct MockChain {
    cells: RwLock<Vec<Cell>>,
    unusable: RwLock<HashSet<OutPoint>>,
    failing: RwLock<HashSet<OutPoint>>,
    fee_rate: RwLock<FeeRate>,
    pulled: AtomicUsize,
}

impl Default for MockChain {
    fn default() -> Self {
        MockChain::new()
    }
}

impl MockChain {
    /// An empty chain with a fee rate of 1000 shannons per 1000 bytes.
    pub fn new() -> Self {
        MockChain {
            cells: RwLock::new(Vec::new()),
            unusable: RwLock::new(HashSet::new()),
            failing: RwLock::new(HashSet::new()),
            fee_rate: RwLock::new(FeeRate::from_u64(1000)),
            pulled: AtomicUsize::new(0),
        }
    }

    pub fn set_fee_rate(&self, fee_rate: FeeRate) {
        *self.fee_rate.write() = fee_rate;
    }

    /// Stores a cell at a fresh out-point.
    pub fn add_cell(&self, output: CellOutput, data: impl Into<Bytes>) -> Cell {
        let mut cells = self.cells.write();
        let seed = (cells.len() as u64).to_le_bytes();
        let out_point = OutPoint::new(Byte32::new(blake2b_256(seed)), 0);
        let cell = Cell::new(out_point, output, data.into());
        cells.push(cell.clone());
        cell
    }

    /// Stores a cell holding only capacity.
    pub fn add_capacity_cell(&self, lock: &Script, capacity: Capacity) -> Cell {
        self.add_cell(CellOutput::new(capacity, lock.clone(), None), Bytes::new())
    }

    /// Stores a token cell holding `balance`.
    pub fn add_token_cell(
        &self,
        lock: &Script,
        type_script: &Script,
        capacity: Capacity,
        balance: u128,
    ) -> Cell {
        let output = CellOutput::new(capacity, lock.clone(), Some(type_script.clone()));
        self.add_cell(output, balance.to_le_bytes().to_vec())
    }

    /// Makes lookups of `out_point` fail with an external error.
    pub fn fail_on(&self, out_point: &OutPoint) {
        self.failing.write().insert(out_point.clone());
    }

    /// Cells pulled from streams so far.
    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }

    pub fn is_unusable(&self, out_point: &OutPoint) -> bool {
        self.unusable.read().contains(out_point)
    }
}

#[async_trait]
impl CellResolver for MockChain {
    async fn get_cell(&self, out_point: &OutPoint) -> Result<Option<Cell>, Error> {
        if self.failing.read().contains(out_point) {
            return Err(ErrorKind::External.other(format!("lookup of {out_point} failed")));
        }
        Ok(self
            .cells
            .read()
            .iter()
            .find(|cell| &cell.out_point == out_point)
            .cloned())
    }
}

#[async_trait]
impl LiveCellSource for MockChain {
    fn find_cells(&self, key: SearchKey) -> BoxStream<'_, Result<Cell, Error>> {
        let matched: Vec<Cell> = {
            let unusable = self.unusable.read();
            self.cells
                .read()
                .iter()
                .filter(|cell| !unusable.contains(&cell.out_point) && key.matches(cell))
                .cloned()
                .collect()
        };
        futures::stream::iter(matched)
            .map(move |cell| {
                self.pulled.fetch_add(1, Ordering::SeqCst);
                Ok(cell)
            })
            .boxed()
    }

    async fn mark_unusable(&self, out_point: &OutPoint) -> Result<(), Error> {
        self.unusable.write().insert(out_point.clone());
        Ok(())
    }
}

#[async_trait]
impl FeeRateProvider for MockChain {
    async fn fee_rate(&self) -> Result<FeeRate, Error> {
        Ok(*self.fee_rate.read())
    }
}
