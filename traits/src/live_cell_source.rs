use async_trait::async_trait;
use ckb_error::Error;
use ckb_types::{
    core::Cell,
    packed::{OutPoint, Script},
};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// Which script of a cell the search key refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptType {
    #[default]
    Lock,
    Type,
}

/// How the searched script is compared with the cell script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Same code hash and hash type, args start with the searched args.
    #[default]
    Prefix,
    /// The scripts are equal.
    Exact,
    /// Same code hash and hash type, args contain the searched args.
    Partial,
}

impl SearchMode {
    /// Whether `candidate` matches `searched` in this mode.
    pub fn matches(self, searched: &Script, candidate: &Script) -> bool {
        if searched.code_hash != candidate.code_hash || searched.hash_type != candidate.hash_type {
            return false;
        }
        match self {
            SearchMode::Exact => searched.args == candidate.args,
            SearchMode::Prefix => candidate.args.starts_with(&searched.args),
            SearchMode::Partial => {
                searched.args.is_empty()
                    || candidate
                        .args
                        .windows(searched.args.len())
                        .any(|window| window == &searched.args[..])
            }
        }
    }
}

/// Additional conditions on the cells found. Ranges are half-open `[start, end)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellFilter {
    /// Prefix match on the other script: the type script when searching by lock and vice versa.
    pub script: Option<Script>,
    /// Encoded length of the other script, 0 when absent.
    pub script_len_range: Option<[usize; 2]>,
    /// Length of the cell data.
    pub output_data_len_range: Option<[usize; 2]>,
    /// Cell capacity in shannons.
    pub output_capacity_range: Option<[u64; 2]>,
}

/// A live cell query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchKey {
    pub script: Script,
    pub script_type: ScriptType,
    pub script_search_mode: SearchMode,
    pub filter: Option<CellFilter>,
    pub with_data: bool,
}

fn in_range<T: PartialOrd>(value: T, range: &Option<[T; 2]>) -> bool {
    match range {
        Some([start, end]) => &value >= start && &value < end,
        None => true,
    }
}

impl SearchKey {
    /// Cells locked by `lock`.
    pub fn by_lock(lock: Script) -> Self {
        SearchKey {
            script: lock,
            script_type: ScriptType::Lock,
            script_search_mode: SearchMode::Exact,
            filter: None,
            with_data: true,
        }
    }

    /// Replaces the filter.
    pub fn with_filter(mut self, filter: CellFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Whether `cell` satisfies the query.
    pub fn matches(&self, cell: &Cell) -> bool {
        let (searched, other) = match self.script_type {
            ScriptType::Lock => (Some(&cell.output.lock), cell.output.type_.as_ref()),
            ScriptType::Type => (cell.output.type_.as_ref(), Some(&cell.output.lock)),
        };
        let Some(searched) = searched else {
            return false;
        };
        if !self.script_search_mode.matches(&self.script, searched) {
            return false;
        }
        let Some(filter) = self.filter.as_ref() else {
            return true;
        };
        if let Some(script) = filter.script.as_ref() {
            match other {
                Some(other) if SearchMode::Prefix.matches(script, other) => {}
                _ => return false,
            }
        }
        let other_len = other.map_or(0, |script| ckb_types::prelude::Entity::serialized_size(script));
        in_range(other_len, &filter.script_len_range)
            && in_range(cell.data.len(), &filter.output_data_len_range)
            && in_range(cell.capacity().as_u64(), &filter.output_capacity_range)
    }
}

/// A source of live cells.
#[async_trait]
pub trait LiveCellSource: Send + Sync {
    /// Streams the live cells matching `key` in a stable order.
    ///
    /// The stream may be unbounded. Dropping it stops the search.
    fn find_cells(&self, key: SearchKey) -> BoxStream<'_, Result<Cell, Error>>;

    /// Marks a cell as consumed by a pending transaction so it is no longer returned.
    async fn mark_unusable(&self, _out_point: &OutPoint) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ckb_types::{
        bytes::Bytes,
        core::{Capacity, ScriptHashType},
        packed::{Byte32, CellOutput},
    };

    fn script(args: &[u8]) -> Script {
        Script::new(Byte32::new([1; 32]), ScriptHashType::Type, args.to_vec())
    }

    fn cell(lock: Script, type_: Option<Script>, data: &[u8]) -> Cell {
        Cell::new(
            OutPoint::default(),
            CellOutput::new(Capacity::shannons(100), lock, type_),
            Bytes::copy_from_slice(data),
        )
    }

    #[test]
    fn search_modes() {
        let searched = script(&[1, 2]);
        assert!(SearchMode::Exact.matches(&searched, &script(&[1, 2])));
        assert!(!SearchMode::Exact.matches(&searched, &script(&[1, 2, 3])));
        assert!(SearchMode::Prefix.matches(&searched, &script(&[1, 2, 3])));
        assert!(!SearchMode::Prefix.matches(&searched, &script(&[0, 1, 2])));
        assert!(SearchMode::Partial.matches(&searched, &script(&[0, 1, 2])));
        let other_code = Script::new(Byte32::new([2; 32]), ScriptHashType::Type, vec![1, 2]);
        assert!(!SearchMode::Partial.matches(&searched, &other_code));
    }

    #[test]
    fn filters() {
        let lock = script(&[9]);
        let token = script(&[7]);
        let plain = cell(lock.clone(), None, &[]);
        let with_data = cell(lock.clone(), None, &[0; 4]);
        let token_cell = cell(lock.clone(), Some(token.clone()), &[0; 16]);

        let capacity_only = SearchKey::by_lock(lock.clone()).with_filter(CellFilter {
            script_len_range: Some([0, 1]),
            output_data_len_range: Some([0, 1]),
            ..Default::default()
        });
        assert!(capacity_only.matches(&plain));
        assert!(!capacity_only.matches(&with_data));
        assert!(!capacity_only.matches(&token_cell));

        let tokens = SearchKey::by_lock(lock.clone()).with_filter(CellFilter {
            script: Some(token),
            output_data_len_range: Some([16, usize::MAX]),
            ..Default::default()
        });
        assert!(tokens.matches(&token_cell));
        assert!(!tokens.matches(&plain));

        assert!(!SearchKey::by_lock(script(&[8])).matches(&plain));
        let by_capacity = SearchKey::by_lock(lock).with_filter(CellFilter {
            output_capacity_range: Some([0, 100]),
            ..Default::default()
        });
        assert!(!by_capacity.matches(&plain));
    }
}
