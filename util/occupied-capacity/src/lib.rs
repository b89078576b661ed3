//! The native capacity unit.
//!
//! Capacity is both the native token amount held by a cell and the upper bound of the bytes the
//! cell may occupy: storing one byte costs one CKB, which is `10^8` shannons.

mod units;


pub use units::{
    BYTE_SHANNONS, Capacity, DECIMALS, Error, Result, fixed_point_from_str,
    fixed_point_to_string,
};

/// Builds a [`Capacity`] holding `$val` CKB, checked at compile time when used in const context.
///
/// ```
/// use ckb_occupied_capacity::{capacity_bytes, Capacity};
///
/// assert_eq!(capacity_bytes!(61), Capacity::shannons(6_100_000_000));
/// ```
#[macro_export]
macro_rules! capacity_bytes {
    ($val:expr) => {
        $crate::Capacity::shannons(($val as u64) * $crate::BYTE_SHANNONS)
    };
}

/// Measures the bytes a value occupies when stored on chain.
pub trait OccupiedCapacity {
    /// The occupied capacity.
    fn occupied_capacity(&self) -> Result<Capacity>;
}

impl OccupiedCapacity for Capacity {
    fn occupied_capacity(&self) -> Result<Capacity> {
        Capacity::bytes(8)
    }
}

impl OccupiedCapacity for Vec<u8> {
    fn occupied_capacity(&self) -> Result<Capacity> {
        Capacity::bytes(self.len())
    }
}
