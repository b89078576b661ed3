use ckb_occupied_capacity::Capacity;
use serde::{Deserialize, Serialize};

/// shannons per kilobytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeRate(u64);

impl FeeRate {
    pub const fn from_u64(fee_per_kb: u64) -> Self {
        FeeRate(fee_per_kb)
    }

    pub const fn zero() -> Self {
        Self::from_u64(0)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// The fee for `size` bytes, rounded up.
    pub fn fee(self, size: usize) -> Capacity {
        let product = u128::from(self.0) * size as u128;
        let fee = product.div_ceil(1000);
        Capacity::shannons(u64::try_from(fee).unwrap_or(u64::MAX))
    }

    /// The rate paid by `fee` over `size` bytes, rounded down.
    pub fn from_fee(fee: Capacity, size: usize) -> Self {
        if size == 0 {
            return FeeRate::zero();
        }
        let rate = u128::from(fee.as_u64()) * 1000 / size as u128;
        FeeRate(u64::try_from(rate).unwrap_or(u64::MAX))
    }
}

impl ::std::fmt::Display for FeeRate {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
