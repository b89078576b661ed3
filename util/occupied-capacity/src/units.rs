use std::fmt;
use thiserror::Error;

/// Shannons contained in one CKB (one byte of occupied capacity).
pub const BYTE_SHANNONS: u64 = 100_000_000;
/// Decimal places of the native unit.
pub const DECIMALS: u32 = 8;

/// Capacity error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Arithmetic overflow or underflow.
    #[error("OccupiedCapacity: overflow")]
    Overflow,
    /// A decimal string which is not a valid fixed-point amount.
    #[error("InvalidDecimal({0:?})")]
    InvalidDecimal(String),
}

/// Capacity result.
pub type Result<T> = ::std::result::Result<T, Error>;

/// The native amount, counted in shannons (10^-8 CKB).
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Capacity(u64);

impl Capacity {
    /// Zero capacity.
    pub const fn zero() -> Self {
        Capacity(0)
    }

    /// One shannon.
    pub const fn one() -> Self {
        Capacity(1)
    }

    /// Creates capacity from shannons.
    pub const fn shannons(val: u64) -> Self {
        Capacity(val)
    }

    /// Creates the capacity required to store `val` bytes.
    pub fn bytes(val: usize) -> Result<Self> {
        (val as u64)
            .checked_mul(BYTE_SHANNONS)
            .map(Capacity::shannons)
            .ok_or(Error::Overflow)
    }

    /// Parses a decimal CKB amount such as `"61"` or `"0.5"`.
    pub fn from_ckb_str(s: &str) -> Result<Self> {
        let value = fixed_point_from_str(s, DECIMALS)?;
        u64::try_from(value)
            .map(Capacity::shannons)
            .map_err(|_| Error::Overflow)
    }

    /// Formats the amount as a decimal CKB string, trimming trailing zeros.
    pub fn to_ckb_string(self) -> String {
        fixed_point_to_string(u128::from(self.0), DECIMALS)
    }

    /// Returns the shannons.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Adds with overflow check.
    pub fn safe_add<C: Into<Capacity>>(self, rhs: C) -> Result<Self> {
        self.0
            .checked_add(rhs.into().0)
            .map(Capacity::shannons)
            .ok_or(Error::Overflow)
    }

    /// Subtracts with underflow check.
    pub fn safe_sub<C: Into<Capacity>>(self, rhs: C) -> Result<Self> {
        self.0
            .checked_sub(rhs.into().0)
            .map(Capacity::shannons)
            .ok_or(Error::Overflow)
    }

    /// Multiplies with overflow check.
    pub fn safe_mul<C: Into<Capacity>>(self, rhs: C) -> Result<Self> {
        self.0
            .checked_mul(rhs.into().0)
            .map(Capacity::shannons)
            .ok_or(Error::Overflow)
    }

    /// Sums all capacities with overflow check.
    pub fn safe_sum<I: IntoIterator<Item = Capacity>>(iter: I) -> Result<Self> {
        iter.into_iter()
            .try_fold(Capacity::zero(), |acc, c| acc.safe_add(c))
    }
}

impl From<u64> for Capacity {
    fn from(val: u64) -> Self {
        Self::shannons(val)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} Shannons", self.0)
    }
}

impl fmt::LowerHex for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Parses a non-negative decimal string into an integer scaled by `10^decimals`.
///
/// More fractional digits than `decimals` is an error rather than a silent truncation.
pub fn fixed_point_from_str(s: &str, decimals: u32) -> Result<u128> {
    let invalid = || Error::InvalidDecimal(s.to_owned());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let scale = 10u128.checked_pow(decimals).ok_or(Error::Overflow)?;
    let mut value = int_part
        .parse::<u128>()
        .map_err(|_| Error::Overflow)?
        .checked_mul(scale)
        .ok_or(Error::Overflow)?;
    if let Some(frac) = frac_part {
        if frac.is_empty()
            || frac.len() > decimals as usize
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let padding = 10u128.pow(decimals - frac.len() as u32);
        let frac_value = frac.parse::<u128>().map_err(|_| invalid())? * padding;
        value = value.checked_add(frac_value).ok_or(Error::Overflow)?;
    }
    Ok(value)
}

/// Formats an integer scaled by `10^decimals` as a decimal string.
pub fn fixed_point_to_string(value: u128, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let scale = 10u128.pow(decimals);
    let int_part = value / scale;
    let frac_part = value % scale;
    if frac_part == 0 {
        return int_part.to_string();
    }
    let frac = format!("{:0width$}", frac_part, width = decimals as usize);
    format!("{}.{}", int_part, frac.trim_end_matches('0'))
}
