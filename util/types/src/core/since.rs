//! The `since` field of an input.
//!
//! ```text
//! bit 63       relative flag
//! bits 61..63  metric: 00 block number, 01 epoch, 10 timestamp
//! bits 56..61  reserved, must be 0
//! bits 0..56   value
//! ```

use crate::core::error::EncodingError;

const RELATIVE_FLAG: u64 = 1 << 63;
const METRIC_SHIFT: u32 = 61;
const METRIC_MASK: u64 = 0b11 << METRIC_SHIFT;
const RESERVED_MASK: u64 = 0x1f << 56;
const VALUE_MASK: u64 = (1 << 56) - 1;

/// What the since value counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SinceMetric {
    /// Block number.
    BlockNumber,
    /// Epoch number with fraction.
    EpochNumberWithFraction,
    /// Median timestamp in seconds.
    Timestamp,
}

/// A decoded `since` lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Since {
    /// Relative to the block the input cell was committed in, or absolute.
    pub relative: bool,
    /// What `value` counts.
    pub metric: SinceMetric,
    /// The 56-bit value.
    pub value: u64,
}

impl Since {
    /// Creates a since lock, failing if `value` exceeds 56 bits.
    pub fn new(relative: bool, metric: SinceMetric, value: u64) -> Result<Self, EncodingError> {
        if value & !VALUE_MASK != 0 {
            return Err(EncodingError::InvalidNumber(format!(
                "since value {value:#x} exceeds 56 bits"
            )));
        }
        Ok(Since {
            relative,
            metric,
            value,
        })
    }

    /// Encodes into the raw `since` field.
    pub fn to_u64(self) -> u64 {
        let flag = if self.relative { RELATIVE_FLAG } else { 0 };
        let metric = match self.metric {
            SinceMetric::BlockNumber => 0b00,
            SinceMetric::EpochNumberWithFraction => 0b01,
            SinceMetric::Timestamp => 0b10,
        };
        flag | (metric << METRIC_SHIFT) | (self.value & VALUE_MASK)
    }

    /// Decodes the raw `since` field. The value 0 means no lock and decodes as an absolute block number 0.
    pub fn from_u64(raw: u64) -> Result<Self, EncodingError> {
        if raw & RESERVED_MASK != 0 {
            return Err(EncodingError::InvalidNumber(format!(
                "since {raw:#x} has reserved bits set"
            )));
        }
        let metric = match (raw & METRIC_MASK) >> METRIC_SHIFT {
            0b00 => SinceMetric::BlockNumber,
            0b01 => SinceMetric::EpochNumberWithFraction,
            0b10 => SinceMetric::Timestamp,
            _ => {
                return Err(EncodingError::InvalidNumber(format!(
                    "since {raw:#x} has an invalid metric"
                )));
            }
        };
        Ok(Since {
            relative: raw & RELATIVE_FLAG != 0,
            metric,
            value: raw & VALUE_MASK,
        })
    }
}
