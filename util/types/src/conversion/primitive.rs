use crate::core::error::EncodingError;

pub use ckb_occupied_capacity::{fixed_point_from_str, fixed_point_to_string};

/// Formats bytes as a lowercase hex string with a `0x` prefix.
pub fn hex_string(bytes: &[u8]) -> String {
    format!("0x{}", faster_hex::hex_string(bytes))
}

/// Parses a hex string, with or without the `0x` prefix.
pub fn bytes_from_hex(input: &str) -> Result<Vec<u8>, EncodingError> {
    let hex = input.strip_prefix("0x").unwrap_or(input);
    if hex.len() % 2 != 0 {
        return Err(EncodingError::InvalidHex(input.to_owned()));
    }
    if hex.is_empty() {
        return Ok(Vec::new());
    }
    let mut bytes = vec![0u8; hex.len() / 2];
    faster_hex::hex_decode(hex.as_bytes(), &mut bytes)
        .map_err(|_| EncodingError::InvalidHex(input.to_owned()))?;
    Ok(bytes)
}

/// Parses a hex string into an array of exactly `N` bytes.
pub fn array_from_hex<const N: usize>(input: &str) -> Result<[u8; N], EncodingError> {
    let bytes = bytes_from_hex(input)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncodingError::InvalidLength {
            name: "hex",
            expected: N,
            actual: bytes.len(),
        })
}

/// Fixed-width unsigned integers stored little-endian.
pub trait LeNumber: Sized + Copy {
    /// Width in bytes.
    const SIZE: usize;

    /// Packs into `SIZE` little-endian bytes.
    fn to_le_vec(self) -> Vec<u8>;

    /// Unpacks from exactly `SIZE` little-endian bytes.
    fn from_le_slice(slice: &[u8]) -> Result<Self, EncodingError>;
}

macro_rules! impl_le_number {
    ($($type:ty),*) => {
        $(
            impl LeNumber for $type {
                const SIZE: usize = ::std::mem::size_of::<$type>();

                fn to_le_vec(self) -> Vec<u8> {
                    self.to_le_bytes().to_vec()
                }

                fn from_le_slice(slice: &[u8]) -> Result<Self, EncodingError> {
                    let buf = slice.try_into().map_err(|_| EncodingError::InvalidLength {
                        name: stringify!($type),
                        expected: Self::SIZE,
                        actual: slice.len(),
                    })?;
                    Ok(<$type>::from_le_bytes(buf))
                }
            }
        )*
    };
}

impl_le_number!(u8, u16, u32, u64, u128);

/// Packs a number into little-endian bytes.
pub fn num_to_le_bytes<T: LeNumber>(num: T) -> Vec<u8> {
    num.to_le_vec()
}

/// Unpacks a number from little-endian bytes of exactly its width.
pub fn num_from_le_bytes<T: LeNumber>(bytes: &[u8]) -> Result<T, EncodingError> {
    T::from_le_slice(bytes)
}
