//! Conversions between primitive values and their canonical byte and string forms.

mod primitive;

pub use primitive::{
    LeNumber, array_from_hex, bytes_from_hex, fixed_point_from_str, fixed_point_to_string,
    hex_string, num_from_le_bytes, num_to_le_bytes,
};
