//! Low level molecule layouts.
//!
//! * fixed-size structs and arrays are the raw concatenation of their fields, no header.
//! * `fixvec` is an item count followed by the fixed-size items.
//! * `dynvec` and `table` share one layout: the total size, one offset per item, then the items.
//! * `option` is empty for absent, or exactly the item bytes.
//!
//! All numbers are little-endian `u32`.

use molecule::{NUMBER_SIZE, Number, error::VerificationError, pack_number, unpack_number};

use crate::core::error::EncodingError;

pub(crate) fn write_number(out: &mut Vec<u8>, num: usize) {
    out.extend_from_slice(&pack_number(num as Number));
}

/// `fixvec<byte>`
pub(crate) fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_number(out, bytes.len());
    out.extend_from_slice(bytes);
}

pub(crate) fn write_fixvec<T, F>(out: &mut Vec<u8>, items: &[T], mut write_item: F)
where
    F: FnMut(&T, &mut Vec<u8>),
{
    write_number(out, items.len());
    for item in items {
        write_item(item, out);
    }
}

/// Writes a `dynvec` or a `table` whose items are already serialized.
pub(crate) fn write_dynamic<P: AsRef<[u8]>>(out: &mut Vec<u8>, parts: &[P]) {
    let header_size = NUMBER_SIZE * (parts.len() + 1);
    let total_size = header_size + parts.iter().map(|p| p.as_ref().len()).sum::<usize>();
    write_number(out, total_size);
    let mut offset = header_size;
    for part in parts {
        write_number(out, offset);
        offset += part.as_ref().len();
    }
    for part in parts {
        out.extend_from_slice(part.as_ref());
    }
}

pub(crate) fn write_option<F>(out: &mut Vec<u8>, present: bool, write_item: F)
where
    F: FnOnce(&mut Vec<u8>),
{
    if present {
        write_item(out);
    }
}

pub(crate) fn read_number(slice: &[u8]) -> usize {
    unpack_number(slice) as usize
}

pub(crate) fn check_struct(
    name: &'static str,
    slice: &[u8],
    expected: usize,
) -> Result<(), EncodingError> {
    if slice.len() != expected {
        return Err(
            VerificationError::TotalSizeNotMatch(name.to_owned(), expected, slice.len()).into(),
        );
    }
    Ok(())
}

pub(crate) fn read_bytes<'a>(name: &'static str, slice: &'a [u8]) -> Result<&'a [u8], EncodingError> {
    let items = read_fixvec(name, slice, 1)?;
    Ok(&slice[NUMBER_SIZE..NUMBER_SIZE + items.len()])
}

pub(crate) fn read_fixvec<'a>(
    name: &'static str,
    slice: &'a [u8],
    item_size: usize,
) -> Result<Vec<&'a [u8]>, EncodingError> {
    if slice.len() < NUMBER_SIZE {
        return Err(
            VerificationError::HeaderIsBroken(name.to_owned(), NUMBER_SIZE, slice.len()).into(),
        );
    }
    let item_count = read_number(slice);
    let expected = item_count
        .checked_mul(item_size)
        .and_then(|size| size.checked_add(NUMBER_SIZE))
        .ok_or_else(|| {
            VerificationError::TotalSizeNotMatch(name.to_owned(), usize::MAX, slice.len())
        })?;
    if slice.len() != expected {
        return Err(
            VerificationError::TotalSizeNotMatch(name.to_owned(), expected, slice.len()).into(),
        );
    }
    Ok(slice[NUMBER_SIZE..].chunks_exact(item_size).collect())
}

/// Splits a `dynvec` into its items.
pub(crate) fn read_dynvec<'a>(
    name: &'static str,
    slice: &'a [u8],
) -> Result<Vec<&'a [u8]>, EncodingError> {
    let slice_len = slice.len();
    if slice_len < NUMBER_SIZE {
        return Err(
            VerificationError::HeaderIsBroken(name.to_owned(), NUMBER_SIZE, slice_len).into(),
        );
    }
    let total_size = read_number(slice);
    if total_size != slice_len {
        return Err(
            VerificationError::TotalSizeNotMatch(name.to_owned(), total_size, slice_len).into(),
        );
    }
    if slice_len == NUMBER_SIZE {
        return Ok(Vec::new());
    }
    if slice_len < NUMBER_SIZE * 2 {
        return Err(
            VerificationError::HeaderIsBroken(name.to_owned(), NUMBER_SIZE * 2, slice_len).into(),
        );
    }
    let first_offset = read_number(&slice[NUMBER_SIZE..]);
    if first_offset % NUMBER_SIZE != 0 || first_offset < NUMBER_SIZE * 2 {
        return Err(VerificationError::OffsetsNotMatch(name.to_owned()).into());
    }
    if slice_len < first_offset {
        return Err(
            VerificationError::HeaderIsBroken(name.to_owned(), first_offset, slice_len).into(),
        );
    }
    let item_count = first_offset / NUMBER_SIZE - 1;
    let mut offsets: Vec<usize> = slice[NUMBER_SIZE..first_offset]
        .chunks_exact(NUMBER_SIZE)
        .map(read_number)
        .collect();
    offsets.push(total_size);
    if offsets.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(VerificationError::OffsetsNotMatch(name.to_owned()).into());
    }
    debug_assert_eq!(offsets.len(), item_count + 1);
    Ok(offsets
        .windows(2)
        .map(|pair| &slice[pair[0]..pair[1]])
        .collect())
}

/// Splits a `table` into its fields, rejecting tables with another field count.
pub(crate) fn read_table<'a>(
    name: &'static str,
    slice: &'a [u8],
    field_count: usize,
) -> Result<Vec<&'a [u8]>, EncodingError> {
    let fields = read_dynvec(name, slice)?;
    if fields.len() != field_count {
        return Err(
            VerificationError::FieldCountNotMatch(name.to_owned(), field_count, fields.len())
                .into(),
        );
    }
    Ok(fields)
}

pub(crate) fn read_option<T, F>(slice: &[u8], read_item: F) -> Result<Option<T>, EncodingError>
where
    F: FnOnce(&[u8]) -> Result<T, EncodingError>,
{
    if slice.is_empty() {
        Ok(None)
    } else {
        read_item(slice).map(Some)
    }
}

pub(crate) fn read_u32(name: &'static str, slice: &[u8]) -> Result<u32, EncodingError> {
    check_struct(name, slice, 4)?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(slice);
    Ok(u32::from_le_bytes(buf))
}

pub(crate) fn read_u64(name: &'static str, slice: &[u8]) -> Result<u64, EncodingError> {
    check_struct(name, slice, 8)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(slice);
    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dynvec_is_header_only() {
        let mut out = Vec::new();
        write_dynamic::<Vec<u8>>(&mut out, &[]);
        assert_eq!(out, vec![4, 0, 0, 0]);
        assert!(read_dynvec("BytesVec", &out).unwrap().is_empty());
    }

    #[test]
    fn dynamic_layout_offsets() {
        let mut out = Vec::new();
        write_dynamic(&mut out, &[vec![0xaa], vec![], vec![0xbb, 0xcc]]);
        assert_eq!(
            out,
            vec![19, 0, 0, 0, 16, 0, 0, 0, 17, 0, 0, 0, 17, 0, 0, 0, 0xaa, 0xbb, 0xcc]
        );
        let parts = read_table("Test", &out, 3).unwrap();
        assert_eq!(parts, vec![&[0xaa][..], &[][..], &[0xbb, 0xcc][..]]);
        assert!(read_table("Test", &out, 2).is_err());
    }

    #[test]
    fn reject_broken_headers() {
        assert!(read_dynvec("Test", &[4, 0, 0]).is_err());
        assert!(read_dynvec("Test", &[8, 0, 0, 0, 8, 0, 0]).is_err());
        // offset not aligned
        assert!(read_dynvec("Test", &[9, 0, 0, 0, 9, 0, 0, 0, 1]).is_err());
        // decreasing offsets
        let bad = [16, 0, 0, 0, 12, 0, 0, 0, 8, 0, 0, 0, 1, 2, 3, 4];
        assert!(read_dynvec("Test", &bad).is_err());
        // total size not match
        assert!(read_dynvec("Test", &[12, 0, 0, 0, 8, 0, 0, 0, 1]).is_err());
    }

    #[test]
    fn fixvec_length_check() {
        let mut out = Vec::new();
        write_bytes(&mut out, &[1, 2, 3]);
        assert_eq!(read_bytes("Bytes", &out).unwrap(), &[1, 2, 3]);
        assert!(read_bytes("Bytes", &out[..6]).is_err());
        assert!(read_fixvec("Byte32Vec", &[1, 0, 0, 0, 1], 32).is_err());
        assert!(read_fixvec("Byte32Vec", &[0xff, 0xff, 0xff, 0xff], 32).is_err());
    }
}
