//! Bounds-checked little-endian field access for the fixed BMP layouts.

use crate::error::BmpError;

/// Borrow exactly `N` bytes at `offset`, or report how far short the buffer is.
pub(crate) fn fixed<const N: usize>(data: &[u8], offset: usize) -> Result<&[u8; N], BmpError> {
    data.get(offset..)
        .and_then(|rest| rest.first_chunk::<N>())
        .ok_or_else(|| BmpError::truncated(offset, N, data.len()))
}

/// Borrow `len` bytes at `offset`.
pub(crate) fn region(data: &[u8], offset: usize, len: usize) -> Result<&[u8], BmpError> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| BmpError::truncated(offset, len, data.len()))
}

// Field readers over an already length-checked header block. `at + width`
// must stay within `N`, which every caller satisfies with constant offsets.

#[inline]
pub(crate) fn le_u16<const N: usize>(block: &[u8; N], at: usize) -> u16 {
    u16::from_le_bytes([block[at], block[at + 1]])
}

#[inline]
pub(crate) fn le_u32<const N: usize>(block: &[u8; N], at: usize) -> u32 {
    u32::from_le_bytes([block[at], block[at + 1], block[at + 2], block[at + 3]])
}

#[inline]
pub(crate) fn le_i32<const N: usize>(block: &[u8; N], at: usize) -> i32 {
    le_u32(block, at) as i32
}
