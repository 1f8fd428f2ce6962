//! Color table that follows the DIB header for indexed depths.

use alloc::vec::Vec;

use log::debug;

use super::header::{BitDepth, DibHeader};
use super::utils::region;
use crate::decode::Bpp16Mode;
use crate::error::BmpError;

/// Entries in the table a 16-bit image is looked up through in
/// [`Bpp16Mode::PaletteLookup`].
const BPP16_TABLE_LEN: usize = 1 << 16;

/// Ordered color table. Each entry is the raw little-endian `u32` from the
/// file: blue, green, red, and an ignored reserved byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<u32>,
}

impl Palette {
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Color code (`0x00RRGGBB`) of entry `index`.
    ///
    /// # Panics
    ///
    /// If `index >= self.len()`. The unpacker only produces indices narrower
    /// than the depth the table was sized for.
    #[inline]
    pub fn code(&self, index: usize) -> u32 {
        self.entries[index] & 0x00FF_FFFF
    }
}

/// Number of entries the palette stage reads for this header.
pub fn palette_len(dib: &DibHeader, mode: Bpp16Mode) -> usize {
    match dib.depth {
        BitDepth::One | BitDepth::Four | BitDepth::Eight => 1 << dib.depth.bits(),
        BitDepth::Sixteen if mode == Bpp16Mode::PaletteLookup => BPP16_TABLE_LEN,
        BitDepth::Sixteen | BitDepth::TwentyFour => 0,
    }
}

/// Read `len` entries at `offset`, returning the palette and the offset past it.
pub fn read_palette(
    data: &[u8],
    offset: usize,
    len: usize,
) -> Result<(Palette, usize), BmpError> {
    if len == 0 {
        return Ok((Palette::default(), offset));
    }

    let bytes = region(data, offset, len * 4)?;
    let entries = bytes
        .chunks_exact(4)
        .map(|e| u32::from_le_bytes([e[0], e[1], e[2], e[3]]))
        .collect();

    debug!("BMP palette: {len} entries at offset {offset}");
    Ok((Palette { entries }, offset + bytes.len()))
}
