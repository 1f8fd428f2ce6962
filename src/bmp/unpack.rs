//! Scanline walk from packed pixel bits to RGB.

use alloc::vec;

use enough::Stop;
use log::trace;
use rgb::RGB8;

use super::header::{BitDepth, DibHeader};
use super::palette::{Palette, palette_len};
use crate::decode::Bpp16Mode;
use crate::error::BmpError;
use crate::pixel::rgb_from_code;
use crate::raster::Raster;

/// Position in the raw pixel buffer, in bits.
///
/// Sub-byte depths advance by 1 or 4 bits per pixel and rows are padded in
/// bits too, so a bit count stays exact where a fractional byte count would
/// not.
#[derive(Clone, Copy, Debug, Default)]
struct BitCursor {
    bit: u64,
}

impl BitCursor {
    fn byte_index(self) -> usize {
        (self.bit / 8) as usize
    }

    fn advance(&mut self, bits: u32) {
        self.bit += u64::from(bits);
    }
}

struct Reader<'a> {
    raw: &'a [u8],
    /// Absolute offset of `raw` in the input, for error reports.
    base: usize,
    cursor: BitCursor,
}

impl Reader<'_> {
    fn truncated(&self, needed: usize) -> BmpError {
        let at = self.cursor.byte_index();
        BmpError::TruncatedInput {
            offset: self.base + at,
            needed,
            available: self.raw.len().saturating_sub(at),
        }
    }

    /// Next `N` whole bytes. The cursor is byte aligned whenever this is used:
    /// rows start on 32-bit boundaries and 16/24-bit pixels are whole bytes.
    fn bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let at = self.cursor.byte_index();
        let out = self
            .raw
            .get(at..)
            .and_then(|rest| rest.first_chunk::<N>())
            .copied()
            .ok_or_else(|| self.truncated(N))?;
        self.cursor.advance(N as u32 * 8);
        Ok(out)
    }

    /// Next `width`-bit field, most significant bits first. `width` divides 8,
    /// so a field never straddles bytes.
    fn field(&mut self, width: u32) -> Result<usize, BmpError> {
        let byte = *self
            .raw
            .get(self.cursor.byte_index())
            .ok_or_else(|| self.truncated(1))?;
        let shift = 8 - (self.cursor.bit % 8) as u32 - width;
        let mask = ((1u16 << width) - 1) as u8;
        self.cursor.advance(width);
        Ok(usize::from((byte >> shift) & mask))
    }
}

/// Turn the raw pixel region into a top-down raster.
///
/// `raw` starts at the first stored (bottom) scanline and `base` is its offset
/// in the original buffer. `palette` must hold the entries
/// [`palette_len`](super::palette_len) asks for this header and mode.
pub fn unpack_pixels(
    raw: &[u8],
    base: usize,
    dib: &DibHeader,
    palette: &Palette,
    mode: Bpp16Mode,
    stop: &dyn Stop,
) -> Result<Raster, BmpError> {
    let needed = palette_len(dib, mode);
    if palette.len() < needed {
        return Err(BmpError::InvalidFormat(alloc::format!(
            "palette has {} entries, {needed} needed",
            palette.len()
        )));
    }

    if dib.width <= 0 || dib.height <= 0 {
        return Err(BmpError::InvalidFormat(alloc::format!(
            "{}x{} raster",
            dib.width, dib.height
        )));
    }
    if (dib.row_bits() + u64::from(dib.row_padding_bits)) % 32 != 0 {
        return Err(BmpError::InvalidFormat(alloc::format!(
            "{} padding bits do not align a {}-bit scanline",
            dib.row_padding_bits,
            dib.row_bits()
        )));
    }

    // Every scanline must be present before the raster is allocated; the
    // last one may omit its padding.
    let required = dib.row_stride() * u64::from(dib.height() - 1) + dib.row_bits().div_ceil(8);
    if (raw.len() as u64) < required {
        return Err(BmpError::TruncatedInput {
            offset: base,
            needed: usize::try_from(required).unwrap_or(usize::MAX),
            available: raw.len(),
        });
    }

    let (width, height) = (dib.width(), dib.height());
    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let mut pixels = vec![RGB8::new(0, 0, 0); count];

    let mut reader = Reader {
        raw,
        base,
        cursor: BitCursor::default(),
    };

    // Storage is bottom-up, so the first stored row is the last raster row.
    for (row_idx, row) in pixels.rchunks_exact_mut(width as usize).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for px in row.iter_mut() {
            let code = match dib.depth {
                BitDepth::TwentyFour => {
                    let [b, g, r] = reader.bytes::<3>()?;
                    u32::from_le_bytes([b, g, r, 0])
                }
                BitDepth::Sixteen => {
                    let value = u16::from_be_bytes(reader.bytes::<2>()?);
                    match mode {
                        Bpp16Mode::Direct => u32::from(value),
                        Bpp16Mode::PaletteLookup => palette.code(usize::from(value)),
                    }
                }
                BitDepth::Eight => palette.code(reader.field(8)?),
                BitDepth::Four => palette.code(reader.field(4)?),
                BitDepth::One => palette.code(reader.field(1)?),
            };
            *px = rgb_from_code(code);
        }
        reader.cursor.advance(dib.row_padding_bits);
    }

    trace!(
        "BMP unpacked {count} pixels, cursor ended at bit {}",
        reader.cursor.bit
    );
    Ok(Raster::from_pixels(width, height, pixels))
}
