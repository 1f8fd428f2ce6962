//! The decode pipeline, one module per stage.
//!
//! Every stage is a plain function over the input buffer that takes the
//! offset where it should start and returns the offset where the next stage
//! starts, so each can be driven on its own:
//!
//! 1. [`parse_file_header`]
//! 2. [`parse_dib_header`]
//! 3. [`read_palette`]
//! 4. [`unpack_pixels`]

mod header;
mod palette;
mod unpack;
mod utils;

pub use header::{
    BitDepth, DIB_HEADER_LEN, DibHeader, FILE_HEADER_LEN, FileHeader, SIGNATURE,
    parse_dib_header, parse_file_header,
};
pub use palette::{Palette, palette_len, read_palette};
pub use unpack::unpack_pixels;

use enough::Stop;
use log::trace;

use crate::decode::Bpp16Mode;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::raster::Raster;

/// Where pixel data starts once the palette ends at `after_palette`.
///
/// The declared offset is honored when it skips a gap, and ignored when it
/// points back into the headers or palette.
pub fn pixel_data_start(after_palette: usize, file: &FileHeader) -> usize {
    after_palette.max(file.pixel_data_offset as usize)
}

/// Bytes of pixel data at `start`.
///
/// A size derived from the file header is measured from `start`, so it stays
/// right when the declared pixel offset was ignored.
pub fn pixel_data_len(dib: &DibHeader, file: &FileHeader, start: usize) -> usize {
    if dib.bitmap_size_derived {
        (file.file_size as usize).saturating_sub(start)
    } else {
        dib.bitmap_size as usize
    }
}

pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    mode: Bpp16Mode,
    stop: &dyn Stop,
) -> Result<Raster, BmpError> {
    let (file, offset) = parse_file_header(data, 0)?;
    let (dib, offset) = parse_dib_header(data, offset, &file)?;
    if let Some(limits) = limits {
        limits.check_raster(dib.width(), dib.height())?;
    }
    stop.check()?;

    let (palette, offset) = read_palette(data, offset, palette_len(&dib, mode))?;
    let start = pixel_data_start(offset, &file);
    trace!("BMP pixel data at {start}, palette ended at {offset}");

    let raw = utils::region(data, start, pixel_data_len(&dib, &file, start))?;
    unpack_pixels(raw, start, &dib, &palette, mode, stop)
}
