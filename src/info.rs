use crate::bmp::{self, BitDepth};
use crate::decode::Bpp16Mode;
use crate::error::BmpError;

/// Image properties read from the headers alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub width: u32,
    pub height: u32,
    pub depth: BitDepth,
    /// Palette entries a default decode reads (0 for 16 and 24 bpp).
    pub palette_len: usize,
    /// Offset of the first stored scanline.
    pub pixel_data_start: usize,
    /// Bytes per stored scanline, padding included.
    pub row_stride: u64,
    /// Declared (or derived) size of the pixel data.
    pub bitmap_size: u32,
}

impl BmpInfo {
    /// Probe the file and DIB headers without reading the palette or pixels.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        let (file, offset) = bmp::parse_file_header(data, 0)?;
        let (dib, offset) = bmp::parse_dib_header(data, offset, &file)?;
        let palette_len = bmp::palette_len(&dib, Bpp16Mode::Direct);
        let pixel_data_start = bmp::pixel_data_start(offset + palette_len * 4, &file);

        Ok(Self {
            width: dib.width(),
            height: dib.height(),
            depth: dib.depth,
            palette_len,
            pixel_data_start,
            row_stride: dib.row_stride(),
            bitmap_size: bmp::pixel_data_len(&dib, &file, pixel_data_start) as u32,
        })
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.depth.bits()
    }
}
