//! In-memory BMP construction for tests.

#![allow(dead_code)]

/// Builds a BMP from already-padded stored rows (bottom row first).
pub struct BmpBuilder {
    pub width: i32,
    pub height: i32,
    pub bpp: u16,
    pub compression: u32,
    pub palette: Vec<u32>,
    pub pixel_data: Vec<u8>,
    /// `None` writes the real pixel data length.
    pub bitmap_size: Option<u32>,
    /// Size written in the DIB header; extra bytes past 40 are zero-filled.
    pub header_size: u32,
    /// Zero bytes between palette and pixel data, reflected in the offset.
    pub gap: usize,
}

impl BmpBuilder {
    pub fn new(width: i32, height: i32, bpp: u16) -> Self {
        Self {
            width,
            height,
            bpp,
            compression: 0,
            palette: Vec::new(),
            pixel_data: Vec::new(),
            bitmap_size: None,
            header_size: 40,
            gap: 0,
        }
    }

    pub fn palette(mut self, entries: &[u32]) -> Self {
        self.palette = entries.to_vec();
        self
    }

    pub fn rows(mut self, stored_rows: &[&[u8]]) -> Self {
        self.pixel_data = stored_rows.concat();
        self
    }

    pub fn header_only_offset(&self) -> usize {
        14 + self.header_size as usize + self.palette.len() * 4 + self.gap
    }

    pub fn build(&self) -> Vec<u8> {
        let offset = self.header_only_offset();
        let file_size = offset + self.pixel_data.len();
        let bitmap_size = self.bitmap_size.unwrap_or(self.pixel_data.len() as u32);

        let mut out = Vec::with_capacity(file_size);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(offset as u32).to_le_bytes());

        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bpp.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&bitmap_size.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.resize(14 + self.header_size as usize, 0);

        for entry in &self.palette {
            out.extend_from_slice(&entry.to_le_bytes());
        }
        out.resize(offset, 0);
        out.extend_from_slice(&self.pixel_data);
        out
    }
}

/// `n`-entry grayscale ramp from black to white, as BGRX entries.
pub fn gray_ramp(n: u32) -> Vec<u32> {
    (0..n)
        .map(|i| {
            let v = i * 255 / (n - 1);
            v << 16 | v << 8 | v
        })
        .collect()
}

pub const BLACK: u32 = 0x0000_0000;
pub const WHITE: u32 = 0x00FF_FFFF;
