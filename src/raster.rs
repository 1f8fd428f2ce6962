use alloc::vec::Vec;
use core::ops::Index;

use rgb::RGB8;

use crate::pixel::code_from_rgb;

/// Decoded image: `width * height` RGB pixels in row-major order, (0, 0) at
/// the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<RGB8>,
}

impl Raster {
    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<RGB8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// If `x >= width` or `y >= height`. Use [`Raster::get`] for a checked lookup.
    pub fn at(&self, x: u32, y: u32) -> RGB8 {
        self[(x, y)]
    }

    pub fn get(&self, x: u32, y: u32) -> Option<RGB8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.offset_of(x, y)])
    }

    /// Pixel at (`x`, `y`) as a `0x00RRGGBB` color code.
    pub fn code_at(&self, x: u32, y: u32) -> u32 {
        code_from_rgb(self.at(x, y))
    }

    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<RGB8> {
        self.pixels
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[RGB8]> + '_ {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Packed `R, G, B` bytes, three per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    /// Zero-copy [`imgref::ImgRef`] view.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, RGB8> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }

    #[cfg(feature = "imgref")]
    pub fn into_imgvec(self) -> imgref::ImgVec<RGB8> {
        imgref::ImgVec::new(self.pixels, self.width as usize, self.height as usize)
    }

    fn offset_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Index<(u32, u32)> for Raster {
    type Output = RGB8;

    fn index(&self, (x, y): (u32, u32)) -> &RGB8 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        &self.pixels[self.offset_of(x, y)]
    }
}
