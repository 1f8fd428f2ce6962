//! # zenbmp
//!
//! Decoder for uncompressed Windows Bitmap (BMP) images into an RGB raster.
//!
//! ## Supported Formats
//!
//! - BITMAPINFOHEADER (40-byte) files, and the V2–V5 headers that extend it
//! - 1, 4 and 8 bits per pixel through the color table
//! - 16 bits per pixel as a direct big-endian color code, or through a
//!   65 536-entry table with [`Bpp16Mode::PaletteLookup`]
//! - 24 bits per pixel BGR
//!
//! ## Non-Goals
//!
//! - RLE4/RLE8 compression and BI_BITFIELDS masks
//! - Top-down (negative height) images
//! - Encoding, scaling, or any other image processing
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{BmpInfo, decode_from_bytes};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let info = BmpInfo::from_bytes(data)?;
//! println!("{}x{} at {} bpp", info.width, info.height, info.bits_per_pixel());
//!
//! let raster = decode_from_bytes(data)?;
//! let top_left = raster.at(0, 0);
//! println!("{top_left:?}");
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod info;
mod limits;
mod pixel;
mod raster;

pub mod bmp;

pub use decode::{Bpp16Mode, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::{BmpError, ErrorKind};
pub use info::BmpInfo;
pub use limits::Limits;
pub use pixel::{code_from_rgb, rgb_from_code};
pub use raster::Raster;
pub use rgb::RGB8;

/// Decode a complete BMP image held in memory.
pub fn decode_from_bytes(data: &[u8]) -> Result<Raster, BmpError> {
    DecodeRequest::new(data).decode(Unstoppable)
}

/// Read a BMP file and decode it. Read failures surface as [`BmpError::Io`].
#[cfg(feature = "std")]
pub fn decode_from_path(path: impl AsRef<std::path::Path>) -> Result<Raster, BmpError> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    decode_from_bytes(&data)
}
