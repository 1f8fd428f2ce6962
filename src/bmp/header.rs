//! BITMAPFILEHEADER and BITMAPINFOHEADER parsing.
//!
//! Both headers are fixed little-endian layouts:
//!
//! ```text
//! file header (14 bytes)        DIB header (40 bytes)
//!  0  u16 signature "BM"          0  u32 header size
//!  2  u32 file size               4  i32 width
//!  6  u32 reserved                8  i32 height
//! 10  u32 pixel data offset      12  u16 color planes
//!                                14  u16 bits per pixel
//!                                16  u32 compression
//!                                20  u32 bitmap size
//!                                24  u32 horizontal resolution
//!                                28  u32 vertical resolution
//!                                32  u32 colors used
//!                                36  u32 colors important
//! ```

use log::{debug, trace};

use super::utils::{fixed, le_i32, le_u16, le_u32};
use crate::error::BmpError;

pub const FILE_HEADER_LEN: usize = 14;
pub const DIB_HEADER_LEN: usize = 40;

/// `"BM"` read as a little-endian u16.
pub const SIGNATURE: u16 = 0x4D42;

/// The 14-byte file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: u16,
    pub file_size: u32,
    pub reserved: u32,
    pub pixel_data_offset: u32,
}

/// Supported pixel depths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    One,
    Four,
    Eight,
    Sixteen,
    TwentyFour,
}

impl BitDepth {
    fn from_bpp(bpp: u16) -> Option<Self> {
        match bpp {
            1 => Some(Self::One),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            16 => Some(Self::Sixteen),
            24 => Some(Self::TwentyFour),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Four => 4,
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::TwentyFour => 24,
        }
    }

    /// Whether pixels are palette indices.
    pub fn is_indexed(self) -> bool {
        self.bits() <= 8
    }
}

/// The 40-byte BITMAPINFOHEADER plus the values derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DibHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub color_planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Size of the pixel data in bytes. A zero in the file is replaced with
    /// `file_size - pixel_data_offset`.
    pub bitmap_size: u32,
    /// The file stored zero and `bitmap_size` was derived.
    pub bitmap_size_derived: bool,
    pub h_res: u32,
    pub v_res: u32,
    pub colors_used: u32,
    pub colors_important: u32,

    pub depth: BitDepth,
    /// `2^bits_per_pixel`. Only a palette size for indexed depths.
    pub colors: u32,
    /// Gap after each scanline up to the next 4-byte boundary, in bits.
    ///
    /// Expressed in bytes this is `4 - 4 * frac(width * bpp / 8 / 4)`, which is
    /// fractional for sub-byte depths; bits keep it exact.
    pub row_padding_bits: u32,
}

impl DibHeader {
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Bits of real pixel data in one scanline.
    pub fn row_bits(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.depth.bits())
    }

    /// Bytes from the start of one scanline to the next.
    pub fn row_stride(&self) -> u64 {
        (self.row_bits() + u64::from(self.row_padding_bits)) / 8
    }
}

/// Parse the file header at `offset`, returning it and the offset just past it.
pub fn parse_file_header(data: &[u8], offset: usize) -> Result<(FileHeader, usize), BmpError> {
    let magic = data.get(offset..).unwrap_or_default();
    if magic.iter().zip(b"BM").any(|(have, want)| have != want) {
        return Err(BmpError::InvalidFormat("missing \"BM\" signature".into()));
    }

    let block = fixed::<FILE_HEADER_LEN>(data, offset)?;
    let header = FileHeader {
        signature: le_u16(block, 0),
        file_size: le_u32(block, 2),
        reserved: le_u32(block, 6),
        pixel_data_offset: le_u32(block, 10),
    };

    trace!(
        "BMP file header: size {}, pixel data at {}",
        header.file_size, header.pixel_data_offset
    );
    Ok((header, offset + FILE_HEADER_LEN))
}

/// Parse the DIB header at `offset`, returning it and the offset where the
/// palette starts.
///
/// Headers larger than 40 bytes (V2 through V5) are accepted: only the leading
/// BITMAPINFOHEADER fields are read and the rest is skipped.
pub fn parse_dib_header(
    data: &[u8],
    offset: usize,
    file: &FileHeader,
) -> Result<(DibHeader, usize), BmpError> {
    let block = fixed::<DIB_HEADER_LEN>(data, offset)?;

    let header_size = le_u32(block, 0);
    let width = le_i32(block, 4);
    let height = le_i32(block, 8);
    let color_planes = le_u16(block, 12);
    let bits_per_pixel = le_u16(block, 14);
    let compression = le_u32(block, 16);
    let mut bitmap_size = le_u32(block, 20);

    if (header_size as usize) < DIB_HEADER_LEN {
        return Err(BmpError::UnsupportedFormat(alloc::format!(
            "DIB header size {header_size} (OS/2 core headers are not supported)"
        )));
    }
    let depth = BitDepth::from_bpp(bits_per_pixel).ok_or_else(|| {
        BmpError::UnsupportedFormat(alloc::format!("{bits_per_pixel} bits per pixel"))
    })?;
    if compression != 0 {
        return Err(BmpError::UnsupportedFormat(alloc::format!(
            "compression type {compression}"
        )));
    }
    if width <= 0 {
        return Err(BmpError::InvalidFormat(alloc::format!("width {width}")));
    }
    if height == 0 {
        return Err(BmpError::InvalidFormat("height is zero".into()));
    }
    if height < 0 {
        return Err(BmpError::UnsupportedFormat(
            "top-down row order (negative height)".into(),
        ));
    }

    let bitmap_size_derived = bitmap_size == 0;
    if bitmap_size_derived {
        bitmap_size = file.file_size.saturating_sub(file.pixel_data_offset);
    }

    let row_bits = u64::from(width as u32) * u64::from(depth.bits());
    let row_padding_bits = ((32 - row_bits % 32) % 32) as u32;

    let header = DibHeader {
        header_size,
        width,
        height,
        color_planes,
        bits_per_pixel,
        compression,
        bitmap_size,
        bitmap_size_derived,
        h_res: le_u32(block, 24),
        v_res: le_u32(block, 28),
        colors_used: le_u32(block, 32),
        colors_important: le_u32(block, 36),
        depth,
        colors: 1 << depth.bits(),
        row_padding_bits,
    };

    let next = offset.saturating_add(header_size as usize);
    if next > data.len() {
        return Err(BmpError::truncated(offset, header_size as usize, data.len()));
    }

    debug!(
        "BMP {}x{} at {} bpp, {} bytes of pixel data, {} padding bits per row",
        width, height, bits_per_pixel, bitmap_size, row_padding_bits
    );
    Ok((header, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_header(file_size: u32, offset: u32) -> [u8; 14] {
        let mut b = [0u8; 14];
        b[0..2].copy_from_slice(b"BM");
        b[2..6].copy_from_slice(&file_size.to_le_bytes());
        b[10..14].copy_from_slice(&offset.to_le_bytes());
        b
    }

    fn dib(width: i32, height: i32, bpp: u16, compression: u32, bitmap_size: u32) -> [u8; 40] {
        let mut b = [0u8; 40];
        b[0..4].copy_from_slice(&40u32.to_le_bytes());
        b[4..8].copy_from_slice(&width.to_le_bytes());
        b[8..12].copy_from_slice(&height.to_le_bytes());
        b[12..14].copy_from_slice(&1u16.to_le_bytes());
        b[14..16].copy_from_slice(&bpp.to_le_bytes());
        b[16..20].copy_from_slice(&compression.to_le_bytes());
        b[20..24].copy_from_slice(&bitmap_size.to_le_bytes());
        b
    }

    fn parse_dib(width: i32, height: i32, bpp: u16) -> Result<DibHeader, BmpError> {
        let file = FileHeader {
            signature: SIGNATURE,
            file_size: 0,
            reserved: 0,
            pixel_data_offset: 54,
        };
        parse_dib_header(&dib(width, height, bpp, 0, 0), 0, &file).map(|(h, _)| h)
    }

    #[test]
    fn file_header_fields() {
        let (h, next) = parse_file_header(&file_header(1234, 118), 0).unwrap();
        assert_eq!(h.signature, SIGNATURE);
        assert_eq!(h.file_size, 1234);
        assert_eq!(h.pixel_data_offset, 118);
        assert_eq!(next, 14);
    }

    #[test]
    fn wrong_signature_beats_truncation() {
        assert!(matches!(
            parse_file_header(b"BX", 0),
            Err(BmpError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_file_header(b"P", 0),
            Err(BmpError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_file_header(b"BM\0\0", 0),
            Err(BmpError::TruncatedInput { needed: 14, .. })
        ));
        assert!(matches!(
            parse_file_header(b"", 0),
            Err(BmpError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn zero_bitmap_size_derived_from_file_header() {
        let file = FileHeader {
            signature: SIGNATURE,
            file_size: 70,
            reserved: 0,
            pixel_data_offset: 54,
        };
        let (h, next) = parse_dib_header(&dib(2, 2, 24, 0, 0), 0, &file).unwrap();
        assert_eq!(h.bitmap_size, 16);
        assert!(h.bitmap_size_derived);
        assert_eq!(next, 40);

        let (h, _) = parse_dib_header(&dib(2, 2, 24, 0, 16), 0, &file).unwrap();
        assert!(!h.bitmap_size_derived);

        let bogus = FileHeader {
            file_size: 10,
            ..file
        };
        let (h, _) = parse_dib_header(&dib(2, 2, 24, 0, 0), 0, &bogus).unwrap();
        assert_eq!(h.bitmap_size, 0);
    }

    #[test]
    fn colors_per_depth() {
        assert_eq!(parse_dib(1, 1, 1).unwrap().colors, 2);
        assert_eq!(parse_dib(1, 1, 4).unwrap().colors, 16);
        assert_eq!(parse_dib(1, 1, 8).unwrap().colors, 256);
        assert_eq!(parse_dib(1, 1, 24).unwrap().colors, 1 << 24);
    }

    #[test]
    fn padding_matches_fractional_byte_formula() {
        for bpp in [1u16, 4, 8, 16, 24] {
            for width in 1..=40 {
                let h = parse_dib(width, 1, bpp).unwrap();
                let raw = f64::from(width) * (f64::from(bpp) / 8.0) / 4.0;
                let frac = raw - raw.floor();
                let expected_bytes = if frac == 0.0 { 0.0 } else { 4.0 - 4.0 * frac };
                assert_eq!(
                    f64::from(h.row_padding_bits) / 8.0,
                    expected_bytes,
                    "width {width} at {bpp} bpp"
                );
                assert_eq!(h.row_stride() % 4, 0);
            }
        }
    }

    #[test]
    fn padding_examples() {
        assert_eq!(parse_dib(3, 1, 24).unwrap().row_padding_bits, 24);
        assert_eq!(parse_dib(2, 1, 24).unwrap().row_stride(), 8);
        assert_eq!(parse_dib(3, 1, 1).unwrap().row_padding_bits, 29);
        assert_eq!(parse_dib(32, 1, 1).unwrap().row_padding_bits, 0);
        assert_eq!(parse_dib(5, 1, 4).unwrap().row_stride(), 4);
    }

    #[test]
    fn rejects_unsupported_depths() {
        for bpp in [0u16, 2, 32, 64] {
            assert!(
                matches!(parse_dib(1, 1, bpp), Err(BmpError::UnsupportedFormat(_))),
                "{bpp} bpp"
            );
        }
    }

    #[test]
    fn rejects_compression() {
        let file = FileHeader {
            signature: SIGNATURE,
            file_size: 0,
            reserved: 0,
            pixel_data_offset: 0,
        };
        for compression in [1u32, 2, 3] {
            assert!(matches!(
                parse_dib_header(&dib(1, 1, 8, compression, 0), 0, &file),
                Err(BmpError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(parse_dib(0, 1, 24), Err(BmpError::InvalidFormat(_))));
        assert!(matches!(parse_dib(-4, 1, 24), Err(BmpError::InvalidFormat(_))));
        assert!(matches!(parse_dib(1, 0, 24), Err(BmpError::InvalidFormat(_))));
        assert!(matches!(
            parse_dib(1, -1, 24),
            Err(BmpError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn core_header_rejected() {
        let mut b = dib(1, 1, 24, 0, 0);
        b[0..4].copy_from_slice(&12u32.to_le_bytes());
        let file = FileHeader {
            signature: SIGNATURE,
            file_size: 0,
            reserved: 0,
            pixel_data_offset: 0,
        };
        assert!(matches!(
            parse_dib_header(&b, 0, &file),
            Err(BmpError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn extended_header_is_skipped() {
        let mut b = alloc::vec![0u8; 124];
        b[..40].copy_from_slice(&dib(1, 1, 24, 0, 4));
        b[0..4].copy_from_slice(&124u32.to_le_bytes());
        let file = FileHeader {
            signature: SIGNATURE,
            file_size: 0,
            reserved: 0,
            pixel_data_offset: 0,
        };
        let (_, next) = parse_dib_header(&b, 0, &file).unwrap();
        assert_eq!(next, 124);

        assert!(matches!(
            parse_dib_header(&b[..100], 0, &file),
            Err(BmpError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn short_dib_is_truncation() {
        let file = FileHeader {
            signature: SIGNATURE,
            file_size: 0,
            reserved: 0,
            pixel_data_offset: 0,
        };
        assert!(matches!(
            parse_dib_header(&dib(1, 1, 24, 0, 0)[..39], 0, &file),
            Err(BmpError::TruncatedInput { needed: 40, .. })
        ));
    }
}
