use rgb::RGB8;

/// Unpack a `0x00RRGGBB` color code into an RGB triple. The high byte is ignored.
#[inline]
pub fn rgb_from_code(code: u32) -> RGB8 {
    RGB8::new((code >> 16) as u8, (code >> 8) as u8, code as u8)
}

/// Pack an RGB triple into a `0x00RRGGBB` color code.
///
/// This is the value a 24-bit BMP pixel (stored B, G, R) has when read as a
/// little-endian integer with a zero high byte.
#[inline]
pub fn code_from_rgb(px: RGB8) -> u32 {
    u32::from(px.r) << 16 | u32::from(px.g) << 8 | u32::from(px.b)
}
