use crate::error::BmpError;

/// Caps on the raster a decode is allowed to produce.
///
/// All fields default to `None` (no limit). They are checked right after the
/// DIB header is parsed, before the palette or any pixel data is touched.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the output raster in bytes (3 per pixel).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub(crate) fn check_raster(&self, width: u32, height: u32) -> Result<(), BmpError> {
        let pixels = u64::from(width).saturating_mul(u64::from(height));
        let bytes = pixels.saturating_mul(3);

        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds("pixel count", pixels, self.max_pixels)?;
        exceeds("raster size in bytes", bytes, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), BmpError> {
    match limit {
        Some(max) if value > max => Err(BmpError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
