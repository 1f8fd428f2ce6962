use enough::Stop;

use crate::error::BmpError;
use crate::limits::Limits;
use crate::raster::Raster;

/// How 16-bit pixels are turned into colors.
///
/// [`PaletteLookup`](Self::PaletteLookup) is the mode that matches the
/// reference output for 16-bit files laid out with a 65 536-entry table.
/// [`Direct`](Self::Direct) is the default since it needs no 256 KiB table in
/// front of the pixels, and real 16-bit files do not carry one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Bpp16Mode {
    /// The big-endian 16-bit value is the `0x00RRGGBB` color code itself, so its
    /// high byte lands in green and its low byte in blue. No palette is read.
    #[default]
    Direct,
    /// Read a 65 536-entry color table after the DIB header, like the 8-bit
    /// and lower depths do, and look every big-endian 16-bit value up in it.
    PaletteLookup,
}

/// Builder for a decode with limits, 16-bit handling, and cancellation.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits {
///     max_pixels: Some(16_000_000),
///     ..Default::default()
/// };
/// let raster = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{}", raster.width(), raster.height());
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    bpp16: Bpp16Mode,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            bpp16: Bpp16Mode::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_bpp16_mode(mut self, mode: Bpp16Mode) -> Self {
        self.bpp16 = mode;
        self
    }

    /// Run the whole pipeline. `stop` is polled between stages and every 16 rows.
    pub fn decode(self, stop: impl Stop) -> Result<Raster, BmpError> {
        crate::bmp::decode(self.data, self.limits, self.bpp16, &stop)
    }
}
