#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the header claims
    let limits = zenbmp::Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    for mode in [zenbmp::Bpp16Mode::Direct, zenbmp::Bpp16Mode::PaletteLookup] {
        let _ = zenbmp::DecodeRequest::new(data)
            .with_limits(&limits)
            .with_bpp16_mode(mode)
            .decode(enough::Unstoppable);
    }
});
