#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = zenbmp::Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    let decoded = zenbmp::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);

    // Anything that decodes must probe to the same geometry
    if let Ok(raster) = decoded {
        let info = zenbmp::BmpInfo::from_bytes(data).expect("probe failed on decodable input");
        assert_eq!((info.width, info.height), (raster.width(), raster.height()));
        assert_eq!(raster.pixels().len(), info.width as usize * info.height as usize);
    }
});
