#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, palette: &[u32], pixels: &[u8]) -> Vec<u8> {
    let offset = 54 + palette.len() * 4;
    let file_size = offset + pixels.len();
    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
    out.resize(54, 0);
    for entry in palette {
        out.extend_from_slice(&entry.to_le_bytes());
    }
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_probe"] {
        fs::create_dir_all(dir).unwrap();

        // 1x1 24-bit
        fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp(1, 1, 24, &[], &[0xff, 0, 0, 0])).unwrap();

        // 3x2 24-bit with padding
        let rows = [[1u8, 2, 3, 4, 5, 6, 7, 8, 9, 0, 0, 0]; 2].concat();
        fs::write(format!("{dir}/bmp24_3x2.bmp"), bmp(3, 2, 24, &[], &rows)).unwrap();

        // 8x2 1-bit
        let mono = bmp(8, 2, 1, &[0, 0x00ff_ffff], &[0b1011_0000, 0, 0, 0, 0x0f, 0, 0, 0]);
        fs::write(format!("{dir}/bmp1_8x2.bmp"), mono).unwrap();

        // 3x1 4-bit
        let ramp: Vec<u32> = (0..16u32).map(|i| (i * 17) * 0x0001_0101).collect();
        fs::write(format!("{dir}/bmp4_3x1.bmp"), bmp(3, 1, 4, &ramp, &[0xa5, 0xf0, 0, 0])).unwrap();

        // 2x2 8-bit
        let gray: Vec<u32> = (0..256u32).map(|i| i * 0x0001_0101).collect();
        let pixels = [0u8, 128, 0, 0, 255, 64, 0, 0];
        fs::write(format!("{dir}/bmp8_2x2.bmp"), bmp(2, 2, 8, &gray, &pixels)).unwrap();

        // 2x1 16-bit
        fs::write(format!("{dir}/bmp16_2x1.bmp"), bmp(2, 1, 16, &[], &[0x12, 0x34, 0xab, 0xcd])).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
        fs::write(format!("{dir}/headers_only.bmp"), &bmp(4, 4, 24, &[], &[])[..54]).unwrap();
    }

    println!("Generated seed corpus in fuzz/corpus/");
}
