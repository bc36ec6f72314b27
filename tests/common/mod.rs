#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Raw label file bytes with an arbitrary header, for malformed-input tests.
pub fn label_file_bytes(magic: i32, count: i32, labels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + labels.len());
    bytes.extend_from_slice(&magic.to_be_bytes());
    bytes.extend_from_slice(&count.to_be_bytes());
    bytes.extend_from_slice(labels);
    bytes
}

/// Raw image file bytes with an arbitrary header, for malformed-input tests.
pub fn image_file_bytes(magic: i32, count: i32, rows: i32, cols: i32, pixels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(16 + pixels.len());
    for field in [magic, count, rows, cols] {
        bytes.extend_from_slice(&field.to_be_bytes());
    }
    bytes.extend_from_slice(pixels);
    bytes
}

pub fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bytes).expect("write idx file");
}

pub fn gz_bytes(bytes: &[u8]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("compress idx bytes");
    encoder.finish().expect("finish gzip")
}

pub fn write_gz_file(path: &Path, bytes: &[u8]) {
    write_file(path, &gz_bytes(bytes));
}

/// Bytes that deflate cannot shrink much, so a cut in the compressed
/// stream lands well inside the record data.
pub fn noisy_bytes(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_f491;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

pub fn widen(bytes: &[u8]) -> Vec<f64> {
    bytes.iter().map(|&b| b as f64).collect()
}
