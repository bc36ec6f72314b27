//! Fuzz target for IDX image decoding.
//!
//! Headers may declare any count and dimensions; the decoder has to reject
//! them without panicking or reserving memory the input cannot back.
//!
//! Run with:
//!   cargo +nightly fuzz run idx_images_parse

#![no_main]

use idxload::idx::io_images::read_images_with;
use idxload::idx::DecodeOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Keep single images small so libFuzzer's RSS limit is not the thing
    // being tested.
    let opts = DecodeOptions {
        max_image_pixels: 1 << 16,
    };
    let _ = read_images_with(data, &opts);
});
