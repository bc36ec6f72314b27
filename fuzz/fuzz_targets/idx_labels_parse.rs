//! Fuzz target for IDX label decoding.
//!
//! This fuzzer feeds arbitrary byte sequences to the label decoder,
//! checking for panics, oversized allocations, or hangs.
//!
//! Run with:
//!   cargo +nightly fuzz run idx_labels_parse

#![no_main]

use idxload::idx::io_labels::from_labels_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // A declared count past the input length must fail, never allocate
    // for the declared size.
    let _ = from_labels_slice(data);
});
