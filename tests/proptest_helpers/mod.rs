#![allow(dead_code)]

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A synthetic image dataset: dimensions plus row-major pixel records.
#[derive(Clone, Debug)]
pub struct SynthImages {
    pub rows: usize,
    pub cols: usize,
    pub images: Vec<Vec<u8>>,
}

impl SynthImages {
    pub fn widened(&self) -> Vec<Vec<f64>> {
        self.images
            .iter()
            .map(|img| img.iter().map(|&p| p as f64).collect())
            .collect()
    }
}

pub fn arb_labels(max_len: usize) -> BoxedStrategy<Vec<u8>> {
    vec(any::<u8>(), 0..=max_len).boxed()
}

pub fn arb_images(max_dim: usize, max_images: usize) -> BoxedStrategy<SynthImages> {
    (1..=max_dim, 1..=max_dim)
        .prop_flat_map(move |(rows, cols)| {
            vec(vec(any::<u8>(), rows * cols), 0..=max_images)
                .prop_map(move |images| SynthImages { rows, cols, images })
        })
        .boxed()
}
