//! IDX file inspection and statistics.
//!
//! Inspection sniffs the magic number, decodes the file with the matching
//! reader, and summarises what came out: item counts and dimensions, a
//! label histogram for label files, and pixel statistics for image files.

mod report;

pub use report::{Dimensions, InspectReport, LabelCount, LabelsSection, PixelStats};

use std::io::Read;
use std::path::Path;

use crate::error::IdxError;
use crate::idx::io_images::read_image_items;
use crate::idx::io_labels::read_label_items;
use crate::idx::{
    detect_kind, open_source, read_image_header_body, read_label_header_body, DecodeOptions,
    IdxKind, ImageSet,
};

/// Options for file inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Number of top labels to show in the histogram.
    pub top_labels: usize,
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
    /// Limits applied while decoding image files.
    pub decode: DecodeOptions,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            top_labels: 10,
            bar_width: 20,
            decode: DecodeOptions::default(),
        }
    }
}

/// Inspect an IDX file of either kind.
pub fn inspect_file(path: &Path, opts: &InspectOptions) -> Result<InspectReport, IdxError> {
    let source = open_source(path)?;
    inspect_reader(source, opts).map_err(|err| err.at_path(path))
}

/// Inspect an IDX stream of either kind.
pub fn inspect_reader<R: Read>(
    mut reader: R,
    opts: &InspectOptions,
) -> Result<InspectReport, IdxError> {
    match detect_kind(&mut reader)? {
        IdxKind::Labels => {
            let header = read_label_header_body(&mut reader)?;
            let labels = read_label_items(&mut reader, &header)?;
            Ok(inspect_labels(&labels, opts))
        }
        IdxKind::Images => {
            let header = read_image_header_body(&mut reader, &opts.decode)?;
            let set = read_image_items(&mut reader, &header)?;
            Ok(inspect_images(&set, opts))
        }
    }
}

/// Summarise decoded labels.
pub fn inspect_labels(labels: &[f64], opts: &InspectOptions) -> InspectReport {
    InspectReport {
        kind: IdxKind::Labels,
        item_count: labels.len(),
        dimensions: None,
        labels: Some(compute_labels(labels, opts.top_labels)),
        pixels: None,
        bar_width: opts.bar_width,
    }
}

/// Summarise decoded images.
pub fn inspect_images(set: &ImageSet, opts: &InspectOptions) -> InspectReport {
    InspectReport {
        kind: IdxKind::Images,
        item_count: set.len(),
        dimensions: Some(Dimensions {
            rows: set.rows,
            cols: set.cols,
        }),
        labels: None,
        pixels: compute_pixel_stats(set),
        bar_width: opts.bar_width,
    }
}

/// Compute label distribution histogram.
///
/// Decoded labels are always whole numbers in `0..=255`. Any other value
/// (possible when a caller passes its own slice) is tallied in `skipped`
/// rather than folded into a byte bucket.
fn compute_labels(labels: &[f64], top_n: usize) -> LabelsSection {
    let mut counts = [0usize; 256];
    let mut skipped = 0usize;
    for &label in labels {
        match label_byte(label) {
            Some(byte) => counts[usize::from(byte)] += 1,
            None => skipped += 1,
        }
    }

    // Sort by count descending, then by label ascending for deterministic output
    let mut sorted: Vec<(u8, usize)> = counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(label, &count)| (label as u8, count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let total_distinct = sorted.len();
    let other_count = sorted.iter().skip(top_n).map(|(_, count)| count).sum();
    let entries = sorted
        .into_iter()
        .take(top_n)
        .map(|(label, count)| LabelCount { label, count })
        .collect();

    LabelsSection {
        top_n,
        total_distinct,
        total_labels: labels.len() - skipped,
        entries,
        other_count,
        skipped,
    }
}

/// The byte a label value stands for, if it is one.
fn label_byte(label: f64) -> Option<u8> {
    if label.fract() == 0.0 && (0.0..=255.0).contains(&label) {
        Some(label as u8)
    } else {
        None
    }
}

/// Compute pixel statistics. `None` when there are no images.
fn compute_pixel_stats(set: &ImageSet) -> Option<PixelStats> {
    let total = set.len() * set.image_len();
    if total == 0 {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut nonzero = 0usize;

    for &pixel in set.images.iter().flatten() {
        min = min.min(pixel);
        max = max.max(pixel);
        sum += pixel;
        if pixel != 0.0 {
            nonzero += 1;
        }
    }

    Some(PixelStats {
        total,
        min,
        max,
        mean: sum / total as f64,
        nonzero,
    })
}
