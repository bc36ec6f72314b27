//! Loading MNIST-style directories of paired label and image files.
//!
//! The files can be obtained from <http://yann.lecun.com/exdb/mnist/>.
//! Either the raw `*-ubyte` files or their `.gz` downloads are accepted.

use std::path::{Path, PathBuf};
use std::thread;

use crate::error::IdxError;
use crate::idx::io_images::read_images_file;
use crate::idx::io_labels::read_labels_file;
use crate::idx::ImageSet;

pub const TRAIN_IMAGES: &str = "train-images-idx3-ubyte";
pub const TRAIN_LABELS: &str = "train-labels-idx1-ubyte";
pub const TEST_IMAGES: &str = "t10k-images-idx3-ubyte";
pub const TEST_LABELS: &str = "t10k-labels-idx1-ubyte";

/// Images and their labels, index-aligned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Split {
    pub images: ImageSet,
    pub labels: Vec<f64>,
}

impl Split {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates `(pixels, label)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], f64)> + '_ {
        self.images
            .images
            .iter()
            .map(Vec::as_slice)
            .zip(self.labels.iter().copied())
    }
}

/// The standard MNIST training and test splits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mnist {
    pub train: Split,
    pub test: Split,
}

/// Decodes a label file and an image file as one split.
///
/// The two files are independent, so they are decoded on separate threads.
/// Each thread owns its own file handle for the duration of its decode.
///
/// # Errors
/// Propagates the first decode error (labels before images), or
/// [`IdxError::CountMismatch`] when both decode but disagree on length.
pub fn load_split(labels_path: &Path, images_path: &Path) -> Result<Split, IdxError> {
    let (labels, images) = thread::scope(|scope| {
        let labels = scope.spawn(|| read_labels_file(labels_path));
        let images = read_images_file(images_path);
        (labels.join(), images)
    });

    let labels = match labels {
        Ok(result) => result?,
        Err(panic) => std::panic::resume_unwind(panic),
    };
    let images = images?;

    if labels.len() != images.len() {
        return Err(IdxError::CountMismatch {
            labels: labels.len(),
            images: images.len(),
        });
    }

    Ok(Split { images, labels })
}

/// Loads the training and test splits from `dir`.
pub fn load_dir(dir: &Path) -> Result<Mnist, IdxError> {
    let train = load_split(&resolve(dir, TRAIN_LABELS), &resolve(dir, TRAIN_IMAGES))?;
    let test = load_split(&resolve(dir, TEST_LABELS), &resolve(dir, TEST_IMAGES))?;
    log::info!(
        "loaded MNIST from {}: {} train, {} test",
        dir.display(),
        train.len(),
        test.len()
    );
    Ok(Mnist { train, test })
}

/// Picks `name` or `name.gz` inside `dir`, preferring the uncompressed file.
fn resolve(dir: &Path, name: &str) -> PathBuf {
    let plain = dir.join(name);
    if plain.is_file() {
        return plain;
    }
    let gz = dir.join(format!("{name}.gz"));
    if gz.is_file() {
        gz
    } else {
        plain
    }
}
