//! In-memory result of decoding an image file.

/// A decoded image file: `len()` images of `rows * cols` pixels each.
///
/// Pixels are stored row-major, so pixel `(r, c)` of an image sits at
/// index `r * cols + c`. Every image has the same length; the decoder
/// never produces a partial image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageSet {
    pub rows: usize,
    pub cols: usize,
    pub images: Vec<Vec<f64>>,
}

impl ImageSet {
    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Pixels per image.
    pub fn image_len(&self) -> usize {
        self.rows * self.cols
    }

    /// The flat pixels of image `index`.
    pub fn image(&self, index: usize) -> Option<&[f64]> {
        self.images.get(index).map(Vec::as_slice)
    }

    /// Pixel at `(row, col)` of image `index`.
    pub fn pixel(&self, index: usize, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.image(index)?.get(row * self.cols + col).copied()
    }

    /// Drops the dimensions and returns the bare pixel rows.
    pub fn into_images(self) -> Vec<Vec<f64>> {
        self.images
    }
}
