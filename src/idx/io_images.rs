//! IDX image file reader and writer.
//!
//! An image file (`*-images-idx3-ubyte`) is a magic number of `2051`, a
//! big-endian item count, row and column counts, then `count` records of
//! `rows * cols` unsigned bytes. Each record is one grayscale image in
//! row-major order.
//!
//! # Hardening
//!
//! Headers are not trusted for allocation size. `rows * cols` is checked
//! against [`DecodeOptions::max_image_pixels`], and the output vector is
//! only preallocated up to a fixed bound, so a corrupt count cannot
//! reserve gigabytes before any pixel data has been seen.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use super::header::{expect_magic, read_image_header_body, DecodeOptions, IdxKind, ImageHeader};
use super::model::ImageSet;
use super::primitives::{header_field, read_exact_bytes, write_i32_be};
use super::source::open_source;
use crate::error::{FormatError, IdxError};

/// Upper bound on images reserved up front.
const PREALLOC_IMAGES: usize = 1 << 16;

/// Decodes an image file from any byte source with default options.
///
/// # Errors
/// Returns [`IdxError::Format`] if the magic number is wrong, the header is
/// short or invalid, or any image record is incomplete. No partial
/// [`ImageSet`] is ever returned.
///
/// # Example
/// ```
/// use idxload::idx::io_images::{read_images, to_images_bytes};
///
/// let bytes = to_images_bytes(2, 2, &[vec![0, 64, 128, 255]])?;
/// let set = read_images(bytes.as_slice())?;
/// assert_eq!(set.pixel(0, 1, 0), Some(128.0));
/// # Ok::<(), idxload::IdxError>(())
/// ```
pub fn read_images<R: Read>(reader: R) -> Result<ImageSet, IdxError> {
    read_images_with(reader, &DecodeOptions::default())
}

/// Decodes an image file from any byte source.
pub fn read_images_with<R: Read>(mut reader: R, opts: &DecodeOptions) -> Result<ImageSet, IdxError> {
    expect_magic(&mut reader, IdxKind::Images)?;
    let header = read_image_header_body(&mut reader, opts)?;
    read_image_items(&mut reader, &header)
}

/// Decodes an image file from disk with default options.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use idxload::idx::io_images::read_images_file;
///
/// let set = read_images_file(Path::new("data/train-images-idx3-ubyte.gz"))?;
/// println!("{} images of {}x{}", set.len(), set.rows, set.cols);
/// # Ok::<(), idxload::IdxError>(())
/// ```
pub fn read_images_file(path: &Path) -> Result<ImageSet, IdxError> {
    read_images_file_with(path, &DecodeOptions::default())
}

/// Decodes an image file from disk.
///
/// The file handle lives only for the duration of the call and is closed
/// on both the success and the error path.
pub fn read_images_file_with(path: &Path, opts: &DecodeOptions) -> Result<ImageSet, IdxError> {
    let source = open_source(path)?;
    let set = read_images_with(source, opts).map_err(|err| err.at_path(path))?;
    log::info!(
        "decoded {} image(s) of {}x{} from {}",
        set.len(),
        set.rows,
        set.cols,
        path.display()
    );
    Ok(set)
}

/// Decodes an image file held in memory.
///
/// Useful for fuzzing and for tests without file I/O.
pub fn from_images_slice(bytes: &[u8]) -> Result<ImageSet, IdxError> {
    read_images(bytes)
}

/// Reads the image records once the header is known.
pub(crate) fn read_image_items<R: Read>(
    reader: &mut R,
    header: &ImageHeader,
) -> Result<ImageSet, IdxError> {
    log::debug!(
        "image header: {} item(s) of {}x{}",
        header.item_count,
        header.rows,
        header.cols
    );

    let mut images = Vec::with_capacity(header.item_count.min(PREALLOC_IMAGES));
    if header.item_count == 0 {
        return Ok(ImageSet {
            rows: header.rows,
            cols: header.cols,
            images,
        });
    }

    let mut record = vec![0u8; header.image_len()];
    for index in 0..header.item_count {
        read_exact_bytes(reader, &mut record, FormatError::Image { index })?;
        images.push(record.iter().copied().map(f64::from).collect());
    }

    Ok(ImageSet {
        rows: header.rows,
        cols: header.cols,
        images,
    })
}

/// Encodes images as an IDX image file.
///
/// Every image must hold exactly `rows * cols` row-major pixels.
///
/// # Errors
/// Fails on a wrong pixel count, on dimensions or counts past `i32::MAX`,
/// or if the writer fails.
pub fn write_images<W: Write>(
    mut writer: W,
    rows: usize,
    cols: usize,
    images: &[Vec<u8>],
) -> Result<(), IdxError> {
    let count = header_field("item count", images.len())?;
    let rows_field = header_field("rows", rows)?;
    let cols_field = header_field("cols", cols)?;
    if rows == 0 || cols == 0 {
        return Err(FormatError::InvalidDimensions {
            rows: rows_field,
            cols: cols_field,
        }
        .into());
    }

    let image_len = rows * cols;
    if let Some((index, image)) = images
        .iter()
        .enumerate()
        .find(|(_, image)| image.len() != image_len)
    {
        return Err(FormatError::PixelCount {
            index,
            expected: image_len,
            found: image.len(),
        }
        .into());
    }

    write_i32_be(&mut writer, IdxKind::Images.magic())?;
    write_i32_be(&mut writer, count)?;
    write_i32_be(&mut writer, rows_field)?;
    write_i32_be(&mut writer, cols_field)?;
    for image in images {
        writer.write_all(image)?;
    }
    writer.flush()?;
    Ok(())
}

/// Encodes images into a new file at `path`.
pub fn write_images_file(
    path: &Path,
    rows: usize,
    cols: usize,
    images: &[Vec<u8>],
) -> Result<(), IdxError> {
    let file = File::create(path).map_err(IdxError::Io)?;
    write_images(BufWriter::new(file), rows, cols, images)
}

/// Encodes images into an in-memory buffer.
pub fn to_images_bytes(rows: usize, cols: usize, images: &[Vec<u8>]) -> Result<Vec<u8>, IdxError> {
    let mut bytes = Vec::new();
    write_images(&mut bytes, rows, cols, images)?;
    Ok(bytes)
}
