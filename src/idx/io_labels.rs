//! IDX label file reader and writer.
//!
//! A label file (`*-labels-idx1-ubyte`) is a magic number of `2049`, a
//! big-endian item count, and one unsigned byte per item. Each byte is a
//! class index; the reader widens it to `f64` without changing its value.
//!
//! Reading stops right after the last declared label. Trailing bytes are
//! left in the stream and are not treated as an error.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use super::header::{expect_magic, read_label_header_body, IdxKind, LabelHeader};
use super::primitives::{header_field, read_up_to, write_i32_be};
use super::source::open_source;
use crate::error::{FormatError, IdxError};

/// Decodes a label file from any byte source.
///
/// Pass `&mut reader` to keep using the stream afterwards; it will be
/// positioned immediately after the last label.
///
/// # Errors
/// Returns [`IdxError::Format`] if the magic number is wrong, the header is
/// short, the count is negative, or fewer labels follow than declared.
/// Other read failures surface as [`IdxError::Io`].
///
/// # Example
/// ```
/// use idxload::idx::io_labels::read_labels;
///
/// let bytes: &[u8] = &[0, 0, 8, 1, 0, 0, 0, 2, 7, 9];
/// let labels = read_labels(bytes)?;
/// assert_eq!(labels, vec![7.0, 9.0]);
/// # Ok::<(), idxload::IdxError>(())
/// ```
pub fn read_labels<R: Read>(mut reader: R) -> Result<Vec<f64>, IdxError> {
    expect_magic(&mut reader, IdxKind::Labels)?;
    let header = read_label_header_body(&mut reader)?;
    read_label_items(&mut reader, &header)
}

/// Decodes a label file from disk.
///
/// The file is opened, handed to [`read_labels`], and closed before this
/// returns, whether decoding succeeded or not. Files ending in `.gz` are
/// decompressed first.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use idxload::idx::io_labels::read_labels_file;
///
/// let labels = read_labels_file(Path::new("data/train-labels-idx1-ubyte"))?;
/// # Ok::<(), idxload::IdxError>(())
/// ```
pub fn read_labels_file(path: &Path) -> Result<Vec<f64>, IdxError> {
    let source = open_source(path)?;
    let labels = read_labels(source).map_err(|err| err.at_path(path))?;
    log::info!("decoded {} label(s) from {}", labels.len(), path.display());
    Ok(labels)
}

/// Decodes a label file held in memory.
///
/// Useful for fuzzing and for tests without file I/O.
pub fn from_labels_slice(bytes: &[u8]) -> Result<Vec<f64>, IdxError> {
    read_labels(bytes)
}

/// Reads the label records once the header is known.
pub(crate) fn read_label_items<R: Read>(
    reader: &mut R,
    header: &LabelHeader,
) -> Result<Vec<f64>, IdxError> {
    log::debug!("label header: {} item(s)", header.item_count);

    let mut raw = Vec::new();
    let read = read_up_to(reader, header.item_count, &mut raw, |index| {
        FormatError::Label { index }
    })?;
    if read < header.item_count {
        return Err(FormatError::Label { index: read }.into());
    }

    Ok(raw.into_iter().map(f64::from).collect())
}

/// Encodes labels as an IDX label file.
///
/// # Errors
/// Fails if there are more than `i32::MAX` labels or the writer fails.
pub fn write_labels<W: Write>(mut writer: W, labels: &[u8]) -> Result<(), IdxError> {
    let count = header_field("item count", labels.len())?;

    write_i32_be(&mut writer, IdxKind::Labels.magic())?;
    write_i32_be(&mut writer, count)?;
    writer.write_all(labels)?;
    writer.flush()?;
    Ok(())
}

/// Encodes labels into a new file at `path`.
pub fn write_labels_file(path: &Path, labels: &[u8]) -> Result<(), IdxError> {
    let file = File::create(path).map_err(IdxError::Io)?;
    write_labels(BufWriter::new(file), labels)
}

/// Encodes labels into an in-memory buffer.
pub fn to_labels_bytes(labels: &[u8]) -> Result<Vec<u8>, IdxError> {
    let mut bytes = Vec::with_capacity(8 + labels.len());
    write_labels(&mut bytes, labels)?;
    Ok(bytes)
}
