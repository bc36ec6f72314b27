//! IDX header types and the header readers shared by both codecs.

use std::fmt;
use std::io::Read;

use serde::Serialize;

use super::primitives::read_i32_be;
use crate::error::{FormatError, IdxError};

/// Which kind of IDX file a stream holds, identified by its magic number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdxKind {
    /// `idx1-ubyte`: one unsigned byte per item.
    Labels,
    /// `idx3-ubyte`: `rows x cols` unsigned bytes per item.
    Images,
}

impl IdxKind {
    pub const LABELS_MAGIC: i32 = 2049;
    pub const IMAGES_MAGIC: i32 = 2051;

    pub fn magic(self) -> i32 {
        match self {
            IdxKind::Labels => Self::LABELS_MAGIC,
            IdxKind::Images => Self::IMAGES_MAGIC,
        }
    }

    pub fn from_magic(magic: i32) -> Option<Self> {
        match magic {
            Self::LABELS_MAGIC => Some(IdxKind::Labels),
            Self::IMAGES_MAGIC => Some(IdxKind::Images),
            _ => None,
        }
    }
}

impl fmt::Display for IdxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdxKind::Labels => write!(f, "labels"),
            IdxKind::Images => write!(f, "images"),
        }
    }
}

/// Default cap on `rows * cols` for a single image (4096 x 4096).
pub const DEFAULT_MAX_IMAGE_PIXELS: usize = 4096 * 4096;

/// Options for image decoding.
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Largest accepted `rows * cols`. Headers above this fail before any
    /// pixel buffer is allocated.
    pub max_image_pixels: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_image_pixels: DEFAULT_MAX_IMAGE_PIXELS,
        }
    }
}

/// Header of a label file, after the magic number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelHeader {
    pub item_count: usize,
}

impl LabelHeader {
    /// Reads and checks a complete label header, magic included.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, IdxError> {
        expect_magic(reader, IdxKind::Labels)?;
        read_label_header_body(reader)
    }
}

/// Header of an image file, after the magic number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageHeader {
    pub item_count: usize,
    pub rows: usize,
    pub cols: usize,
}

impl ImageHeader {
    /// Reads and checks a complete image header, magic included.
    pub fn read<R: Read>(reader: &mut R, opts: &DecodeOptions) -> Result<Self, IdxError> {
        expect_magic(reader, IdxKind::Images)?;
        read_image_header_body(reader, opts)
    }

    /// Pixels per image.
    pub fn image_len(&self) -> usize {
        self.rows * self.cols
    }
}

/// Reads the magic number and checks it against `kind`.
pub(crate) fn expect_magic<R: Read>(reader: &mut R, kind: IdxKind) -> Result<(), IdxError> {
    let found = read_magic(reader)?;
    if found != kind.magic() {
        return Err(FormatError::BadMagic {
            expected: kind.magic(),
            found,
        }
        .into());
    }
    Ok(())
}

/// Reads the magic number and reports which kind of file follows.
///
/// The stream is left just past the magic, so the matching `*_body`
/// reader can continue from there.
pub fn detect_kind<R: Read>(reader: &mut R) -> Result<IdxKind, IdxError> {
    let magic = read_magic(reader)?;
    IdxKind::from_magic(magic).ok_or_else(|| FormatError::UnknownMagic(magic).into())
}

fn read_magic<R: Read>(reader: &mut R) -> Result<i32, IdxError> {
    read_i32_be(reader, FormatError::MissingMagic)
}

fn read_item_count<R: Read>(reader: &mut R) -> Result<usize, IdxError> {
    let count = read_i32_be(reader, FormatError::ItemCount)?;
    usize::try_from(count).map_err(|_| FormatError::NegativeItemCount(count).into())
}

pub(crate) fn read_label_header_body<R: Read>(reader: &mut R) -> Result<LabelHeader, IdxError> {
    let item_count = read_item_count(reader)?;
    Ok(LabelHeader { item_count })
}

pub(crate) fn read_image_header_body<R: Read>(
    reader: &mut R,
    opts: &DecodeOptions,
) -> Result<ImageHeader, IdxError> {
    let item_count = read_item_count(reader)?;
    let rows = read_i32_be(reader, FormatError::Dimensions)?;
    let cols = read_i32_be(reader, FormatError::Dimensions)?;

    if rows <= 0 || cols <= 0 {
        return Err(FormatError::InvalidDimensions { rows, cols }.into());
    }

    let too_large = FormatError::ImageTooLarge {
        rows,
        cols,
        limit: opts.max_image_pixels,
    };
    let pixels = (rows as usize)
        .checked_mul(cols as usize)
        .ok_or_else(|| too_large.clone())?;
    if pixels > opts.max_image_pixels {
        return Err(too_large.into());
    }

    Ok(ImageHeader {
        item_count,
        rows: rows as usize,
        cols: cols as usize,
    })
}
