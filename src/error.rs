use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed or unencodable IDX data.
///
/// Each variant names one way a stream can fail to be a valid IDX file.
/// Display strings start with a stable cause ("bad magic number",
/// "cannot read item count", ...) so callers can match on text if they
/// must, but matching on the variant is preferred.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("bad magic number (expected {expected}, found {found})")]
    BadMagic { expected: i32, found: i32 },

    #[error("bad magic number (stream ended early)")]
    MissingMagic,

    #[error("unrecognized magic number {0}")]
    UnknownMagic(i32),

    #[error("cannot read item count")]
    ItemCount,

    #[error("negative item count {0}")]
    NegativeItemCount(i32),

    #[error("cannot read dimensions")]
    Dimensions,

    #[error("invalid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },

    #[error("image of {rows}x{cols} pixels exceeds the limit of {limit} pixels")]
    ImageTooLarge { rows: i32, cols: i32, limit: usize },

    #[error("cannot read label at index {index}")]
    Label { index: usize },

    #[error("cannot read image at index {index}")]
    Image { index: usize },

    #[error("image at index {index} has {found} pixel(s), expected {expected}")]
    PixelCount {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{what} {value} does not fit in a 32-bit header field")]
    HeaderOverflow { what: &'static str, value: usize },
}

/// The main error type for idxload operations.
#[derive(Debug, Error)]
pub enum IdxError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("Label/image count mismatch: {labels} label(s) but {images} image(s)")]
    CountMismatch { labels: usize, images: usize },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to write report JSON: {0}")]
    ReportJson(#[source] serde_json::Error),
}

impl IdxError {
    /// The format error behind this error, whether it came from a stream
    /// or a path-based decode.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            IdxError::Format(err) | IdxError::Decode { source: err, .. } => Some(err),
            _ => None,
        }
    }

    /// Attach a file path to a format error. Other variants pass through.
    pub(crate) fn at_path(self, path: &std::path::Path) -> Self {
        match self {
            IdxError::Format(source) => IdxError::Decode {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}
