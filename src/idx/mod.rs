//! Readers and writers for the IDX binary format.
//!
//! IDX is the container used by the MNIST family of datasets. A file is a
//! big-endian header followed by fixed-width unsigned byte records:
//!
//! | Offset | Labels (`2049`)      | Images (`2051`)                  |
//! |--------|----------------------|----------------------------------|
//! | 0      | magic                | magic                            |
//! | 4      | item count           | item count                       |
//! | 8      | `count` x u8 labels  | rows                             |
//! | 12     |                      | cols                             |
//! | 16     |                      | `count` x `rows*cols` u8 pixels  |
//!
//! Decoders accept any [`std::io::Read`], not just files. The `*_file`
//! variants open the path, delegate to the stream decoder, and drop the
//! handle before returning on every path.
//!
//! Values are widened to `f64` unchanged. No normalization happens here;
//! dividing by 255 is a concern of whatever consumes the arrays.
//!
//! # Example
//!
//! ```
//! use idxload::idx::io_labels::{from_labels_slice, to_labels_bytes};
//!
//! let bytes = to_labels_bytes(&[3, 1, 4])?;
//! let labels = from_labels_slice(&bytes)?;
//! assert_eq!(labels, vec![3.0, 1.0, 4.0]);
//! # Ok::<(), idxload::IdxError>(())
//! ```

mod header;
pub mod io_images;
pub mod io_labels;
mod model;
mod primitives;
mod source;

pub use header::{
    detect_kind, DecodeOptions, IdxKind, ImageHeader, LabelHeader, DEFAULT_MAX_IMAGE_PIXELS,
};
pub use model::ImageSet;
pub use source::open_source;

pub(crate) use header::{read_image_header_body, read_label_header_body};
