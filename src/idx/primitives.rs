//! Low-level reads and writes shared by the label and image codecs.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{FormatError, IdxError};

/// Maps a failed read to the crate error.
///
/// Running out of bytes means the file is malformed, so it becomes
/// `on_eof`. Anything else (a broken pipe, a permission error surfacing
/// mid-read) is an I/O failure and is propagated untouched.
pub(crate) fn short_read(err: io::Error, on_eof: FormatError) -> IdxError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        IdxError::Format(on_eof)
    } else {
        IdxError::Io(err)
    }
}

/// Reads one big-endian `i32` header field.
pub(crate) fn read_i32_be<R: Read>(reader: &mut R, on_eof: FormatError) -> Result<i32, IdxError> {
    reader
        .read_i32::<BigEndian>()
        .map_err(|err| short_read(err, on_eof))
}

/// Fills `buf` completely or fails with `on_eof`.
pub(crate) fn read_exact_bytes<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    on_eof: FormatError,
) -> Result<(), IdxError> {
    reader
        .read_exact(buf)
        .map_err(|err| short_read(err, on_eof))
}

/// Reads at most `len` bytes into `buf`, returning how many arrived.
///
/// `buf` grows with the data actually read rather than being sized from
/// `len` up front, so an inflated count in a header cannot force a large
/// allocation on its own.
///
/// A source that signals truncation with `UnexpectedEof` (a cut-off gzip
/// stream, for one) fails with `on_eof(bytes_read)`, the same error a
/// short plain file gives the caller.
pub(crate) fn read_up_to<R: Read>(
    reader: &mut R,
    len: usize,
    buf: &mut Vec<u8>,
    on_eof: impl FnOnce(usize) -> FormatError,
) -> Result<usize, IdxError> {
    buf.clear();
    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(buf)
        .map_err(|err| short_read(err, on_eof(buf.len())))
}

/// Writes one big-endian `i32` header field.
pub(crate) fn write_i32_be<W: Write>(writer: &mut W, value: i32) -> Result<(), IdxError> {
    writer.write_i32::<BigEndian>(value)?;
    Ok(())
}

/// Converts a length into a header field, rejecting values past `i32::MAX`.
pub(crate) fn header_field(what: &'static str, value: usize) -> Result<i32, FormatError> {
    i32::try_from(value).map_err(|_| FormatError::HeaderOverflow { what, value })
}
