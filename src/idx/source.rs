//! Opening IDX files as byte sources.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::IdxError;

/// Opens `path` as a buffered byte source.
///
/// Paths ending in `.gz` are decompressed on the fly, which is how the
/// MNIST files are usually distributed. The returned reader owns the file
/// handle; dropping it closes the file.
pub fn open_source(path: &Path) -> Result<Box<dyn Read + Send>, IdxError> {
    let file = File::open(path).map_err(IdxError::Io)?;
    let reader = BufReader::new(file);

    if is_gzip(path) {
        gzip_source(reader, path)
    } else {
        Ok(Box::new(reader))
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

#[cfg(feature = "gzip")]
fn gzip_source(reader: BufReader<File>, _path: &Path) -> Result<Box<dyn Read + Send>, IdxError> {
    Ok(Box::new(flate2::read::GzDecoder::new(reader)))
}

#[cfg(not(feature = "gzip"))]
fn gzip_source(_reader: BufReader<File>, path: &Path) -> Result<Box<dyn Read + Send>, IdxError> {
    Err(IdxError::UnsupportedFormat(format!(
        "'{}' is gzip-compressed but idxload was built without the 'gzip' feature",
        path.display()
    )))
}
