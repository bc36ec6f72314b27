//! Integration tests for IDX image files.

mod common;

use idxload::idx::io_images::{
    from_images_slice, read_images_file, read_images_file_with, write_images_file,
};
use idxload::idx::DecodeOptions;
use idxload::{FormatError, IdxError};

/// Three 2x3 images with distinct pixel values.
fn sample_pixels() -> Vec<u8> {
    (0..18).map(|i| i * 10).collect()
}

#[test]
fn pixel_offsets_follow_the_file_layout() {
    let pixels = sample_pixels();
    let bytes = common::image_file_bytes(2051, 3, 2, 3, &pixels);
    let set = from_images_slice(&bytes).expect("decode images");

    assert_eq!(set.len(), 3);
    for i in 0..3 {
        let image = set.image(i).expect("image present");
        assert_eq!(image.len(), 6);
        for r in 0..2 {
            for c in 0..3 {
                let offset = 16 + i * 6 + r * 3 + c;
                assert_eq!(set.pixel(i, r, c), Some(bytes[offset] as f64));
            }
        }
    }
}

#[test]
fn decodes_from_disk() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("train-images-idx3-ubyte");
    common::write_file(&path, &common::image_file_bytes(2051, 3, 2, 3, &sample_pixels()));

    let set = read_images_file(&path).expect("decode images");
    assert_eq!((set.rows, set.cols), (2, 3));
    assert_eq!(set.images[2], common::widen(&sample_pixels()[12..]));
}

#[cfg(feature = "gzip")]
#[test]
fn decodes_gzipped_file() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("t10k-images-idx3-ubyte.gz");
    common::write_gz_file(&path, &common::image_file_bytes(2051, 3, 2, 3, &sample_pixels()));

    let set = read_images_file(&path).expect("decode images");
    assert_eq!(set.len(), 3);
    assert_eq!(set.pixel(1, 0, 0), Some(60.0));
}

#[cfg(feature = "gzip")]
#[test]
fn cut_off_gzip_file_is_a_format_error() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("train-images-idx3-ubyte.gz");
    let pixels = common::noisy_bytes(50 * 8 * 8);
    let compressed = common::gz_bytes(&common::image_file_bytes(2051, 50, 8, 8, &pixels));
    common::write_file(&path, &compressed[..compressed.len() / 2]);

    let err = read_images_file(&path).unwrap_err();
    assert!(
        matches!(err.format_error(), Some(FormatError::Image { .. })),
        "unexpected error: {err:?}"
    );
}

#[test]
fn truncated_image_fails_with_index() {
    let pixels = sample_pixels();
    let bytes = common::image_file_bytes(2051, 3, 2, 3, &pixels[..17]);
    let err = from_images_slice(&bytes).unwrap_err();
    assert!(matches!(
        err,
        IdxError::Format(FormatError::Image { index: 2 })
    ));
}

#[test]
fn missing_rows_and_cols_fail() {
    let mut bytes = common::image_file_bytes(2051, 1, 0, 0, &[]);
    bytes.truncate(8);
    let err = from_images_slice(&bytes).unwrap_err();
    assert_eq!(err.to_string(), "cannot read dimensions");
}

#[test]
fn missing_count_fails() {
    let err = from_images_slice(&2051i32.to_be_bytes()).unwrap_err();
    assert_eq!(err.format_error(), Some(&FormatError::ItemCount));
}

#[test]
fn negative_dimensions_are_rejected() {
    let bytes = common::image_file_bytes(2051, 1, -28, 28, &[0; 784]);
    let err = from_images_slice(&bytes).unwrap_err();
    assert_eq!(
        err.format_error(),
        Some(&FormatError::InvalidDimensions { rows: -28, cols: 28 })
    );
}

#[test]
fn lying_header_is_capped() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("huge");
    common::write_file(&path, &common::image_file_bytes(2051, 1, 65536, 65536, &[0; 64]));

    let err = read_images_file(&path).unwrap_err();
    assert!(matches!(
        err,
        IdxError::Decode {
            source: FormatError::ImageTooLarge { .. },
            ..
        }
    ));

    let opts = DecodeOptions {
        max_image_pixels: 16,
    };
    let path = temp.path().join("small");
    common::write_file(&path, &common::image_file_bytes(2051, 1, 4, 5, &[0; 20]));
    assert!(read_images_file_with(&path, &opts).is_err());
}

#[test]
fn writer_and_reader_agree_on_disk() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("images");
    let images = vec![vec![0u8; 784], vec![255u8; 784]];
    write_images_file(&path, 28, 28, &images).expect("write images");

    let on_disk = std::fs::read(&path).expect("read back");
    assert_eq!(on_disk.len(), 16 + 2 * 784);

    let set = read_images_file(&path).expect("decode images");
    assert_eq!(set.pixel(1, 27, 27), Some(255.0));
    assert_eq!(set.pixel(0, 13, 14), Some(0.0));
}
