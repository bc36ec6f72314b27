use std::io::Cursor;

use idxload::idx::io_images::{read_images, read_images_file, to_images_bytes, write_images_file};
use idxload::idx::io_labels::{read_labels, read_labels_file, to_labels_bytes, write_labels_file};
use idxload::FormatError;
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn labels_roundtrip_exactly(raw in proptest_helpers::arb_labels(300)) {
        let bytes = to_labels_bytes(&raw).expect("encode labels");
        let decoded = read_labels(bytes.as_slice()).expect("decode labels");

        prop_assert_eq!(decoded.len(), raw.len());
        for (value, byte) in decoded.iter().zip(&raw) {
            prop_assert_eq!(*value, *byte as f64);
        }
    }

    #[test]
    fn images_roundtrip_exactly(synth in proptest_helpers::arb_images(8, 6)) {
        let bytes = to_images_bytes(synth.rows, synth.cols, &synth.images).expect("encode images");
        let set = read_images(bytes.as_slice()).expect("decode images");

        prop_assert_eq!((set.rows, set.cols), (synth.rows, synth.cols));
        prop_assert_eq!(set.into_images(), synth.widened());
    }

    #[test]
    fn any_truncation_of_labels_fails(
        raw in proptest_helpers::arb_labels(64),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = to_labels_bytes(&raw).expect("encode labels");
        let keep = cut.index(bytes.len());
        let err = read_labels(&bytes[..keep]).unwrap_err();

        let expected = match keep {
            0..=3 => FormatError::MissingMagic,
            4..=7 => FormatError::ItemCount,
            n => FormatError::Label { index: n - 8 },
        };
        prop_assert_eq!(err.format_error(), Some(&expected));
    }

    #[test]
    fn any_truncation_of_images_fails(
        synth in proptest_helpers::arb_images(5, 4),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = to_images_bytes(synth.rows, synth.cols, &synth.images).expect("encode images");
        let keep = cut.index(bytes.len());
        let err = read_images(&bytes[..keep]).unwrap_err();

        let image_len = synth.rows * synth.cols;
        let expected = match keep {
            0..=3 => FormatError::MissingMagic,
            4..=7 => FormatError::ItemCount,
            8..=15 => FormatError::Dimensions,
            n => FormatError::Image { index: (n - 16) / image_len },
        };
        prop_assert_eq!(err.format_error(), Some(&expected));
    }

    #[test]
    fn trailing_bytes_are_left_in_stream(
        raw in proptest_helpers::arb_labels(32),
        tail in prop::collection::vec(any::<u8>(), 0..16),
    ) {
        let mut bytes = to_labels_bytes(&raw).expect("encode labels");
        let end = bytes.len();
        bytes.extend_from_slice(&tail);

        let mut cursor = Cursor::new(bytes);
        read_labels(&mut cursor).expect("decode labels");
        prop_assert_eq!(cursor.position() as usize, end);
    }

    #[test]
    fn file_roundtrip_matches_stream_roundtrip(
        raw in proptest_helpers::arb_labels(64),
        synth in proptest_helpers::arb_images(4, 4),
    ) {
        let temp = tempfile::tempdir().expect("create temp dir");
        let labels_path = temp.path().join("labels");
        let images_path = temp.path().join("images");

        write_labels_file(&labels_path, &raw).expect("write labels");
        write_images_file(&images_path, synth.rows, synth.cols, &synth.images).expect("write images");

        let labels = read_labels_file(&labels_path).expect("read labels");
        let set = read_images_file(&images_path).expect("read images");

        prop_assert_eq!(labels.len(), raw.len());
        prop_assert_eq!(set.len(), synth.images.len());
    }
}
