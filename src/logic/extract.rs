// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Read-only EXIF tag extraction for display.

use std::io::Cursor;

use exif::{In, Tag};

use crate::logic::codec::read_source;
use crate::models::metadata::MetadataTagSet;
use crate::models::selection::ByteSource;

/// Collect every EXIF tag in `bytes`.
///
/// Primary, Exif, and GPS tags keep their standard names; tags from the
/// embedded thumbnail directory are prefixed with `Thumbnail`. Missing or
/// unreadable metadata yields an empty set.
pub fn extract_tags(bytes: &[u8]) -> MetadataTagSet {
    let mut reader = Cursor::new(bytes);
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(err) => {
            tracing::debug!(error = %err, "no readable EXIF metadata");
            return MetadataTagSet::default();
        }
    };

    let mut tags = MetadataTagSet::default();
    for field in exif.fields() {
        if is_pointer(field.tag) {
            continue;
        }
        let name = if field.ifd_num == In::THUMBNAIL {
            format!("Thumbnail{}", field.tag)
        } else {
            field.tag.to_string()
        };
        let value = field.display_value().with_unit(&exif).to_string();
        tags.insert(name, value);
    }
    tags
}

/// Read `source` and extract its tags; read failures also yield an empty set.
pub fn extract_from_source(source: &ByteSource) -> MetadataTagSet {
    match read_source(source) {
        Ok(bytes) => extract_tags(&bytes),
        Err(err) => {
            tracing::debug!(error = %err, "could not read file for metadata display");
            MetadataTagSet::default()
        }
    }
}

/// Structural IFD links carry no information worth showing.
fn is_pointer(tag: Tag) -> bool {
    tag == Tag::ExifIFDPointer || tag == Tag::GPSInfoIFDPointer || tag == Tag::InteropIFDPointer
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::{extract_from_source, extract_tags};
    use crate::logic::codec::decode_preview;
    use crate::logic::fixtures::{CAMERA_MAKE, CAMERA_MODEL, jpeg_with_exif, plain_jpeg};
    use crate::models::selection::ByteSource;

    #[test]
    fn extract_tags_reads_camera_time_and_gps() {
        let tags = extract_tags(&jpeg_with_exif(8, 8));

        assert!(tags.get("Make").is_some_and(|v| v.contains(CAMERA_MAKE)));
        assert!(tags.get("Model").is_some_and(|v| v.contains(CAMERA_MODEL)));
        assert!(tags.get("DateTime").is_some_and(|v| v.contains("2024")));
        assert!(tags.get("GPSLatitudeRef").is_some_and(|v| v.contains('N')));
        assert!(tags.get("GPSLatitude").is_some());
        assert!(tags.get("GPSInfoIFDPointer").is_none());
    }

    // Absence of tags is a normal outcome and must not block previews.
    #[test]
    fn extract_tags_on_untagged_image_is_empty_and_preview_still_works() {
        let bytes = plain_jpeg(12, 9);

        let tags = extract_tags(&bytes);
        let preview = decode_preview(&bytes, 64);

        assert!(tags.is_empty());
        assert!(preview.is_ok());
    }

    #[test]
    fn extract_tags_tolerates_garbage() {
        assert!(extract_tags(b"not an image at all").is_empty());
        assert!(extract_tags(&[0xFF, 0xD8, 0xFF, 0xE1, 0x00]).is_empty());
    }

    #[test]
    fn extract_tags_does_not_mutate_input() {
        let bytes = jpeg_with_exif(8, 8);
        let before = bytes.clone();

        let _ = extract_tags(&bytes);

        assert_eq!(bytes, before);
    }

    #[test]
    fn extract_from_source_handles_memory_and_missing_files() {
        let tmp = TempDir::new().unwrap();
        let memory = ByteSource::Memory(Arc::from(jpeg_with_exif(8, 8)));
        let missing = ByteSource::Path(tmp.path().join("missing.jpg"));

        assert!(!extract_from_source(&memory).is_empty());
        assert!(extract_from_source(&missing).is_empty());
    }
}
