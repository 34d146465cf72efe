// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Zip packaging of sanitized images and the save/export step.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use zip::{CompressionMethod, write::FileOptions};

use crate::models::archive::{SanitizedImage, assert_unique_entry_names};

pub use crate::models::archive::entry_name;

/// Filename suggested by the save dialog.
pub const DEFAULT_ARCHIVE_NAME: &str = "images.zip";

/// A finished archive held in memory until the user picks where to save it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Archive {
    /// Complete zip file bytes.
    pub bytes: Vec<u8>,
    /// Entry names in archive order.
    pub entries: Vec<String>,
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

/// Pack `images` into a deflated zip, one entry per image in slice order.
///
/// Entry names are checked for uniqueness before anything is written.
pub fn build_archive(images: &[SanitizedImage]) -> Result<Archive> {
    assert_unique_entry_names(images)?;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::with_capacity(images.len());
    for image in images {
        zip.start_file(image.name.as_str(), options)
            .with_context(|| format!("Failed to add {} to archive", image.name))?;
        zip.write_all(&image.bytes)
            .with_context(|| format!("Failed to write {} into archive", image.name))?;
        entries.push(image.name.clone());
    }

    let bytes = zip
        .finish()
        .context("Failed to finalize archive")?
        .into_inner();
    tracing::info!(entries = entries.len(), size = bytes.len(), "archive built");
    Ok(Archive { bytes, entries })
}

/// Persist `archive` at `output`.
///
/// Parent directories are created if missing. Bytes go to a hidden sibling
/// first and are renamed into place, so `output` never holds a partial file.
pub fn write_archive(archive: &Archive, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let temp_path = temp_sibling(output);
    fs::write(&temp_path, &archive.bytes)
        .with_context(|| format!("Failed to write archive file {:?}", temp_path))?;
    fs::rename(&temp_path, output).map_err(|err| {
        let _ = fs::remove_file(&temp_path);
        anyhow::Error::new(err).context(format!("Failed to move archive into place at {:?}", output))
    })?;

    tracing::info!(path = %output.display(), "archive saved");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string());
    parent.join(format!(".{name}.part"))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io::{Cursor, Read};
    use std::path::PathBuf;

    use tempfile::TempDir;
    use zip::ZipArchive;

    use super::{build_archive, ensure_extension, write_archive};
    use crate::models::archive::SanitizedImage;

    fn images(count: usize) -> Vec<SanitizedImage> {
        (0..count)
            .map(|i| SanitizedImage::new(i, format!("payload-{i}").into_bytes()))
            .collect()
    }

    // Should leave an existing matching extension untouched, ignoring case.
    #[test]
    fn ensure_extension_preserves_matching_extension_case_insensitive() {
        let path = PathBuf::from("/tmp/photos.ZIP");
        let result = ensure_extension(path.clone(), "zip");

        assert_eq!(result, path);
    }

    // Should replace an unmatched extension with the requested one.
    #[test]
    fn ensure_extension_replaces_when_different() {
        let result = ensure_extension(PathBuf::from("photos.tar"), "zip");

        assert_eq!(result.extension().and_then(|e| e.to_str()), Some("zip"));
    }

    #[test]
    fn build_archive_writes_entries_in_order_with_contents() {
        let archive = build_archive(&images(3)).unwrap();

        assert_eq!(archive.entries, vec!["image-0.jpg", "image-1.jpg", "image-2.jpg"]);

        let mut zip = ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        assert_eq!(zip.len(), 3);
        for i in 0..3 {
            let mut entry = zip.by_index(i).unwrap();
            assert_eq!(entry.name(), format!("image-{i}.jpg"));
            let mut buf = String::new();
            entry.read_to_string(&mut buf).unwrap();
            assert_eq!(buf, format!("payload-{i}"));
        }
    }

    #[test]
    fn build_archive_rejects_duplicate_names() {
        let mut batch = images(2);
        batch[1].name = batch[0].name.clone();

        assert!(build_archive(&batch).is_err());
    }

    #[test]
    fn build_archive_of_nothing_is_a_valid_empty_zip() {
        let archive = build_archive(&[]).unwrap();

        let zip = ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        assert_eq!(zip.len(), 0);
    }

    #[test]
    fn write_archive_creates_parents_and_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("nested").join("images.zip");
        let archive = build_archive(&images(2)).unwrap();

        write_archive(&archive, &output).unwrap();

        let zip = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        assert_eq!(zip.len(), 2);
        let leftovers: Vec<_> = fs::read_dir(output.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn write_archive_replaces_existing_file() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("images.zip");
        fs::write(&output, b"stale").unwrap();

        write_archive(&build_archive(&images(1)).unwrap(), &output).unwrap();

        let zip = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        assert_eq!(zip.len(), 1);
    }
}
