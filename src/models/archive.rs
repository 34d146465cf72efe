// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Sanitized image and archive entry model (UI-agnostic).

use std::collections::HashSet;

use anyhow::{Result, anyhow};

/// Bytes of one image after metadata removal, named for its slot in the archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedImage {
    /// Position of the source file in the selection when the batch started.
    pub index: usize,
    /// Entry name inside the archive.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SanitizedImage {
    pub fn new(index: usize, bytes: Vec<u8>) -> Self {
        Self {
            index,
            name: entry_name(index),
            bytes,
        }
    }
}

/// Archive entry name for the image at `index` in the batch.
///
/// Names derive from position only, so colliding or missing source filenames
/// can never clash inside the archive.
pub fn entry_name(index: usize) -> String {
    format!("image-{index}.jpg")
}

/// Ensure there are no duplicate entry names before writing the archive.
pub fn assert_unique_entry_names(images: &[SanitizedImage]) -> Result<()> {
    let mut seen = HashSet::new();
    for image in images {
        if !seen.insert(image.name.as_str()) {
            return Err(anyhow!("Duplicate image name in archive: {}", image.name));
        }
    }
    Ok(())
}
