// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Byte plumbing between file handles, owned buffers, and displayable pixels.

use std::fs;
use std::io;

use anyhow::{Context, Result};

use crate::models::selection::ByteSource;

/// Longest edge of generated previews, in pixels.
pub const PREVIEW_MAX_EDGE: u32 = 256;

/// Decoded RGBA preview, independent of any UI toolkit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    /// Unmultiplied RGBA, row-major.
    pub rgba: Vec<u8>,
}

/// Read every byte behind `source` into an owned buffer.
///
/// The source itself is never modified; in-memory sources are copied so the
/// caller can mutate its buffer freely.
pub fn read_source(source: &ByteSource) -> io::Result<Vec<u8>> {
    match source {
        ByteSource::Path(path) => fs::read(path),
        ByteSource::Memory(bytes) => Ok(bytes.to_vec()),
    }
}

/// Decode image bytes into a preview that fits within `max_edge` on both sides.
///
/// Aspect ratio is kept and images smaller than the bound are not enlarged.
pub fn decode_preview(bytes: &[u8], max_edge: u32) -> Result<PreviewImage> {
    let decoded = image::load_from_memory(bytes).context("Failed to decode image preview")?;
    let resized = if decoded.width() > max_edge || decoded.height() > max_edge {
        decoded.thumbnail(max_edge, max_edge)
    } else {
        decoded
    };
    let rgba = resized.to_rgba8();
    Ok(PreviewImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// Read and decode the preview for a selected file.
pub fn load_preview(source: &ByteSource) -> Result<PreviewImage> {
    let bytes = read_source(source).context("Failed to read image for preview")?;
    decode_preview(&bytes, PREVIEW_MAX_EDGE)
}
