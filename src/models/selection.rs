// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Selected-file domain model: ids, byte sources, and the ordered selection.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Media type every file must declare before it is sanitized.
pub const JPEG_MEDIA_TYPE: &str = "image/jpeg";

/// Opaque identifier handed out when a file enters the selection.
///
/// Ids come from a monotonic counter and are never reused within a session,
/// so a file that is removed and picked again gets a new identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the bytes of a selected file live.
#[derive(Clone, Debug)]
pub enum ByteSource {
    /// File on disk, read lazily.
    Path(PathBuf),
    /// Bytes already in memory (drag-and-drop payloads, tests).
    Memory(Arc<[u8]>),
}

/// A file chosen by the user but not yet part of the selection.
#[derive(Clone, Debug)]
pub struct PickedFile {
    pub name: String,
    /// Media type as declared by the platform or guessed from the name.
    pub media_type: String,
    /// Size in bytes at pick time (0 when unknown).
    pub size: u64,
    pub source: ByteSource,
}

impl PickedFile {
    /// Describe a file on disk; the media type is guessed from its extension.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = guess_media_type(&path);
        let size = path.metadata().map(|m| m.len()).unwrap_or(0);
        Self {
            name,
            media_type,
            size,
            source: ByteSource::Path(path),
        }
    }

    /// Describe an in-memory file. An empty `media_type` falls back to a guess from `name`.
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let name = name.into();
        let bytes: Arc<[u8]> = bytes.into();
        let media_type = if media_type.trim().is_empty() {
            guess_media_type(Path::new(&name))
        } else {
            media_type.trim().to_string()
        };
        Self {
            name,
            media_type,
            size: bytes.len() as u64,
            source: ByteSource::Memory(bytes),
        }
    }
}

/// A file in the current selection.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    pub id: FileId,
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub source: ByteSource,
}

impl SelectedFile {
    /// Whether the declared media type allows sanitizing.
    pub fn is_declared_jpeg(&self) -> bool {
        self.media_type == JPEG_MEDIA_TYPE
    }
}

/// Ordered list of selected files; the only long-lived owner of file handles.
#[derive(Debug, Default)]
pub struct Selection {
    files: Vec<SelectedFile>,
    next_id: u64,
}

impl Selection {
    /// Replace the whole selection with `picked`, in the given order.
    pub fn select(&mut self, picked: Vec<PickedFile>) -> &[SelectedFile] {
        let mut files = Vec::with_capacity(picked.len());
        for file in picked {
            let id = self.allocate_id();
            files.push(SelectedFile {
                id,
                name: file.name,
                media_type: file.media_type,
                size: file.size,
                source: file.source,
            });
        }
        self.files = files;
        &self.files
    }

    /// Remove the file with `id`. Unknown ids leave the selection untouched.
    pub fn remove(&mut self, id: FileId) -> Option<SelectedFile> {
        let index = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(index))
    }

    /// Current files in selection order.
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn get(&self, id: FileId) -> Option<&SelectedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: FileId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn allocate_id(&mut self) -> FileId {
        let id = FileId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Guess a media type from the file extension, falling back to `application/octet-stream`.
pub fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
