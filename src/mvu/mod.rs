// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;

use crate::logic::archive::{Archive, DEFAULT_ARCHIVE_NAME, ensure_extension, write_archive};
use crate::logic::batch::{BatchOptions, export_archive};
use crate::logic::codec::{PreviewImage, load_preview};
use crate::logic::extract::extract_from_source;
use crate::models::selection::{ByteSource, FileId, PickedFile, SelectedFile};
use crate::ui::components::gallery::{self, GalleryCommand, GalleryModel, GalleryMsg};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Selected images with their previews and metadata.
    pub gallery: GalleryModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
    /// A download is between request and save/cancel.
    pub exporting: bool,
}

/// Application messages routed through the update function.
pub enum Msg {
    Gallery(GalleryMsg),
    PreviewDecoded { id: FileId, image: PreviewImage },
    DownloadRequested,
    ArchiveBuilt(Result<Archive, String>),
    SaveRequested { archive: Archive, output: PathBuf },
    SaveCancelled,
    SaveCompleted(Result<PathBuf, String>),
    DismissError,
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    PickFiles,
    LoadPreview { id: FileId, source: ByteSource },
    ExtractMetadata { id: FileId, source: ByteSource },
    /// Sanitize and package a snapshot of the selection.
    BuildArchive { files: Vec<SelectedFile> },
    PromptSave(Archive),
    SaveArchive { archive: Archive, output: PathBuf },
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::DismissError => model.error = None,
        Msg::Gallery(m) => {
            let mut gallery_cmds = Vec::new();
            if let Some(event) = gallery::update(&mut model.gallery, m, &mut gallery_cmds) {
                surface_event(model, event.message, event.is_error);
            }
            cmds.extend(gallery_cmds.into_iter().map(map_gallery_command));
        }
        Msg::PreviewDecoded { id, image } => {
            // Texture creation needs the egui context; ui/mod.rs converts this
            // into GalleryMsg::PreviewReady before it reaches update.
            let _ = (id, image);
        }
        Msg::DownloadRequested => {
            if model.exporting || model.gallery.is_empty() {
                return;
            }
            model.exporting = true;
            let files = model.gallery.files().to_vec();
            surface_event(
                model,
                format!("Removing metadata from {} image(s)…", files.len()),
                false,
            );
            cmds.push(Command::BuildArchive { files });
        }
        Msg::ArchiveBuilt(result) => match result {
            Ok(archive) => {
                surface_event(
                    model,
                    format!("Metadata removed from {} image(s).", archive.entries.len()),
                    false,
                );
                cmds.push(Command::PromptSave(archive));
            }
            Err(err) => {
                model.exporting = false;
                surface_event(model, err, true);
            }
        },
        Msg::SaveRequested { archive, output } => {
            cmds.push(Command::SaveArchive { archive, output });
        }
        Msg::SaveCancelled => {
            model.exporting = false;
            surface_event(model, "Download cancelled.".to_string(), false);
        }
        Msg::SaveCompleted(result) => {
            model.exporting = false;
            match result {
                Ok(path) => {
                    surface_event(model, format!("Archive saved: {}", path.display()), false)
                }
                Err(err) => surface_event(model, format!("Failed to save archive:\n\n{err}"), true),
            }
        }
    }
}

/// Execute a command synchronously and return a resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::PickFiles => {
            let files = rfd::FileDialog::new()
                .set_title("Select images")
                .add_filter("JPEG images", &["jpg", "jpeg", "jpe", "jfif"])
                .add_filter("All files", &["*"])
                .pick_files()
                .unwrap_or_default();
            let picked = files.into_iter().map(PickedFile::from_path).collect();
            Msg::Gallery(GalleryMsg::FilesPicked(picked))
        }
        Command::LoadPreview { id, source } => match load_preview(&source) {
            Ok(image) => Msg::PreviewDecoded { id, image },
            Err(err) => {
                tracing::debug!(%id, error = %err, "preview unavailable");
                Msg::Gallery(GalleryMsg::PreviewFailed { id })
            }
        },
        Command::ExtractMetadata { id, source } => {
            let tags = extract_from_source(&source);
            Msg::Gallery(GalleryMsg::MetadataExtracted { id, tags })
        }
        Command::BuildArchive { files } => {
            let result = export_archive(&files, &BatchOptions::default());
            if let Err(err) = &result {
                tracing::warn!(error = %err, "download aborted");
            }
            Msg::ArchiveBuilt(result.map_err(|e| e.to_string()))
        }
        Command::PromptSave(archive) => {
            let output = rfd::FileDialog::new()
                .set_title("Save sanitized images")
                .add_filter("Zip archive", &["zip"])
                .set_file_name(DEFAULT_ARCHIVE_NAME)
                .save_file();
            match output {
                Some(path) => Msg::SaveRequested {
                    archive,
                    output: ensure_extension(path, "zip"),
                },
                None => Msg::SaveCancelled,
            }
        }
        Command::SaveArchive { archive, output } => {
            let res = write_archive(&archive, &output).map(|_| output);
            Msg::SaveCompleted(res.map_err(|e| format!("{e:#}")))
        }
    }
}

fn map_gallery_command(cmd: GalleryCommand) -> Command {
    match cmd {
        GalleryCommand::PickFiles => Command::PickFiles,
        GalleryCommand::LoadPreview { id, source } => Command::LoadPreview { id, source },
        GalleryCommand::ExtractMetadata { id, source } => Command::ExtractMetadata { id, source },
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}
