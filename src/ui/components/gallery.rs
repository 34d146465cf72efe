// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Selected images with previews, remove buttons, and EXIF panels, structured for MVU updates.

use std::collections::{HashMap, HashSet};

use eframe::egui;

use crate::models::metadata::MetadataTagSet;
use crate::models::selection::{ByteSource, FileId, PickedFile, SelectedFile, Selection};
use crate::utils::{format_bytes, icon_for};

const THUMB_EDGE: f32 = 96.0;

/// MVU state for the selection and everything derived from it.
#[derive(Default)]
pub struct GalleryModel {
    selection: Selection,
    previews: HashMap<FileId, egui::TextureHandle>,
    preview_failures: HashSet<FileId>,
    metadata: HashMap<FileId, MetadataTagSet>,
    expanded: HashSet<FileId>,
}

/// Messages emitted by the gallery view or produced by background work.
pub enum GalleryMsg {
    RequestPickFiles,
    FilesPicked(Vec<PickedFile>),
    FilesDropped(Vec<PickedFile>),
    Remove(FileId),
    ToggleMetadata(FileId),
    PreviewReady {
        id: FileId,
        texture: egui::TextureHandle,
    },
    PreviewFailed {
        id: FileId,
    },
    MetadataExtracted {
        id: FileId,
        tags: MetadataTagSet,
    },
}

/// Side-effectful commands that run off the UI path.
pub enum GalleryCommand {
    PickFiles,
    LoadPreview { id: FileId, source: ByteSource },
    ExtractMetadata { id: FileId, source: ByteSource },
}

/// User-facing events for status/error surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryEvent {
    /// Message text to display.
    pub message: String,
    /// Whether the message represents an error.
    pub is_error: bool,
}

impl GalleryModel {
    /// Current files in selection order.
    pub fn files(&self) -> &[SelectedFile] {
        self.selection.files()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Extracted tags for `id`, once available.
    pub fn metadata(&self, id: FileId) -> Option<&MetadataTagSet> {
        self.metadata.get(&id)
    }

    pub fn is_expanded(&self, id: FileId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn preview_failed(&self, id: FileId) -> bool {
        self.preview_failures.contains(&id)
    }

    pub fn has_preview(&self, id: FileId) -> bool {
        self.previews.contains_key(&id)
    }
}

/// Apply a message to the gallery model. Returns a user-facing event when relevant.
pub fn update(
    model: &mut GalleryModel,
    msg: GalleryMsg,
    cmds: &mut Vec<GalleryCommand>,
) -> Option<GalleryEvent> {
    match msg {
        GalleryMsg::RequestPickFiles => {
            cmds.push(GalleryCommand::PickFiles);
            None
        }
        GalleryMsg::FilesPicked(picked) | GalleryMsg::FilesDropped(picked) => {
            // An empty pick (dialog cancelled) keeps the current selection.
            if picked.is_empty() {
                return None;
            }
            replace_selection(model, picked, cmds);
            let count = model.selection.len();
            Some(GalleryEvent {
                message: format!("{count} file(s) selected"),
                is_error: false,
            })
        }
        GalleryMsg::Remove(id) => {
            let removed = remove_file(model, id)?;
            Some(GalleryEvent {
                message: format!("Removed {}", removed.name),
                is_error: false,
            })
        }
        GalleryMsg::ToggleMetadata(id) => {
            if model.selection.contains(id) && !model.expanded.remove(&id) {
                model.expanded.insert(id);
            }
            None
        }
        GalleryMsg::PreviewReady { id, texture } => {
            if model.selection.contains(id) {
                model.previews.insert(id, texture);
            }
            None
        }
        GalleryMsg::PreviewFailed { id } => {
            if model.selection.contains(id) {
                model.preview_failures.insert(id);
            }
            None
        }
        GalleryMsg::MetadataExtracted { id, tags } => {
            if model.selection.contains(id) {
                model.metadata.insert(id, tags);
            } else {
                tracing::debug!(%id, "discarding metadata for a file no longer selected");
            }
            None
        }
    }
}

/// Render the gallery and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &GalleryModel) -> Vec<GalleryMsg> {
    let mut msgs = Vec::new();

    let pick = ui.add(egui::Button::new(format!(
        "{} Select images",
        egui_phosphor::regular::FOLDER_OPEN
    )));
    if pick
        .on_hover_text("Choose images; this replaces the current selection")
        .clicked()
    {
        msgs.push(GalleryMsg::RequestPickFiles);
    }

    ui.add_space(6.0);

    let visuals = ui.visuals().clone();
    egui::Frame::new()
        .fill(visuals.panel_fill)
        .stroke(visuals.window_stroke())
        .inner_margin(8.0)
        .show(ui, |ui| {
            if model.selection.is_empty() {
                ui.label(
                    egui::RichText::new("No images selected").color(egui::Color32::from_gray(150)),
                );
            } else {
                render_file_list(ui, model, &mut msgs);
            }
        });

    msgs
}

/// Render each selected file with its preview, controls, and metadata panel.
fn render_file_list(ui: &mut egui::Ui, model: &GalleryModel, msgs: &mut Vec<GalleryMsg>) {
    let files = model.selection.files();
    for (index, file) in files.iter().enumerate() {
        ui.horizontal(|ui| {
            render_preview(ui, model, file);

            ui.vertical(|ui| {
                ui.label(file.name.as_str());
                ui.label(
                    egui::RichText::new(format!(
                        "{} | {}",
                        file.media_type,
                        format_bytes(file.size)
                    ))
                    .small()
                    .color(egui::Color32::from_gray(90)),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(egui::RichText::new(egui_phosphor::regular::X))
                    .on_hover_text("Remove image")
                    .clicked()
                {
                    msgs.push(GalleryMsg::Remove(file.id));
                }
            });
        });

        render_metadata_panel(ui, model, file, msgs);

        if index + 1 < files.len() {
            ui.separator();
        }
    }
}

fn render_preview(ui: &mut egui::Ui, model: &GalleryModel, file: &SelectedFile) {
    if let Some(texture) = model.previews.get(&file.id) {
        let size = texture.size_vec2();
        let scale = (THUMB_EDGE / size.x).min(THUMB_EDGE / size.y).min(1.0);
        ui.add(egui::Image::new((texture.id(), size * scale)));
    } else if model.preview_failures.contains(&file.id) {
        ui.add_sized(
            [THUMB_EDGE, THUMB_EDGE * 0.75],
            egui::Label::new(egui::RichText::new(icon_for(&file.media_type)).size(32.0)),
        )
        .on_hover_text("Preview unavailable");
    } else {
        ui.add_sized([THUMB_EDGE, THUMB_EDGE * 0.75], egui::Spinner::new());
    }
}

/// Collapsible list of `name: value` lines for one file.
fn render_metadata_panel(
    ui: &mut egui::Ui,
    model: &GalleryModel,
    file: &SelectedFile,
    msgs: &mut Vec<GalleryMsg>,
) {
    let expanded = model.expanded.contains(&file.id);
    let caret = if expanded {
        egui_phosphor::regular::CARET_DOWN
    } else {
        egui_phosphor::regular::CARET_RIGHT
    };
    if ui
        .add(egui::Button::new(format!("{caret} EXIF Data")).frame(false))
        .clicked()
    {
        msgs.push(GalleryMsg::ToggleMetadata(file.id));
    }
    if !expanded {
        return;
    }

    ui.indent(("exif", file.id), |ui| match model.metadata.get(&file.id) {
        None => {
            ui.label(egui::RichText::new("Reading…").color(egui::Color32::from_gray(120)));
        }
        Some(tags) if tags.is_empty() => {
            ui.label(egui::RichText::new("No EXIF data").color(egui::Color32::from_gray(120)));
        }
        Some(tags) => {
            for tag in tags.iter() {
                ui.label(
                    egui::RichText::new(format!("{}: {}", tag.name, tag.value)).small(),
                );
            }
        }
    });
}

/// Swap in a new selection, drop everything derived from the old one, and queue per-file work.
fn replace_selection(
    model: &mut GalleryModel,
    picked: Vec<PickedFile>,
    cmds: &mut Vec<GalleryCommand>,
) {
    model.previews.clear();
    model.preview_failures.clear();
    model.metadata.clear();
    model.expanded.clear();

    let files = model.selection.select(picked);
    tracing::info!(files = files.len(), "selection replaced");
    for file in files {
        cmds.push(GalleryCommand::LoadPreview {
            id: file.id,
            source: file.source.clone(),
        });
        cmds.push(GalleryCommand::ExtractMetadata {
            id: file.id,
            source: file.source.clone(),
        });
    }
}

/// Remove a file and its cache entries.
fn remove_file(model: &mut GalleryModel, id: FileId) -> Option<SelectedFile> {
    let removed = model.selection.remove(id)?;
    model.previews.remove(&id);
    model.preview_failures.remove(&id);
    model.metadata.remove(&id);
    model.expanded.remove(&id);
    Some(removed)
}
