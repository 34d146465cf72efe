// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Top-level egui application shell for sanitizing image metadata.
//! Handles layout, drag-and-drop, and wiring to the export pipeline.

pub mod components;

use eframe::egui;

use crate::models::selection::PickedFile;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::gallery::{self, GalleryMsg};

/// Stateful egui application for selecting, inspecting, and exporting images.
pub struct ExitExifApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl Default for ExitExifApp {
    fn default() -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }
        tracing::debug!(threads, "command workers started");

        Self {
            model: AppModel::default(),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for ExitExifApp {
    /// Drives a single UI frame: drains worker results, applies messages, and renders the panels.
    ///
    /// Decoded previews are turned into textures here because only the UI
    /// thread holds the egui context.
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx().clone();
        self.ensure_spacing(&ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        self.collect_dropped_files(&ctx);

        // Process pending messages until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            match msg {
                Msg::PreviewDecoded { id, image } => {
                    let color = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width as usize, image.height as usize],
                        &image.rgba,
                    );
                    let texture = ctx.load_texture(
                        format!("preview-{id}"),
                        color,
                        egui::TextureOptions::default(),
                    );
                    msgs.push(Msg::Gallery(GalleryMsg::PreviewReady { id, texture }));
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    for cmd in commands {
                        if self.cmd_tx.send(cmd).is_ok() {
                            self.model.pending_commands += 1;
                        }
                    }
                }
            }
        }
        self.inbox = msgs;

        egui::Panel::top("top_bar").show_inside(ui, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("ExitExif");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                    if !self.model.gallery.is_empty() {
                        ui.separator();
                        self.render_download_button(ui);
                    }
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(&ctx);

        egui::Panel::bottom("status_panel")
            .resizable(false)
            .show_inside(ui, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_intro(ui, &ctx);
                ui.add_space(12.0);

                let gallery_msgs = gallery::view(ui, &self.model.gallery);
                self.inbox
                    .extend(gallery_msgs.into_iter().map(Msg::Gallery));
                ui.add_space(8.0);
            });
        });

        // Worker results arrive between input events.
        if self.model.pending_commands > 0 {
            ctx.request_repaint();
        }
    }
}

impl ExitExifApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.global_style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Files dropped onto the window replace the selection, same as the picker.
    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let picked: Vec<PickedFile> = dropped
            .into_iter()
            .filter_map(|file| match (file.path, file.bytes) {
                (Some(path), _) => Some(PickedFile::from_path(path)),
                (None, Some(bytes)) => Some(PickedFile::from_bytes(file.name, &file.mime, bytes)),
                (None, None) => None,
            })
            .collect();
        tracing::debug!(files = picked.len(), "files dropped");
        self.inbox.push(Msg::Gallery(GalleryMsg::FilesDropped(picked)));
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    /// Download button; disabled while an export is in flight.
    fn render_download_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!(
            "{} Download",
            egui_phosphor::regular::DOWNLOAD_SIMPLE
        ));
        if ui
            .add_enabled(!self.model.exporting, button)
            .on_hover_text("Remove metadata and save all images as a zip archive")
            .on_disabled_hover_text("Export in progress")
            .clicked()
        {
            self.inbox.push(Msg::DownloadRequested);
        }
    }

    fn render_intro(&self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.label(
            "Remove EXIF metadata such as camera details, capture time, and location from JPEG images.",
        );
        ui.label(
            egui::RichText::new("Everything happens on this computer; no file is uploaded anywhere.")
                .small()
                .color(egui::Color32::from_gray(110)),
        );
        ui.add_space(4.0);
        for step in [
            "1. Select images or drop them onto this window.",
            "2. Expand \"EXIF Data\" to see what each image reveals.",
            "3. Click Download to save the cleaned copies as a zip archive.",
        ] {
            ui.label(egui::RichText::new(step).small());
        }
        if ctx.input(|i| !i.raw.hovered_files.is_empty()) {
            ui.label(
                egui::RichText::new(format!(
                    "{} Drop to replace the current selection",
                    egui_phosphor::regular::UPLOAD_SIMPLE
                ))
                .strong(),
            );
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message with a spinner while work is queued.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} working…)", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0))
                        .on_hover_text(format!(
                            "{} task(s) running in background",
                            self.model.pending_commands
                        ));
                }
            });
        }
    }
}
