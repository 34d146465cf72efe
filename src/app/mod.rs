// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Application entry point wiring egui/eframe to launch the ExitExif UI.

use eframe::egui;
use egui_phosphor::Variant;

use crate::ui::ExitExifApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run() -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ExitExif")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 360.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    tracing::info!("starting ExitExif");
    eframe::run_native(
        "ExitExif",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(ExitExifApp::default()))
        }),
    )
}
