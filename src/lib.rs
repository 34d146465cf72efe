// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! ExitExif: strip EXIF metadata from JPEG images and bundle the clean copies into a zip.

pub mod app;
pub mod logging;
pub mod logic;
pub mod models;
pub mod mvu;
pub mod ui;
pub mod utils;
