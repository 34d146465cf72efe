// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Domain layer: pure data types and validation helpers shared between UI and sanitizing logic.

pub mod archive;
pub mod metadata;
pub mod selection;
