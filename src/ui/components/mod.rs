// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Reusable egui components structured for MVU-style updates.

pub mod gallery;
