// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Business logic: reading, inspecting, stripping, and packaging JPEG files.

pub mod archive;
pub mod batch;
pub mod codec;
pub mod extract;
pub mod strip;

#[cfg(test)]
pub(crate) mod fixtures;
