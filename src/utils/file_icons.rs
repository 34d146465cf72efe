// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors
//! Phosphor placeholder icons for files whose preview is missing.

/// Return a Phosphor file icon matching the declared media type.
pub fn icon_for(media_type: &str) -> &'static str {
    let media_type = media_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match media_type.as_str() {
        "image/jpeg" => egui_phosphor::regular::FILE_JPG,
        "image/png" => egui_phosphor::regular::FILE_PNG,
        "image/svg+xml" => egui_phosphor::regular::FILE_SVG,
        "application/pdf" => egui_phosphor::regular::FILE_PDF,
        other if other.starts_with("image/") => egui_phosphor::regular::FILE_IMAGE,
        other if other.starts_with("text/") => egui_phosphor::regular::FILE_TEXT,
        _ => egui_phosphor::regular::FILE,
    }
}

#[cfg(test)]
mod tests {
    use super::icon_for;

    #[test]
    fn icon_for_prefers_specific_image_icons() {
        assert_eq!(icon_for("image/jpeg"), egui_phosphor::regular::FILE_JPG);
        assert_eq!(icon_for("IMAGE/PNG"), egui_phosphor::regular::FILE_PNG);
        assert_eq!(icon_for("image/webp"), egui_phosphor::regular::FILE_IMAGE);
    }

    #[test]
    fn icon_for_handles_parameters_and_unknown_types() {
        assert_eq!(
            icon_for("text/plain; charset=utf-8"),
            egui_phosphor::regular::FILE_TEXT
        );
        assert_eq!(icon_for(""), egui_phosphor::regular::FILE);
    }
}
