// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

fn main() -> eframe::Result<()> {
    exitexif::logging::init_logging();
    exitexif::app::run()
}
