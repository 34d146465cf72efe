// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Logging init: structured lines on stderr, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,exitexif=debug";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
    if installed.is_ok() {
        tracing::debug!("logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn init_logging_twice_does_not_panic() {
        init_logging();
        init_logging();
    }
}
