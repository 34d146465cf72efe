// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 The ExitExif Authors

//! Batch sanitize-and-package pipeline.
//!
//! The batch is all-or-nothing: declared media types are checked up front in
//! selection order, then one read+strip task per file runs on a bounded pool.
//! Results are slotted by original index so entry names never depend on which
//! task finishes first. The first failure aborts the batch.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use thiserror::Error;

use crate::logic::archive::{Archive, build_archive};
use crate::logic::codec::read_source;
use crate::logic::strip::{StripError, StripPolicy, strip_metadata_with};
use crate::models::archive::SanitizedImage;
use crate::models::selection::SelectedFile;

/// User-facing failures that abort a batch. Every variant names the file.
#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error("File {name} is not a JPEG image")]
    NotJpeg { name: String },
    #[error("File {name} is not a valid JPEG image: {source}")]
    Malformed {
        name: String,
        #[source]
        source: StripError,
    },
    #[error("Error reading file {name}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl SanitizeError {
    /// Name of the file that aborted the batch.
    pub fn file_name(&self) -> &str {
        match self {
            SanitizeError::NotJpeg { name }
            | SanitizeError::Malformed { name, .. }
            | SanitizeError::Read { name, .. } => name,
        }
    }
}

/// Tuning knobs for a batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    /// Upper bound on concurrent read+strip tasks.
    pub workers: usize,
    /// Metadata kinds to remove from every image.
    pub policy: StripPolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        Self {
            workers,
            policy: StripPolicy::default(),
        }
    }
}

/// Sanitize every file, returning images in selection order.
///
/// # Errors
///
/// The first [`SanitizeError`] encountered; no images are returned in that case.
pub fn sanitize_batch(
    files: &[SelectedFile],
    options: &BatchOptions,
) -> Result<Vec<SanitizedImage>, SanitizeError> {
    sanitize_batch_with(files, options, |file| read_source(&file.source))
}

/// Sanitize then package `files` into an in-memory archive.
pub fn export_archive(files: &[SelectedFile], options: &BatchOptions) -> anyhow::Result<Archive> {
    let images = sanitize_batch(files, options)?;
    build_archive(&images)
}

/// Same as [`sanitize_batch`] with a caller-supplied byte reader.
pub(crate) fn sanitize_batch_with<R>(
    files: &[SelectedFile],
    options: &BatchOptions,
    read: R,
) -> Result<Vec<SanitizedImage>, SanitizeError>
where
    R: Fn(&SelectedFile) -> io::Result<Vec<u8>> + Sync,
{
    // Precondition pass: deterministic, first offender by index, nothing read yet.
    if let Some(file) = files.iter().find(|f| !f.is_declared_jpeg()) {
        tracing::warn!(file = %file.name, media_type = %file.media_type, "rejecting non-JPEG file");
        return Err(SanitizeError::NotJpeg {
            name: file.name.clone(),
        });
    }
    if files.is_empty() {
        return Ok(Vec::new());
    }

    let workers = options.workers.clamp(1, files.len());
    tracing::info!(files = files.len(), workers, "sanitizing batch");

    let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, &SelectedFile)>();
    let (result_tx, result_rx) =
        crossbeam_channel::unbounded::<(usize, Result<Vec<u8>, SanitizeError>)>();
    for job in files.iter().enumerate() {
        // Receiver is alive for the whole scope, so sending cannot fail.
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let abort = AtomicBool::new(false);
    let policy = options.policy;

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let abort = &abort;
            let read = &read;
            scope.spawn(move || {
                for (index, file) in job_rx.iter() {
                    if abort.load(Ordering::Relaxed) {
                        break;
                    }
                    let outcome = sanitize_one(file, &policy, read);
                    if result_tx.send((index, outcome)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        let mut slots: Vec<Option<Vec<u8>>> = vec![None; files.len()];
        for (index, outcome) in result_rx.iter() {
            match outcome {
                Ok(bytes) => slots[index] = Some(bytes),
                Err(err) => {
                    abort.store(true, Ordering::Relaxed);
                    tracing::warn!(file = %err.file_name(), error = %err, "batch aborted");
                    return Err(err);
                }
            }
        }

        Ok(slots
            .into_iter()
            .enumerate()
            .filter_map(|(index, bytes)| bytes.map(|b| SanitizedImage::new(index, b)))
            .collect())
    })
}

fn sanitize_one<R>(
    file: &SelectedFile,
    policy: &StripPolicy,
    read: &R,
) -> Result<Vec<u8>, SanitizeError>
where
    R: Fn(&SelectedFile) -> io::Result<Vec<u8>>,
{
    let bytes = read(file).map_err(|source| SanitizeError::Read {
        name: file.name.clone(),
        source,
    })?;
    let stripped = strip_metadata_with(&bytes, policy).map_err(|source| match source {
        StripError::NotJpeg => SanitizeError::NotJpeg {
            name: file.name.clone(),
        },
        other => SanitizeError::Malformed {
            name: file.name.clone(),
            source: other,
        },
    })?;
    tracing::debug!(file = %file.name, before = bytes.len(), after = stripped.len(), "sanitized");
    Ok(stripped)
}
