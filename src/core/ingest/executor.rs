//! Batch execution: admission, parallel per-file pipeline, commit.

use super::progress::{run_ticker, ProgressTracker};
use super::{BatchReport, CancellationToken, FileFailure, Ingestor, SkippedFile};
use crate::core::decode::{decode_image, PreviewRenderer};
use crate::core::metadata::extract_metadata;
use crate::core::photo::{Dimensions, Photo, PhotoId};
use crate::core::scanner::CandidateFile;
use crate::core::session::{Reservation, SharedSession};
use crate::error::{FileError, IngestError};
use crate::events::{null_sender, BatchSummary, EventSender, IngestEvent};
use rayon::prelude::*;
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Terminal state of one image file
enum FileOutcome {
    Added,
    Failed(FileFailure),
    Discarded,
}

impl Ingestor {
    /// Ingest a batch without progress events
    pub fn add_files_quiet(
        &self,
        session: &SharedSession,
        files: Vec<CandidateFile>,
    ) -> Result<BatchReport, IngestError> {
        self.add_files(session, files, &null_sender())
    }

    /// Ingest a batch, reporting progress on `events`
    pub fn add_files(
        &self,
        session: &SharedSession,
        files: Vec<CandidateFile>,
        events: &EventSender,
    ) -> Result<BatchReport, IngestError> {
        self.add_files_cancellable(session, files, events, &CancellationToken::new())
    }

    /// Ingest a batch that `token` can stop early.
    ///
    /// Fails only for batch-level problems: the capacity ceiling, a
    /// poisoned session, or a token already cancelled on entry. Per-file
    /// problems end up in [`BatchReport::failures`].
    pub fn add_files_cancellable(
        &self,
        session: &SharedSession,
        files: Vec<CandidateFile>,
        events: &EventSender,
        token: &CancellationToken,
    ) -> Result<BatchReport, IngestError> {
        if token.is_cancelled() {
            return Err(IngestError::Cancelled);
        }

        let reservation = match session.write()?.reserve(files.len()) {
            Ok(reservation) => reservation,
            Err(e) => {
                let error = IngestError::from(e);
                warn!(error = %error, "batch rejected");
                events.ingest(IngestEvent::Rejected {
                    message: error.to_string(),
                });
                return Err(error);
            }
        };

        self.run_admitted(session, reservation, files, events, token)
    }

    /// Process a batch whose slots are already reserved
    pub(crate) fn run_admitted(
        &self,
        session: &SharedSession,
        reservation: Reservation,
        files: Vec<CandidateFile>,
        events: &EventSender,
        token: &CancellationToken,
    ) -> Result<BatchReport, IngestError> {
        let started = Instant::now();

        let (images, others): (Vec<_>, Vec<_>) = files
            .into_iter()
            .partition(|file| self.filter.accepts_mime(&file.mime_type));

        let skipped: Vec<SkippedFile> = others
            .into_iter()
            .map(|file| {
                debug!(name = %file.name, mime = %file.mime_type, "skipping non-image");
                events.ingest(IngestEvent::FileSkipped {
                    name: file.name.clone(),
                    mime_type: file.mime_type.clone(),
                });
                SkippedFile {
                    name: file.name,
                    mime_type: file.mime_type,
                }
            })
            .collect();
        session.write()?.release(&reservation, skipped.len());

        let total_files = images.len();
        let total_bytes: u64 = images.iter().map(|f| f.size_bytes).sum();
        info!(files = total_files, bytes = total_bytes, skipped = skipped.len(), "batch admitted");
        events.ingest(IngestEvent::Started {
            total_files,
            total_bytes,
        });

        let tracker = ProgressTracker::new(total_files, total_bytes, self.config.tick_period);
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);

        let outcomes: Vec<FileOutcome> = thread::scope(|scope| {
            scope.spawn(|| run_ticker(&tracker, events, done_rx));

            let outcomes = images
                .into_par_iter()
                .map_init(
                    || PreviewRenderer::new(self.config.preview_edge),
                    |renderer, file| {
                        let size = file.size_bytes;
                        let outcome = self.ingest_one(session, &reservation, file, renderer, events, token);
                        tracker.record(size, events);
                        outcome
                    },
                )
                .collect();

            drop(done_tx);
            outcomes
        });

        let mut report = BatchReport {
            skipped,
            total_bytes,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Added => report.added += 1,
                FileOutcome::Failed(failure) => report.failures.push(failure),
                FileOutcome::Discarded => report.discarded += 1,
            }
        }
        session.write()?.release(&reservation, total_files - report.added);

        let final_progress = tracker.finish();
        report.duration_ms = tracker.elapsed().as_millis() as u64;
        events.ingest(IngestEvent::Throughput(final_progress.clone()));
        events.ingest(IngestEvent::Completed {
            summary: BatchSummary {
                added: report.added,
                skipped: report.skipped.len(),
                failed: report.failures.len(),
                discarded: report.discarded,
                total_bytes,
                duration_ms: report.duration_ms,
                bytes_per_second: final_progress.bytes_per_second,
            },
        });
        info!(
            added = report.added,
            failed = report.failures.len(),
            discarded = report.discarded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch completed"
        );

        Ok(report)
    }

    fn ingest_one(
        &self,
        session: &SharedSession,
        reservation: &Reservation,
        file: CandidateFile,
        renderer: &mut PreviewRenderer,
        events: &EventSender,
        token: &CancellationToken,
    ) -> FileOutcome {
        let name = file.name.clone();

        if token.is_cancelled() || !self.is_current(session, reservation) {
            token.cancel();
            return discard(name, events);
        }

        let photo = match self.build_photo(file, renderer) {
            Ok(photo) => photo,
            Err(e) => {
                warn!(name = %name, error = %e, "file failed");
                events.ingest(IngestEvent::FileFailed {
                    name: name.clone(),
                    message: e.to_string(),
                });
                return FileOutcome::Failed(FileFailure {
                    name,
                    reason: e.to_string(),
                });
            }
        };

        let id = photo.id;
        let committed = session
            .write()
            .and_then(|mut state| state.commit(reservation, photo));

        match committed {
            Ok(true) => {
                events.ingest(IngestEvent::PhotoAdded {
                    id: id.to_string(),
                    name,
                });
                FileOutcome::Added
            }
            Ok(false) => {
                token.cancel();
                discard(name, events)
            }
            Err(e) => {
                warn!(name = %name, error = %e, "commit failed");
                events.ingest(IngestEvent::FileFailed {
                    name: name.clone(),
                    message: e.to_string(),
                });
                FileOutcome::Failed(FileFailure {
                    name,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn is_current(&self, session: &SharedSession, reservation: &Reservation) -> bool {
        session
            .read()
            .map(|state| state.is_current(reservation))
            .unwrap_or(false)
    }

    /// Read, decode, extract, classify and preview one file
    fn build_photo(&self, file: CandidateFile, renderer: &mut PreviewRenderer) -> Result<Photo, FileError> {
        let name = file.name.clone();
        let mime_type = file.mime_type.clone();
        let size_bytes = file.size_bytes;
        let last_modified = file.last_modified;

        let bytes = file.read_bytes()?;
        let image = decode_image(&name, &bytes)?;
        let capture = extract_metadata(&bytes, last_modified);
        let season = self.config.season_policy.classify(Some(&capture.timestamp));
        let display = renderer.render(&name, &image)?;

        Ok(Photo {
            id: PhotoId::new(),
            dimensions: Dimensions {
                width: image.width(),
                height: image.height(),
            },
            location: capture.location_label(),
            name,
            mime_type,
            bytes,
            display,
            size_bytes,
            capture,
            season,
        })
    }
}

fn discard(name: String, events: &EventSender) -> FileOutcome {
    debug!(name = %name, "discarding photo from a cleared session");
    events.ingest(IngestEvent::PhotoDiscarded { name });
    FileOutcome::Discarded
}
