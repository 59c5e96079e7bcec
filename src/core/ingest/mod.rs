//! # Ingest Module
//!
//! Turns a batch of [`CandidateFile`]s into session photos.
//!
//! ## Batch lifecycle
//! 1. Capacity check against the whole batch (non-images included);
//!    rejection leaves the session untouched
//! 2. Non-image files are dropped
//! 3. Each image is read, decoded, tagged, classified and previewed in
//!    parallel, then committed as soon as it finishes
//! 4. `Completed` fires once every file has succeeded, failed or been
//!    discarded
//!
//! ## Example
//! ```rust,ignore
//! use seasonal_gallery::core::ingest::Ingestor;
//!
//! let ingestor = Ingestor::builder().capacity(500).build();
//! let session = ingestor.new_session();
//! let report = ingestor.add_files_quiet(&session, files)?;
//! println!("{} added, {} failed", report.added, report.failures.len());
//! ```

mod executor;
mod progress;

pub use progress::{percent, ProgressTracker, DEFAULT_TICK};

use crate::core::decode::DEFAULT_PREVIEW_EDGE;
use crate::core::scanner::MimeFilter;
use crate::core::season::{Season, SeasonPolicy};
use crate::core::session::{SharedSession, DEFAULT_CAPACITY};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Settings for an [`Ingestor`]
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Photo ceiling for sessions created by the ingestor
    pub capacity: usize,
    /// Period between throughput updates
    pub tick_period: Duration,
    /// Longest preview edge in pixels
    pub preview_edge: u32,
    /// MIME prefix a file must carry to be ingested
    pub accepted_mime_prefix: String,
    pub season_policy: SeasonPolicy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            tick_period: progress::DEFAULT_TICK,
            preview_edge: DEFAULT_PREVIEW_EDGE,
            accepted_mime_prefix: "image/".to_string(),
            season_policy: SeasonPolicy::default(),
        }
    }
}

/// Builder for [`Ingestor`]
#[derive(Debug, Default)]
pub struct IngestorBuilder {
    config: IngestConfig,
}

impl IngestorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn tick_period(mut self, period: Duration) -> Self {
        self.config.tick_period = period;
        self
    }

    pub fn preview_edge(mut self, edge: u32) -> Self {
        self.config.preview_edge = edge;
        self
    }

    pub fn accepted_mime_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.accepted_mime_prefix = prefix.into();
        self
    }

    /// Season used when a photo has no capture time
    pub fn fallback_season(mut self, season: Season) -> Self {
        self.config.season_policy = SeasonPolicy::with_fallback(season);
        self
    }

    pub fn config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Ingestor {
        let filter = MimeFilter::new().with_prefix(self.config.accepted_mime_prefix.clone());
        Ingestor {
            config: self.config,
            filter,
        }
    }
}

/// Batch ingestion engine. Cheap to share; holds no session state.
#[derive(Debug, Clone)]
pub struct Ingestor {
    config: IngestConfig,
    filter: MimeFilter,
}

impl Ingestor {
    pub fn builder() -> IngestorBuilder {
        IngestorBuilder::new()
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// An empty session using the configured ceiling
    pub fn new_session(&self) -> SharedSession {
        SharedSession::with_capacity(self.config.capacity)
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        IngestorBuilder::new().build()
    }
}

/// Cooperative cancellation flag for one batch.
///
/// Files that have not started when the token trips are discarded.
/// Clearing the session trips it automatically.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A file that could not become a photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub name: String,
    pub reason: String,
}

/// A candidate dropped for not being an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub name: String,
    pub mime_type: String,
}

/// Outcome of one batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Photos committed to the session
    pub added: usize,
    pub skipped: Vec<SkippedFile>,
    pub failures: Vec<FileFailure>,
    /// Files dropped because the session was cleared or the batch cancelled
    pub discarded: usize,
    /// Bytes of the image files in the batch
    pub total_bytes: u64,
    pub duration_ms: u64,
}

impl BatchReport {
    /// Image files that reached a terminal state
    pub fn completed(&self) -> usize {
        self.added + self.failures.len() + self.discarded
    }
}
