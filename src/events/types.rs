//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the gallery engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory scanning events
    Scan(ScanEvent),
    /// Batch ingestion events
    Ingest(IngestEvent),
}

/// Events while discovering candidate files on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { paths: Vec<PathBuf> },
    /// A candidate file was found
    FileFound { path: PathBuf },
    /// An error occurred but scanning continues
    Error { path: PathBuf, message: String },
    /// Scanning completed
    Completed { total_files: usize },
}

/// Events while ingesting one batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IngestEvent {
    /// The batch passed the capacity check and processing has begun
    Started {
        total_files: usize,
        total_bytes: u64,
    },
    /// The batch was rejected before any file was processed
    Rejected { message: String },
    /// A non-image file was dropped from the batch
    FileSkipped { name: String, mime_type: String },
    /// A photo was committed to the session
    PhotoAdded { id: String, name: String },
    /// A file could not be turned into a photo; the batch continues
    FileFailed { name: String, message: String },
    /// A finished photo was dropped because the session was cleared
    PhotoDiscarded { name: String },
    /// Updated after every finished file
    Progress(IngestProgress),
    /// Periodic transfer rate while the batch is in flight
    Throughput(IngestProgress),
    /// Every file in the batch reached a terminal state
    Completed { summary: BatchSummary },
}

/// Progress snapshot for a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestProgress {
    /// Files that reached a terminal state
    pub files_completed: usize,
    /// Image files in the batch
    pub total_files: usize,
    /// Bytes of the finished files
    pub bytes_processed: u64,
    /// Bytes of all image files in the batch
    pub total_bytes: u64,
    /// 0-100
    pub percent: u8,
    /// Processed bytes per second
    pub bytes_per_second: f64,
}

impl IngestProgress {
    /// Rate in MB/s, as shown in the upload panel
    pub fn megabytes_per_second(&self) -> f64 {
        self.bytes_per_second / (1024.0 * 1024.0)
    }
}

/// Summary of a finished batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
    pub discarded: usize,
    pub total_bytes: u64,
    pub duration_ms: u64,
    /// Average rate over the whole batch
    pub bytes_per_second: f64,
}
