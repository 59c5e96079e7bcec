//! # Error Module
//!
//! User-friendly error types for the seasonal gallery.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - file names, paths, the numbers involved
//! - **Batch vs. file** - batch-level errors abort a batch, file-level
//!   errors are collected and the batch carries on

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write output: {0}")]
    Output(String),
}

/// Errors that occur while discovering candidate files on disk
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Batch-level ingestion errors. These reject or abort a whole batch.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error(
        "At most {capacity} photos can be added: the session holds {current} and the batch has {incoming}"
    )]
    CapacityExceeded {
        current: usize,
        incoming: usize,
        capacity: usize,
    },

    #[error("Session unavailable: {0}")]
    Session(SessionError),

    #[error("Ingestion was cancelled")]
    Cancelled,
}

/// Errors for a single file. Never fatal to the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("Failed to read {name}: {reason}")]
    Read { name: String, reason: String },

    #[error("Failed to decode image {name}: {reason}")]
    Decode { name: String, reason: String },

    #[error("Image is empty or corrupted: {name}")]
    EmptyImage { name: String },

    #[error("Failed to render preview for {name}: {reason}")]
    Preview { name: String, reason: String },
}

/// Errors raised by the photo session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(
        "At most {capacity} photos can be added: the session holds {current} and the batch has {incoming}"
    )]
    CapacityExceeded {
        current: usize,
        incoming: usize,
        capacity: usize,
    },

    #[error("Photo {id} is already in the session")]
    DuplicateId { id: String },

    #[error("No photo at index {index} (session holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Session state is poisoned; restart the session")]
    Poisoned,
}

impl From<SessionError> for IngestError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::CapacityExceeded {
                current,
                incoming,
                capacity,
            } => IngestError::CapacityExceeded {
                current,
                incoming,
                capacity,
            },
            other => IngestError::Session(other),
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, GalleryError>;
