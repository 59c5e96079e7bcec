//! # Scanner Module
//!
//! Raw file handles handed to the ingestor, and a directory scanner that
//! produces them.
//!
//! A [`CandidateFile`] is what a file picker or drag-and-drop gives the
//! core: a name, a declared MIME type, a byte length, a last-modified
//! time and a way to read the content. The scanner does not filter by
//! type; non-image files are dropped by the ingestor.
//!
//! ## Example
//! ```rust,ignore
//! use seasonal_gallery::core::scanner::{CandidateScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(&["/Users/me/Pictures".into()])?;
//! ```

mod filter;
mod walker;

pub use filter::MimeFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::{FileError, ScanError};
use crate::events::EventSender;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// MIME type used when the extension tells us nothing
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Where a candidate's bytes live
#[derive(Debug, Clone)]
pub enum ByteSource {
    /// Already in memory (drag-and-drop, tests)
    Memory(Vec<u8>),
    /// Read lazily when the file is ingested
    Path(PathBuf),
}

/// A raw file handle submitted for ingestion
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub last_modified: SystemTime,
    pub source: ByteSource,
}

impl CandidateFile {
    /// In-memory handle with an explicit MIME type
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
        last_modified: SystemTime,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            last_modified,
            source: ByteSource::Memory(bytes),
        }
    }

    /// Handle for a file on disk. The MIME type comes from the extension;
    /// a platform without modification times yields "now".
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            mime_type: mime_for_path(path),
            size_bytes: metadata.len(),
            last_modified: metadata.modified().unwrap_or_else(|_| SystemTime::now()),
            source: ByteSource::Path(path.to_path_buf()),
        })
    }

    /// Read the content. Consumes the handle so in-memory bytes move
    /// into the photo without a copy.
    pub fn read_bytes(self) -> Result<Vec<u8>, FileError> {
        match self.source {
            ByteSource::Memory(bytes) => Ok(bytes),
            ByteSource::Path(path) => fs::read(&path).map_err(|e| FileError::Read {
                name: self.name,
                reason: e.to_string(),
            }),
        }
    }
}

/// Guess a MIME type from a path's extension
pub fn mime_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    pub files: Vec<CandidateFile>,
    /// Non-fatal problems met along the way
    pub errors: Vec<ScanError>,
}

/// Trait for candidate scanners
///
/// Implement this to feed the ingestor from another source (e.g., in tests).
pub trait CandidateScanner: Send + Sync {
    fn scan(&self, paths: &[PathBuf]) -> Result<ScanResult, ScanError>;

    fn scan_with_events(
        &self,
        paths: &[PathBuf],
        events: &EventSender,
    ) -> Result<ScanResult, ScanError>;
}
