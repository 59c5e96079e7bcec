//! # Core Module
//!
//! The UI-agnostic photo ingestion engine and its derived views.
//!
//! ## Modules
//! - `scanner` - Raw file handles and directory discovery
//! - `decode` - Pixel decoding and render-ready previews
//! - `metadata` - Capture time, camera and GPS from EXIF tags
//! - `season` - Month to season classification
//! - `ingest` - Parallel batch ingestion with progress events
//! - `session` - The capped, ordered photo collection
//! - `views` - Season gallery, timeline and location groups
//! - `album` - All views together plus a share link

pub mod album;
pub mod decode;
pub mod ingest;
pub mod metadata;
pub mod photo;
pub mod scanner;
pub mod season;
pub mod session;
pub mod views;

// Re-export commonly used types
pub use album::Album;
pub use ingest::{BatchReport, Ingestor};
pub use metadata::{CaptureMetadata, Location};
pub use photo::{Photo, PhotoId};
pub use scanner::CandidateFile;
pub use season::Season;
pub use session::{PhotoSession, SharedSession};
