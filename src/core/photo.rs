//! The ingested photo record.

use crate::core::decode::DisplayImage;
use crate::core::metadata::CaptureMetadata;
use crate::core::season::Season;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Session-unique photo identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Pixel dimensions of the decoded original
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One ingested image.
///
/// A `Photo` is only constructed once decoding and extraction are done, so
/// `capture`, `season` and `location` are always populated.
#[derive(Debug, Clone, Serialize)]
pub struct Photo {
    pub id: PhotoId,
    /// Original file name
    pub name: String,
    pub mime_type: String,
    /// Original file content, owned until the photo leaves the session
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub display: DisplayImage,
    pub dimensions: Dimensions,
    pub size_bytes: u64,
    pub capture: CaptureMetadata,
    /// Cached at ingestion; not recomputed if the season policy changes
    pub season: Season,
    /// Location label (GPS pair or the unknown sentinel)
    pub location: String,
}

impl Photo {
    pub fn captured_at(&self) -> &NaiveDateTime {
        &self.capture.timestamp
    }

    pub fn camera_label(&self) -> String {
        self.capture.camera_label()
    }
}
