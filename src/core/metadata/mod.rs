//! # Metadata Module
//!
//! Extracts capture metadata from photo bytes.
//!
//! ## Extracted Fields
//! - Capture time: DateTimeOriginal, then DateTimeDigitized, then the
//!   file's last-modified time
//! - Camera make and model (`"unknown"` when missing)
//! - GPS position (needs latitude, longitude and both hemisphere refs)
//!
//! Extraction never fails. Missing or malformed tags fall back and the
//! result is always a complete [`CaptureMetadata`].

mod gps;

pub use gps::{format_coordinate, resolve_coordinate, Location, UNKNOWN_LOCATION};

use chrono::{DateTime, Local, NaiveDateTime};
use exif::{Exif, In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::time::SystemTime;
use tracing::trace;

/// Placeholder for a missing camera make or model
pub const UNKNOWN_CAMERA: &str = "unknown";

/// Which source the capture time came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    Original,
    Digitized,
    FileModified,
}

/// Raw tag values as found in the file, before any fallback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureTags {
    pub date_time_original: Option<String>,
    pub date_time_digitized: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub gps_latitude: Option<[f64; 3]>,
    pub gps_latitude_ref: Option<String>,
    pub gps_longitude: Option<[f64; 3]>,
    pub gps_longitude_ref: Option<String>,
}

impl CaptureTags {
    /// Read tags from an image container (JPEG, TIFF, PNG, WebP, HEIF).
    ///
    /// Bytes without an EXIF block give an empty record.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut cursor = Cursor::new(bytes);
        match Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => Self::from_exif(&exif),
            Err(e) => {
                trace!(error = %e, "no readable EXIF block");
                Self::default()
            }
        }
    }

    pub fn from_exif(exif: &Exif) -> Self {
        let ascii = |tag| {
            exif.get_field(tag, In::PRIMARY)
                .and_then(|field| get_string_value(&field.value))
        };
        let triplet = |tag| {
            exif.get_field(tag, In::PRIMARY)
                .and_then(|field| get_rational_triplet(&field.value))
        };

        Self {
            date_time_original: ascii(Tag::DateTimeOriginal),
            date_time_digitized: ascii(Tag::DateTimeDigitized),
            make: ascii(Tag::Make),
            model: ascii(Tag::Model),
            gps_latitude: triplet(Tag::GPSLatitude),
            gps_latitude_ref: ascii(Tag::GPSLatitudeRef),
            gps_longitude: triplet(Tag::GPSLongitude),
            gps_longitude_ref: ascii(Tag::GPSLongitudeRef),
        }
    }
}

/// Fully resolved capture record. Every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureMetadata {
    /// Capture time as recorded, no timezone normalization
    pub timestamp: NaiveDateTime,
    pub timestamp_source: TimestampSource,
    pub camera_make: String,
    pub camera_model: String,
    pub location: Location,
}

impl CaptureMetadata {
    /// Apply the fallback chain to raw tags.
    pub fn resolve(tags: &CaptureTags, last_modified: SystemTime) -> Self {
        let (timestamp, timestamp_source) = resolve_timestamp(tags, last_modified);

        Self {
            timestamp,
            timestamp_source,
            camera_make: tags
                .make
                .clone()
                .unwrap_or_else(|| UNKNOWN_CAMERA.to_string()),
            camera_model: tags
                .model
                .clone()
                .unwrap_or_else(|| UNKNOWN_CAMERA.to_string()),
            location: Location::from_parts(
                tags.gps_latitude,
                tags.gps_latitude_ref.as_deref(),
                tags.gps_longitude,
                tags.gps_longitude_ref.as_deref(),
            ),
        }
    }

    /// Make and model joined by a space, sentinels included
    pub fn camera_label(&self) -> String {
        format!("{} {}", self.camera_make, self.camera_model)
    }

    pub fn location_label(&self) -> String {
        self.location.label()
    }
}

/// Extract capture metadata from raw image bytes
pub fn extract_metadata(bytes: &[u8], last_modified: SystemTime) -> CaptureMetadata {
    CaptureMetadata::resolve(&CaptureTags::from_bytes(bytes), last_modified)
}

fn resolve_timestamp(tags: &CaptureTags, last_modified: SystemTime) -> (NaiveDateTime, TimestampSource) {
    let candidates = [
        (&tags.date_time_original, TimestampSource::Original),
        (&tags.date_time_digitized, TimestampSource::Digitized),
    ];

    for (raw, source) in candidates {
        if let Some(ts) = raw.as_deref().and_then(parse_exif_datetime) {
            return (ts, source);
        }
    }

    (file_time_to_local(last_modified), TimestampSource::FileModified)
}

/// Wall-clock time of a filesystem timestamp in the local zone
pub fn file_time_to_local(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}

/// Parse an EXIF datetime string: "YYYY:MM:DD HH:MM:SS" and common variants
pub fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_matches('"').trim_end_matches('\0');

    const FORMATS: [&str; 5] = [
        "%Y:%m:%d %H:%M:%S",
        "%Y:%m:%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

/// First string of an EXIF ASCII value, trimmed; empty counts as missing
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}

/// Degrees/minutes/seconds from a three-element rational value
fn get_rational_triplet(value: &Value) -> Option<[f64; 3]> {
    match value {
        Value::Rational(vec) if vec.len() >= 3 => {
            let parts = [vec[0].to_f64(), vec[1].to_f64(), vec[2].to_f64()];
            parts.iter().all(|p| p.is_finite()).then_some(parts)
        }
        _ => None,
    }
}
