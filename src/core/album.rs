//! All views of a session bundled for rendering, plus a share link.

use crate::core::photo::Photo;
use crate::core::views::{build_timeline, group_by_location, materialize, LocationGroups, SeasonGallery, Timeline};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct Album<'a> {
    pub gallery: SeasonGallery<'a>,
    pub timeline: Timeline<'a>,
    pub locations: LocationGroups<'a>,
    /// Opaque; nothing resolves it
    pub share_link: String,
    pub photo_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl<'a> Album<'a> {
    pub fn generate(photos: &'a [Photo], base_url: &str, now: DateTime<Utc>) -> Self {
        let album = Self {
            gallery: materialize(photos),
            timeline: build_timeline(photos),
            locations: group_by_location(photos),
            share_link: share_link(base_url, now),
            photo_count: photos.len(),
            generated_at: now,
        };
        info!(
            photos = album.photo_count,
            months = album.timeline.len(),
            locations = album.locations.len(),
            "album generated"
        );
        album
    }

    pub fn is_empty(&self) -> bool {
        self.photo_count == 0
    }

    /// Notice shown once the album is ready
    pub fn summary(&self) -> String {
        if self.is_empty() {
            "No photos yet. Add some to build an album.".to_string()
        } else {
            format!("Album generated with {} photos", self.photo_count)
        }
    }
}

/// `{base_url}?share={unix millis}`
pub fn share_link(base_url: &str, now: DateTime<Utc>) -> String {
    format!("{}?share={}", base_url, now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::Location;
    use crate::core::photo::fixtures::{gps, photo};
    use crate::core::season::Season;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_717_000_000_123).unwrap()
    }

    #[test]
    fn share_link_carries_millis() {
        assert_eq!(
            share_link("https://example.test/album", fixed_now()),
            "https://example.test/album?share=1717000000123"
        );
    }

    #[test]
    fn generate_builds_every_view() {
        let photos = vec![
            photo("p1", 2024, 3, 10, Location::Unknown),
            photo("p2", 2024, 6, 1, gps(1.0, 2.0)),
            photo("p3", 2024, 6, 20, gps(1.0, 2.0)),
        ];

        let album = Album::generate(&photos, "https://example.test", fixed_now());

        assert_eq!(album.photo_count, 3);
        assert_eq!(album.gallery.bucket(Season::Summer).len(), 2);
        assert_eq!(album.timeline.len(), 2);
        assert_eq!(album.locations.len(), 2);
        assert_eq!(album.summary(), "Album generated with 3 photos");
    }

    #[test]
    fn empty_album() {
        let album = Album::generate(&[], "https://example.test", fixed_now());

        assert!(album.is_empty());
        assert!(album.timeline.is_empty());
        assert!(album.locations.is_empty());
        assert_eq!(album.gallery.iter().count(), 4);
    }

    #[test]
    fn album_serializes_to_json() {
        let photos = vec![photo("p1", 2024, 3, 10, Location::Unknown)];
        let album = Album::generate(&photos, "https://example.test", fixed_now());

        let json = serde_json::to_value(&album).unwrap();
        assert_eq!(json["photo_count"], 1);
        assert_eq!(json["gallery"]["buckets"]["spring"][0]["title"], "Photo 1");
        assert_eq!(json["gallery"]["buckets"]["spring"][0]["name"], "p1");
    }
}
