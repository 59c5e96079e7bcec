//! Season buckets.

use crate::core::decode::DisplayImage;
use crate::core::photo::{Photo, PhotoId};
use crate::core::season::Season;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// A photo as shown in a gallery grid
#[derive(Debug, Clone, Serialize)]
pub struct DisplayPhoto<'a> {
    /// "Photo {n}", n being the 1-based position in the whole session
    pub title: String,
    pub camera: String,
    #[serde(flatten)]
    pub photo: &'a Photo,
}

impl<'a> DisplayPhoto<'a> {
    fn new(position: usize, photo: &'a Photo) -> Self {
        Self {
            title: format!("Photo {}", position + 1),
            camera: photo.camera_label(),
            photo,
        }
    }

    pub fn id(&self) -> PhotoId {
        self.photo.id
    }

    pub fn location(&self) -> &str {
        &self.photo.location
    }

    pub fn display(&self) -> &DisplayImage {
        &self.photo.display
    }

    pub fn captured_at(&self) -> &NaiveDateTime {
        self.photo.captured_at()
    }
}

/// Photos per season. All four seasons are always present.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonGallery<'a> {
    buckets: BTreeMap<Season, Vec<DisplayPhoto<'a>>>,
}

impl<'a> SeasonGallery<'a> {
    pub fn bucket(&self, season: Season) -> &[DisplayPhoto<'a>] {
        self.buckets.get(&season).map(Vec::as_slice).unwrap_or_default()
    }

    /// Seasons in spring, summer, autumn, winter order
    pub fn iter(&self) -> impl Iterator<Item = (Season, &[DisplayPhoto<'a>])> {
        self.buckets.iter().map(|(season, photos)| (*season, photos.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket photos by season in session order
pub fn materialize(photos: &[Photo]) -> SeasonGallery<'_> {
    let mut buckets: BTreeMap<Season, Vec<DisplayPhoto<'_>>> =
        Season::ALL.iter().map(|season| (*season, Vec::new())).collect();

    for (position, photo) in photos.iter().enumerate() {
        buckets
            .entry(photo.season)
            .or_default()
            .push(DisplayPhoto::new(position, photo));
    }

    SeasonGallery { buckets }
}
