//! # Views Module
//!
//! Read-only projections of the session for renderers:
//! - [`SeasonGallery`]: photos bucketed by season
//! - [`Timeline`]: month groups in chronological order
//! - [`LocationGroups`]: photos pooled by location label
//!
//! Views borrow from the photo slice and never copy pixel data. They are
//! rebuilt on demand, so a removal or clear is reflected the next time a
//! view is built.

mod gallery;
mod locations;
mod timeline;

pub use gallery::{materialize, DisplayPhoto, SeasonGallery};
pub use locations::{group_by_location, LocationGroup, LocationGroups, LOCATION_PREVIEW_LIMIT};
pub use timeline::{build_timeline, MonthKey, Side, Timeline, TimelineGroup, TIMELINE_PREVIEW_LIMIT};

use crate::core::photo::Photo;
use serde::Serialize;

/// The photos a group renders explicitly, and how many more it holds
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Preview<'a> {
    pub shown: &'a [&'a Photo],
    /// Rendered as a single "+N" tile
    pub overflow: usize,
}

impl<'a> Preview<'a> {
    pub fn of(photos: &'a [&'a Photo], limit: usize) -> Self {
        let shown = &photos[..photos.len().min(limit)];
        Self {
            shown,
            overflow: photos.len() - shown.len(),
        }
    }
}

/// Partition by key; groups follow first occurrence, members keep input order
pub(crate) fn group_by_first_occurrence<'a, K, I, F>(photos: I, key: F) -> Vec<(K, Vec<&'a Photo>)>
where
    K: PartialEq,
    I: IntoIterator<Item = &'a Photo>,
    F: Fn(&Photo) -> K,
{
    let mut groups: Vec<(K, Vec<&'a Photo>)> = Vec::new();
    for photo in photos {
        let k = key(photo);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(photo),
            None => groups.push((k, vec![photo])),
        }
    }
    groups
}
