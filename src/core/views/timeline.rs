//! Month-by-month timeline.

use super::{group_by_first_occurrence, Preview};
use crate::core::photo::Photo;
use chrono::{Datelike, Month};
use serde::Serialize;
use std::fmt;

/// Photos rendered per month before the "+N" tile
pub const TIMELINE_PREVIEW_LIMIT: usize = 6;

/// Calendar month a photo was captured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(photo: &Photo) -> Self {
        let ts = photo.captured_at();
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// "March 2024"
    pub fn label(&self) -> String {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| format!("{} {}", m.name(), self.year))
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Which side of the timeline spine a group is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineGroup<'a> {
    pub key: MonthKey,
    pub side: Side,
    /// Chronological; ties keep session order
    pub photos: Vec<&'a Photo>,
}

impl<'a> TimelineGroup<'a> {
    pub fn label(&self) -> String {
        self.key.label()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn preview(&self) -> Preview<'_> {
        Preview::of(&self.photos, TIMELINE_PREVIEW_LIMIT)
    }
}

/// Month groups, oldest first
#[derive(Debug, Clone, Default, Serialize)]
pub struct Timeline<'a> {
    pub groups: Vec<TimelineGroup<'a>>,
}

impl<'a> Timeline<'a> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineGroup<'a>> {
        self.groups.iter()
    }
}

/// Sort by capture time (stable) and partition by month
pub fn build_timeline(photos: &[Photo]) -> Timeline<'_> {
    let mut sorted: Vec<&Photo> = photos.iter().collect();
    sorted.sort_by_key(|photo| *photo.captured_at());

    let groups = group_by_first_occurrence(sorted, MonthKey::of)
        .into_iter()
        .enumerate()
        .map(|(index, (key, photos))| TimelineGroup {
            key,
            side: Side::for_index(index),
            photos,
        })
        .collect();

    Timeline { groups }
}
