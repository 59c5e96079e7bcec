//! Photos pooled by location label.

use super::{group_by_first_occurrence, Preview};
use crate::core::metadata::UNKNOWN_LOCATION;
use crate::core::photo::Photo;
use serde::Serialize;

/// Photos rendered per location before the "+N" tile
pub const LOCATION_PREVIEW_LIMIT: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct LocationGroup<'a> {
    /// GPS label or the unknown-location sentinel
    pub location: &'a str,
    /// Session order
    pub photos: Vec<&'a Photo>,
}

impl<'a> LocationGroup<'a> {
    pub fn is_unknown(&self) -> bool {
        self.location == UNKNOWN_LOCATION
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn preview(&self) -> Preview<'_> {
        Preview::of(&self.photos, LOCATION_PREVIEW_LIMIT)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationGroups<'a> {
    pub groups: Vec<LocationGroup<'a>>,
}

impl<'a> LocationGroups<'a> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocationGroup<'a>> {
        self.groups.iter()
    }

    pub fn get(&self, location: &str) -> Option<&LocationGroup<'a>> {
        self.groups.iter().find(|g| g.location == location)
    }
}

/// Partition by location label in first-occurrence order
pub fn group_by_location(photos: &[Photo]) -> LocationGroups<'_> {
    let groups = group_by_first_occurrence(photos, |photo| photo.location.clone())
        .into_iter()
        .map(|(_, members)| {
            let first = members[0];
            LocationGroup {
                location: first.location.as_str(),
                photos: members,
            }
        })
        .collect();

    LocationGroups { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::Location;
    use crate::core::photo::fixtures::{gps, photo};

    #[test]
    fn unknown_location_is_a_normal_group() {
        let photos = vec![
            photo("a", 2024, 1, 1, Location::Unknown),
            photo("b", 2024, 1, 2, gps(48.858844, 2.294351)),
            photo("c", 2024, 1, 3, Location::Unknown),
        ];

        let groups = group_by_location(&photos);

        assert_eq!(groups.len(), 2);
        let unknown = &groups.groups[0];
        assert!(unknown.is_unknown());
        assert_eq!(unknown.len(), 2);
        assert_eq!(groups.groups[1].location, "GPS: 48.858844, 2.294351");
    }

    #[test]
    fn groups_keep_first_occurrence_and_session_order() {
        let paris = gps(48.858844, 2.294351);
        let tokyo = gps(35.658581, 139.745438);
        let photos = vec![
            photo("t1", 2024, 8, 1, tokyo),
            photo("p1", 2024, 1, 1, paris),
            photo("t2", 2023, 2, 1, tokyo),
            photo("p2", 2024, 3, 1, paris),
        ];

        let groups = group_by_location(&photos);
        let layout: Vec<(bool, Vec<&str>)> = groups
            .iter()
            .map(|g| {
                (
                    g.location.contains("35.658581"),
                    g.photos.iter().map(|p| p.name.as_str()).collect(),
                )
            })
            .collect();

        assert_eq!(layout, vec![(true, vec!["t1", "t2"]), (false, vec!["p1", "p2"])]);
    }

    #[test]
    fn preview_shows_at_most_four() {
        let photos: Vec<Photo> = (1..=7)
            .map(|day| photo("p", 2024, 1, day, Location::Unknown))
            .collect();

        let groups = group_by_location(&photos);
        let preview = groups.get(UNKNOWN_LOCATION).unwrap().preview();

        assert_eq!(preview.shown.len(), 4);
        assert_eq!(preview.overflow, 3);
    }
}
