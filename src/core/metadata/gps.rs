//! GPS coordinate resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when a photo carries no usable GPS position
pub const UNKNOWN_LOCATION: &str = "unknown location";

/// Convert a degrees/minutes/seconds triplet to signed decimal degrees.
///
/// South and West references negate the result. Any other reference
/// (including an empty one) leaves it positive.
pub fn resolve_coordinate(dms: [f64; 3], reference: &str) -> f64 {
    let [degrees, minutes, seconds] = dms;
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;

    match reference.trim().to_ascii_uppercase().as_str() {
        "S" | "W" => -decimal,
        _ => decimal,
    }
}

/// Six-decimal rendering used for location labels
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.6}")
}

/// Where a photo was taken, as far as its tags tell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    Gps { latitude: f64, longitude: f64 },
    #[default]
    Unknown,
}

impl Location {
    /// Build from raw tag parts. Both triplets and both references are required.
    pub fn from_parts(
        latitude: Option<[f64; 3]>,
        latitude_ref: Option<&str>,
        longitude: Option<[f64; 3]>,
        longitude_ref: Option<&str>,
    ) -> Self {
        match (latitude, latitude_ref, longitude, longitude_ref) {
            (Some(lat), Some(lat_ref), Some(lon), Some(lon_ref)) => Location::Gps {
                latitude: resolve_coordinate(lat, lat_ref),
                longitude: resolve_coordinate(lon, lon_ref),
            },
            _ => Location::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Location::Gps { .. })
    }

    /// Grouping key and display string
    pub fn label(&self) -> String {
        match self {
            Location::Gps {
                latitude,
                longitude,
            } => format!(
                "GPS: {}, {}",
                format_coordinate(*latitude),
                format_coordinate(*longitude)
            ),
            Location::Unknown => UNKNOWN_LOCATION.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_and_east_stay_positive() {
        let lat = resolve_coordinate([35.0, 30.0, 0.0], "N");
        let lon = resolve_coordinate([139.0, 45.0, 36.0], "E");
        assert!((lat - 35.5).abs() < 1e-9);
        assert!((lon - 139.76).abs() < 1e-9);
    }

    #[test]
    fn south_and_west_negate() {
        assert!((resolve_coordinate([33.0, 52.0, 4.0], "S") + 33.867_777_777).abs() < 1e-6);
        assert!((resolve_coordinate([74.0, 0.0, 0.0], "W") + 74.0).abs() < 1e-9);
    }

    #[test]
    fn reference_is_case_and_whitespace_insensitive() {
        assert!(resolve_coordinate([10.0, 0.0, 0.0], " s ") < 0.0);
        assert!(resolve_coordinate([10.0, 0.0, 0.0], "w") < 0.0);
    }

    #[test]
    fn formatting_is_idempotent() {
        let value = resolve_coordinate([48.0, 51.0, 29.1], "N");
        let once = format_coordinate(value);
        let twice = format_coordinate(once.parse::<f64>().unwrap());
        assert_eq!(once, twice);
        assert_eq!(once, "48.858083");
    }

    #[test]
    fn location_requires_both_coordinates() {
        let only_lat = Location::from_parts(Some([1.0, 0.0, 0.0]), Some("N"), None, None);
        assert_eq!(only_lat, Location::Unknown);

        let missing_ref = Location::from_parts(
            Some([1.0, 0.0, 0.0]),
            Some("N"),
            Some([2.0, 0.0, 0.0]),
            None,
        );
        assert_eq!(missing_ref, Location::Unknown);
    }

    #[test]
    fn label_uses_six_decimals() {
        let location = Location::from_parts(
            Some([40.0, 26.0, 46.0]),
            Some("N"),
            Some([79.0, 58.0, 56.0]),
            Some("W"),
        );
        assert_eq!(location.label(), "GPS: 40.446111, -79.982222");
    }

    #[test]
    fn unknown_label_is_sentinel() {
        assert_eq!(Location::Unknown.label(), UNKNOWN_LOCATION);
        assert!(!Location::Unknown.is_known());
    }
}
