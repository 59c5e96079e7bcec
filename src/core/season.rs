//! Season classification.
//!
//! Months map to fixed buckets with no notion of hemisphere or locale:
//! 3-5 spring, 6-8 summer, 9-11 autumn, 12/1/2 winter.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four season buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// All seasons in display order
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Bucket for a calendar month (1-12). Out-of-range months land in winter.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            other => Err(format!("unknown season: {other}")),
        }
    }
}

/// What to do with a photo that has no capture time.
///
/// The fallback is an arbitrary default, not a guess at the likely season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonPolicy {
    pub fallback: Season,
}

impl SeasonPolicy {
    pub fn with_fallback(fallback: Season) -> Self {
        Self { fallback }
    }

    /// Classify an optional timestamp
    pub fn classify(&self, timestamp: Option<&NaiveDateTime>) -> Season {
        match timestamp {
            Some(ts) => Season::from_month(ts.month()),
            None => self.fallback,
        }
    }
}

impl Default for SeasonPolicy {
    fn default() -> Self {
        Self {
            fallback: Season::Spring,
        }
    }
}

/// Classify with the default policy (absent timestamp means spring)
pub fn classify(timestamp: Option<&NaiveDateTime>) -> Season {
    SeasonPolicy::default().classify(timestamp)
}
