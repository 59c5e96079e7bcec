//! Settings file for the command line.
//!
//! Looked up at `--config` if given, else `<config dir>/seasonal-gallery/config.json`.
//! A missing default file is not an error. Command-line flags override
//! whatever the file says.

use crate::core::ingest::IngestConfig;
use crate::core::season::{Season, SeasonPolicy};
use crate::error::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://gallery.local/album";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub base_url: Option<String>,
    pub capacity: Option<usize>,
    pub fallback_season: Option<Season>,
    pub include_hidden: Option<bool>,
    pub preview_edge: Option<u32>,
}

impl GalleryConfig {
    /// Default location of the settings file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("seasonal-gallery").join("config.json"))
    }

    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| GalleryError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = serde_json::from_str(&text)
            .map_err(|e| GalleryError::Config(format!("invalid {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(config)
    }

    /// Values from `other` win where set
    pub fn merge(self, other: GalleryConfig) -> Self {
        Self {
            base_url: other.base_url.or(self.base_url),
            capacity: other.capacity.or(self.capacity),
            fallback_season: other.fallback_season.or(self.fallback_season),
            include_hidden: other.include_hidden.or(self.include_hidden),
            preview_edge: other.preview_edge.or(self.preview_edge),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn include_hidden(&self) -> bool {
        self.include_hidden.unwrap_or(false)
    }

    pub fn ingest_config(&self) -> IngestConfig {
        let defaults = IngestConfig::default();
        IngestConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            preview_edge: self.preview_edge.unwrap_or(defaults.preview_edge),
            season_policy: self
                .fallback_season
                .map(SeasonPolicy::with_fallback)
                .unwrap_or(defaults.season_policy),
            ..defaults
        }
    }
}
