//! Type filtering for candidate files.

use std::path::Path;

/// Decides which candidates are images and which paths are hidden
#[derive(Debug, Clone)]
pub struct MimeFilter {
    /// MIME prefix a candidate must carry to be ingested
    accepted_prefix: String,
    /// Whether to include hidden files
    include_hidden: bool,
}

impl MimeFilter {
    /// Accept `image/*`, skip hidden files
    pub fn new() -> Self {
        Self {
            accepted_prefix: "image/".to_string(),
            include_hidden: false,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Override the accepted MIME prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.accepted_prefix = prefix.into();
        self
    }

    /// Whether a declared MIME type is accepted (case-insensitive)
    pub fn accepts_mime(&self, mime_type: &str) -> bool {
        mime_type
            .trim()
            .to_ascii_lowercase()
            .starts_with(&self.accepted_prefix.to_ascii_lowercase())
    }

    /// Whether a path should be visited by the scanner
    pub fn should_visit(&self, path: &Path) -> bool {
        if self.include_hidden {
            return true;
        }
        !path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with('.'))
    }
}

impl Default for MimeFilter {
    fn default() -> Self {
        Self::new()
    }
}
