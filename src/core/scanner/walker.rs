//! Directory walking implementation using walkdir.

use super::{filter::MimeFilter, CandidateFile, CandidateScanner, ScanResult};
use crate::error::ScanError;
use crate::events::{null_sender, EventSender, ScanEvent};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: MimeFilter,
}

impl WalkDirScanner {
    pub fn new(config: ScanConfig) -> Self {
        let filter = MimeFilter::new().with_hidden(config.include_hidden);
        Self { config, filter }
    }

    /// Scan one root. A root that is a plain file yields just that file.
    fn scan_root(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<(Vec<CandidateFile>, Vec<ScanError>), ScanError> {
        if !root.exists() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        let mut errors = Vec::new();

        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || self.filter.should_visit(entry.path()));

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    let error = ScanError::ReadDirectory {
                        path: path.clone(),
                        source: std::io::Error::other(e.to_string()),
                    };
                    events.scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    });
                    errors.push(error);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match CandidateFile::from_path(entry.path()) {
                Ok(file) => {
                    events.scan(ScanEvent::FileFound {
                        path: entry.path().to_path_buf(),
                    });
                    files.push(file);
                }
                Err(source) => {
                    let error = ScanError::ReadDirectory {
                        path: entry.path().to_path_buf(),
                        source,
                    };
                    events.scan(ScanEvent::Error {
                        path: entry.path().to_path_buf(),
                        message: error.to_string(),
                    });
                    errors.push(error);
                }
            }
        }

        debug!(root = %root.display(), found = files.len(), "scanned root");
        Ok((files, errors))
    }
}

impl CandidateScanner for WalkDirScanner {
    fn scan(&self, paths: &[PathBuf]) -> Result<ScanResult, ScanError> {
        self.scan_with_events(paths, &null_sender())
    }

    fn scan_with_events(
        &self,
        paths: &[PathBuf],
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        events.scan(ScanEvent::Started {
            paths: paths.to_vec(),
        });

        let mut all_files = Vec::new();
        let mut all_errors = Vec::new();

        for path in paths {
            match self.scan_root(path, events) {
                Ok((files, errors)) => {
                    all_files.extend(files);
                    all_errors.extend(errors);
                }
                Err(e) => all_errors.push(e),
            }
        }

        events.scan(ScanEvent::Completed {
            total_files: all_files.len(),
        });

        Ok(ScanResult {
            files: all_files,
            errors: all_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    fn names(result: &ScanResult) -> Vec<String> {
        result.files.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp = TempDir::new().unwrap();
        let scanner = WalkDirScanner::new(ScanConfig::default());

        let result = scanner.scan(&[temp.path().to_path_buf()]).unwrap();

        assert!(result.files.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_keeps_non_images_for_the_ingestor() {
        let temp = TempDir::new().unwrap();
        temp.child("a.jpg").write_binary(&[0xFF, 0xD8]).unwrap();
        temp.child("notes.txt").write_str("hello").unwrap();

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[temp.path().to_path_buf()]).unwrap();

        assert_eq!(names(&result), vec!["a.jpg", "notes.txt"]);
        assert_eq!(result.files[1].mime_type, "text/plain");
    }

    #[test]
    fn scan_finds_nested_files() {
        let temp = TempDir::new().unwrap();
        temp.child("2024/march/a.jpg").write_binary(&[1]).unwrap();
        temp.child("2024/june/b.png").write_binary(&[2]).unwrap();

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[temp.path().to_path_buf()]).unwrap();

        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn scan_skips_hidden_directories() {
        let temp = TempDir::new().unwrap();
        temp.child(".thumbnails/a.jpg").write_binary(&[1]).unwrap();
        temp.child(".b.jpg").write_binary(&[1]).unwrap();
        temp.child("c.jpg").write_binary(&[1]).unwrap();

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[temp.path().to_path_buf()]).unwrap();
        assert_eq!(names(&result), vec!["c.jpg"]);

        let scanner = WalkDirScanner::new(ScanConfig {
            include_hidden: true,
            ..Default::default()
        });
        let result = scanner.scan(&[temp.path().to_path_buf()]).unwrap();
        assert_eq!(result.files.len(), 3);
    }

    #[test]
    fn scan_respects_max_depth() {
        let temp = TempDir::new().unwrap();
        temp.child("top.jpg").write_binary(&[1]).unwrap();
        temp.child("deep/nested.jpg").write_binary(&[1]).unwrap();

        let scanner = WalkDirScanner::new(ScanConfig {
            max_depth: Some(1),
            ..Default::default()
        });
        let result = scanner.scan(&[temp.path().to_path_buf()]).unwrap();
        assert_eq!(names(&result), vec!["top.jpg"]);
    }

    #[test]
    fn scan_accepts_single_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("single.jpg");
        file.write_binary(&[1, 2]).unwrap();

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[file.path().to_path_buf()]).unwrap();
        assert_eq!(names(&result), vec!["single.jpg"]);
    }

    #[test]
    fn missing_root_is_reported_not_fatal() {
        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner
            .scan(&[PathBuf::from("/nonexistent/path/that/does/not/exist")])
            .unwrap();

        assert!(result.files.is_empty());
        assert!(matches!(
            result.errors[0],
            ScanError::DirectoryNotFound { .. }
        ));
    }
}
