//! Integration tests for batch ingestion.
//!
//! These tests verify end-to-end ingestion behavior including:
//! - EXIF capture time, camera and GPS resolution
//! - Capacity rejection
//! - Corrupt files reaching a terminal state
//! - Files discovered on disk by the scanner

mod common;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use common::{candidate, dated_jpeg, exif_jpeg, plain_jpeg, Tags};
use predicates::prelude::*;
use seasonal_gallery::core::ingest::Ingestor;
use seasonal_gallery::core::metadata::{Location, TimestampSource};
use seasonal_gallery::core::scanner::{CandidateFile, CandidateScanner, ScanConfig, WalkDirScanner};
use seasonal_gallery::core::season::Season;
use seasonal_gallery::error::IngestError;
use seasonal_gallery::events::{EventChannel, IngestEvent};
use std::time::UNIX_EPOCH;

#[test]
fn exif_tags_flow_into_the_photo() {
    let bytes = exif_jpeg(&Tags {
        date_time_original: Some("2023:07:14 18:30:00"),
        make: Some("FUJIFILM"),
        model: Some("X100V"),
        gps_latitude: Some(([40, 26, 46], "N")),
        gps_longitude: Some(([79, 58, 56], "W")),
        ..Default::default()
    });

    let ingestor = Ingestor::default();
    let session = ingestor.new_session();
    ingestor
        .add_files_quiet(&session, vec![candidate("pittsburgh.jpg", bytes)])
        .unwrap();

    let state = session.read().unwrap();
    let photo = &state.photos()[0];

    assert_eq!(photo.captured_at().to_string(), "2023-07-14 18:30:00");
    assert_eq!(photo.capture.timestamp_source, TimestampSource::Original);
    assert_eq!(photo.season, Season::Summer);
    assert_eq!(photo.camera_label(), "FUJIFILM X100V");
    assert_eq!(photo.location, "GPS: 40.446111, -79.982222");
    assert!(photo.capture.location.is_known());
}

#[test]
fn digitized_time_is_used_when_original_missing() {
    let bytes = exif_jpeg(&Tags {
        date_time_digitized: Some("2022:11:02 08:00:00"),
        ..Default::default()
    });

    let ingestor = Ingestor::default();
    let session = ingestor.new_session();
    ingestor
        .add_files_quiet(&session, vec![candidate("a.jpg", bytes)])
        .unwrap();

    let state = session.read().unwrap();
    let photo = &state.photos()[0];
    assert_eq!(photo.capture.timestamp_source, TimestampSource::Digitized);
    assert_eq!(photo.season, Season::Autumn);
}

#[test]
fn missing_tags_fall_back_to_sentinels_and_file_time() {
    let ingestor = Ingestor::default();
    let session = ingestor.new_session();
    ingestor
        .add_files_quiet(&session, vec![candidate("bare.jpg", plain_jpeg(8, 8))])
        .unwrap();

    let state = session.read().unwrap();
    let photo = &state.photos()[0];
    assert_eq!(photo.capture.timestamp_source, TimestampSource::FileModified);
    assert_eq!(photo.camera_label(), "unknown unknown");
    assert_eq!(photo.capture.location, Location::Unknown);
    assert_eq!(photo.location, "unknown location");
}

#[test]
fn incomplete_gps_is_unknown() {
    let bytes = exif_jpeg(&Tags {
        date_time_original: Some("2024:01:01 00:00:00"),
        gps_latitude: Some(([51, 30, 0], "N")),
        ..Default::default()
    });

    let ingestor = Ingestor::default();
    let session = ingestor.new_session();
    ingestor
        .add_files_quiet(&session, vec![candidate("a.jpg", bytes)])
        .unwrap();

    let state = session.read().unwrap();
    assert_eq!(state.photos()[0].location, "unknown location");
    assert_eq!(state.photos()[0].season, Season::Winter);
}

#[test]
fn batch_over_capacity_leaves_session_unchanged() {
    let ingestor = Ingestor::builder().capacity(4).build();
    let session = ingestor.new_session();
    ingestor
        .add_files_quiet(
            &session,
            vec![
                candidate("a.jpg", plain_jpeg(4, 4)),
                candidate("b.jpg", plain_jpeg(4, 4)),
            ],
        )
        .unwrap();

    let (sender, receiver) = EventChannel::new();
    let batch: Vec<CandidateFile> = (0..3)
        .map(|i| candidate(&format!("{i}.jpg"), plain_jpeg(4, 4)))
        .collect();
    let error = ingestor.add_files(&session, batch, &sender).unwrap_err();

    assert!(matches!(error, IngestError::CapacityExceeded { .. }));
    assert!(predicate::str::contains("4").eval(&error.to_string()));
    assert_eq!(session.size().unwrap(), 2);

    let events = receiver.drain_ingest();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], IngestEvent::Rejected { .. }));
}

#[test]
fn corrupt_and_truncated_files_still_complete_the_batch() {
    let mut truncated = dated_jpeg("2024:04:01 10:00:00");
    truncated.truncate(40);

    let ingestor = Ingestor::default();
    let session = ingestor.new_session();
    let (sender, receiver) = EventChannel::new();

    let report = ingestor
        .add_files(
            &session,
            vec![
                candidate("good.jpg", dated_jpeg("2024:04:01 10:00:00")),
                candidate("garbage.jpg", b"definitely not a jpeg".to_vec()),
                candidate("truncated.jpg", truncated),
                candidate("empty.jpg", Vec::new()),
            ],
            &sender,
        )
        .unwrap();

    assert_eq!(report.added, 1);
    assert_eq!(report.failures.len(), 3);
    assert_eq!(report.completed(), 4);

    let events = receiver.drain_ingest();
    let failed = events
        .iter()
        .filter(|e| matches!(e, IngestEvent::FileFailed { .. }))
        .count();
    assert_eq!(failed, 3);
    assert!(matches!(
        events.last(),
        Some(IngestEvent::Completed { summary }) if summary.failed == 3 && summary.added == 1
    ));
}

#[test]
fn non_images_are_dropped_silently() {
    let ingestor = Ingestor::default();
    let session = ingestor.new_session();

    let report = ingestor
        .add_files_quiet(
            &session,
            vec![
                candidate("a.jpg", plain_jpeg(4, 4)),
                CandidateFile::from_bytes("clip.mp4", "video/mp4", vec![0; 32], UNIX_EPOCH),
                CandidateFile::from_bytes("doc.pdf", "application/pdf", vec![0; 32], UNIX_EPOCH),
            ],
        )
        .unwrap();

    assert_eq!(report.added, 1);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.failures.is_empty());
    assert_eq!(session.size().unwrap(), 1);
}

#[test]
fn progress_reaches_one_hundred_percent() {
    let ingestor = Ingestor::default();
    let session = ingestor.new_session();
    let (sender, receiver) = EventChannel::new();
    let files: Vec<CandidateFile> = (0..5)
        .map(|i| candidate(&format!("{i}.jpg"), plain_jpeg(16, 16)))
        .collect();
    let total: u64 = files.iter().map(|f| f.size_bytes).sum();

    let report = ingestor.add_files(&session, files, &sender).unwrap();
    assert_eq!(report.total_bytes, total);

    let percents: Vec<u8> = receiver
        .drain_ingest()
        .into_iter()
        .filter_map(|e| match e {
            IngestEvent::Progress(p) => Some(p.percent),
            _ => None,
        })
        .collect();

    assert_eq!(percents.len(), 5);
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(percents.last(), Some(&100));
}

#[test]
fn scanned_directory_is_ingested() {
    let temp = TempDir::new().unwrap();
    temp.child("spring/a.jpg")
        .write_binary(&dated_jpeg("2024:04:20 09:00:00"))
        .unwrap();
    temp.child("winter/b.jpg")
        .write_binary(&dated_jpeg("2024:12:24 19:00:00"))
        .unwrap();
    temp.child("readme.txt").write_str("not a photo").unwrap();

    let scanner = WalkDirScanner::new(ScanConfig::default());
    let scan = scanner.scan(&[temp.path().to_path_buf()]).unwrap();
    assert_eq!(scan.files.len(), 3);

    let ingestor = Ingestor::default();
    let session = ingestor.new_session();
    let report = ingestor.add_files_quiet(&session, scan.files).unwrap();

    assert_eq!(report.added, 2);
    assert_eq!(report.skipped[0].name, "readme.txt");

    let mut seasons: Vec<Season> = session
        .with_photos(|photos| photos.iter().map(|p| p.season).collect())
        .unwrap();
    seasons.sort();
    assert_eq!(seasons, vec![Season::Spring, Season::Winter]);
}

#[test]
fn clear_then_reingest_starts_fresh() {
    let ingestor = Ingestor::builder().capacity(2).build();
    let session = ingestor.new_session();
    let batch = || {
        vec![
            candidate("a.jpg", plain_jpeg(4, 4)),
            candidate("b.jpg", plain_jpeg(4, 4)),
        ]
    };

    ingestor.add_files_quiet(&session, batch()).unwrap();
    assert!(ingestor.add_files_quiet(&session, batch()).is_err());

    session.clear().unwrap();
    let report = ingestor.add_files_quiet(&session, batch()).unwrap();

    assert_eq!(report.added, 2);
    assert_eq!(session.stats().unwrap().photo_count, 2);
}
