//! Batch progress accounting and the throughput ticker.

use crate::events::{EventSender, IngestEvent, IngestProgress};
use crossbeam_channel::{select, tick, Receiver};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default period between throughput updates
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Rounded percentage, capped at 100.
///
/// Falls back to file counts when the batch carries no bytes, so a batch
/// of empty files still ends at 100.
pub fn percent(bytes_processed: u64, total_bytes: u64, files_completed: usize, total_files: usize) -> u8 {
    let (done, total) = if total_bytes > 0 {
        (bytes_processed as f64, total_bytes as f64)
    } else if total_files > 0 {
        (files_completed as f64, total_files as f64)
    } else {
        return 100;
    };
    (done / total * 100.0).round().min(100.0) as u8
}

fn rate(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        bytes as f64 / secs
    } else {
        0.0
    }
}

#[derive(Debug, Default)]
struct Counters {
    files_completed: usize,
    bytes_processed: u64,
    bytes_at_last_tick: u64,
}

/// Shared across rayon workers and the ticker thread.
///
/// Snapshots are emitted while the lock is held so `Progress` events
/// arrive in completion order with non-decreasing counts.
#[derive(Debug)]
pub struct ProgressTracker {
    total_files: usize,
    total_bytes: u64,
    tick_period: Duration,
    started: Instant,
    counters: Mutex<Counters>,
}

impl ProgressTracker {
    pub fn new(total_files: usize, total_bytes: u64, tick_period: Duration) -> Self {
        Self {
            total_files,
            total_bytes,
            tick_period,
            started: Instant::now(),
            counters: Mutex::new(Counters::default()),
        }
    }

    fn snapshot(&self, counters: &Counters, bytes_per_second: f64) -> IngestProgress {
        IngestProgress {
            files_completed: counters.files_completed,
            total_files: self.total_files,
            bytes_processed: counters.bytes_processed,
            total_bytes: self.total_bytes,
            percent: percent(
                counters.bytes_processed,
                self.total_bytes,
                counters.files_completed,
                self.total_files,
            ),
            bytes_per_second,
        }
    }

    /// Count one finished file and emit `Progress`
    pub fn record(&self, bytes: u64, events: &EventSender) -> IngestProgress {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.files_completed += 1;
        counters.bytes_processed += bytes;

        let progress = self.snapshot(&counters, rate(counters.bytes_processed, self.started.elapsed()));
        events.ingest(IngestEvent::Progress(progress.clone()));
        progress
    }

    /// Instantaneous rate: bytes since the previous tick over one period
    pub fn tick(&self) -> IngestProgress {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let delta = counters.bytes_processed - counters.bytes_at_last_tick;
        counters.bytes_at_last_tick = counters.bytes_processed;
        self.snapshot(&counters, rate(delta, self.tick_period))
    }

    /// Final snapshot frozen at the batch total and its average rate
    pub fn finish(&self) -> IngestProgress {
        IngestProgress {
            files_completed: self.total_files,
            total_files: self.total_files,
            bytes_processed: self.total_bytes,
            total_bytes: self.total_bytes,
            percent: 100,
            bytes_per_second: self.average_rate(),
        }
    }

    pub fn average_rate(&self) -> f64 {
        rate(self.total_bytes, self.started.elapsed())
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Emit `Throughput` every tick until `done` is closed
pub fn run_ticker(tracker: &ProgressTracker, events: &EventSender, done: Receiver<()>) {
    let ticker = tick(tracker.tick_period);
    loop {
        select! {
            recv(ticker) -> _ => events.ingest(IngestEvent::Throughput(tracker.tick())),
            recv(done) -> _ => break,
        }
    }
}
