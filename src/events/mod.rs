//! # Events Module
//!
//! Progress reporting for scans and ingestion batches.
//!
//! ## Design
//! The core emits events through channels so any UI (CLI, GUI, web shell)
//! can subscribe. Renderers update counters and progress bars from these
//! events and rebuild the derived views once `IngestEvent::Completed`
//! arrives.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Ingest(IngestEvent::Progress(p)) = event {
//!             println!("{}% ({:.2} MB/s)", p.percent, p.megabytes_per_second());
//!         }
//!     }
//! });
//!
//! ingestor.add_files(&session, files, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
