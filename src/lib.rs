//! # Seasonal Gallery
//!
//! Turns a pile of photos into an album: by season, along a month
//! timeline and by place.
//!
//! ## How it works
//! - Photos are ingested in batches; each one is decoded, its EXIF tags
//!   read and a preview rendered, all in parallel
//! - Missing metadata never fails a photo; every field has a fallback
//! - Views are rebuilt from the session on demand and borrow from it
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Ingestion, session state and views
//! - `events` - Event-driven progress reporting (UI-ready)
//! - `error` - User-friendly error types
//! - `config` - Settings file for the command line

pub mod config;
pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{GalleryError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or UI).
/// `RUST_LOG` wins; otherwise `verbose` selects debug over warn.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
