//! # CLI Module
//!
//! Command-line interface for the seasonal gallery.
//!
//! ## Usage
//! ```bash
//! # Build an album from a folder
//! gallery build ~/Pictures/2024
//!
//! # Several folders, photos without a date go to winter
//! gallery build ~/Pictures/trip ~/Downloads/phone --fallback-season winter
//!
//! # JSON output
//! gallery build ~/Pictures --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use seasonal_gallery::config::GalleryConfig;
use seasonal_gallery::core::album::Album;
use seasonal_gallery::core::ingest::{BatchReport, Ingestor};
use seasonal_gallery::core::scanner::{CandidateScanner, ScanConfig, WalkDirScanner};
use seasonal_gallery::core::season::Season;
use seasonal_gallery::core::views::Side;
use seasonal_gallery::error::{GalleryError, IngestError, Result};
use seasonal_gallery::events::{Event, EventChannel, IngestEvent, ScanEvent};
use std::path::PathBuf;
use std::thread;

/// Seasonal Gallery - your photos by season, month and place
#[derive(Parser, Debug)]
#[command(name = "gallery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest photos and print the album
    Build {
        /// Files or directories to ingest
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Base URL for the share link
        #[arg(long)]
        base_url: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Maximum photos per session
        #[arg(long)]
        capacity: Option<usize>,

        /// Season for photos without a capture time
        #[arg(long)]
        fallback_season: Option<Season>,

        /// Settings file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (one line per photo)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            paths,
            base_url,
            output,
            include_hidden,
            capacity,
            fallback_season,
            config,
            verbose,
        } => {
            seasonal_gallery::init_tracing(verbose);
            let flags = GalleryConfig {
                base_url,
                capacity,
                fallback_season,
                include_hidden: include_hidden.then_some(true),
                preview_edge: None,
            };
            let settings = GalleryConfig::load(config.as_deref())?.merge(flags);
            run_build(paths, settings, output, verbose)
        }
    }
}

fn run_build(paths: Vec<PathBuf>, settings: GalleryConfig, output: OutputFormat, verbose: bool) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(output, OutputFormat::Pretty);

    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("Seasonal Gallery").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let scanner = WalkDirScanner::new(ScanConfig {
        include_hidden: settings.include_hidden(),
        ..Default::default()
    });
    let ingestor = Ingestor::builder().config(settings.ingest_config()).build();
    let session = ingestor.new_session();

    let (sender, receiver) = EventChannel::new();

    // Progress bar for pretty output
    let progress = if pretty {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                .map_err(|e| GalleryError::Output(e.to_string()))?
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Scan(ScanEvent::Completed { total_files }) => {
                    pb.set_message(format!("{} files found", total_files));
                }
                Event::Ingest(IngestEvent::Started { total_bytes, .. }) => {
                    pb.set_length(total_bytes);
                }
                Event::Ingest(IngestEvent::Progress(p)) => {
                    pb.set_position(p.bytes_processed);
                    if verbose {
                        pb.set_message(format!("{}/{} files", p.files_completed, p.total_files));
                    }
                }
                Event::Ingest(IngestEvent::Throughput(p)) => {
                    pb.set_message(format!("{:.2} MB/s", p.megabytes_per_second()));
                }
                Event::Ingest(IngestEvent::FileFailed { name, message }) if verbose => {
                    pb.println(format!("  {} {}: {}", style("!").yellow(), name, message));
                }
                Event::Ingest(IngestEvent::Completed { .. }) | Event::Ingest(IngestEvent::Rejected { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let scan = scanner.scan_with_events(&paths, &sender)?;
    for error in &scan.errors {
        tracing::warn!(error = %error, "scan problem");
    }

    let ingested = ingestor.add_files(&session, scan.files, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let report = match ingested {
        Ok(report) => report,
        Err(error @ IngestError::CapacityExceeded { .. }) => {
            term.write_line(&format!("{} {}", style("✗").red().bold(), error)).ok();
            return Err(error.into());
        }
        Err(error) => return Err(error.into()),
    };

    let photos = session.read()?;
    let album = Album::generate(photos.photos(), settings.base_url(), chrono::Utc::now());

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &album, &report, photos.stats().total_megabytes(), verbose),
        OutputFormat::Json => print_json_results(&album, &report)?,
        OutputFormat::Minimal => print_minimal_results(&album),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, album: &Album<'_>, report: &BatchReport, megabytes: String, verbose: bool) {
    term.write_line(&format!("{} {}", style("✓").green().bold(), album.summary()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} photos, {} MB, ingested in {:.1}s",
        style(album.photo_count).cyan(),
        style(megabytes).cyan(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();
    if !report.skipped.is_empty() {
        term.write_line(&format!("  {} non-image files skipped", style(report.skipped.len()).dim()))
            .ok();
    }
    if !report.failures.is_empty() {
        term.write_line(&format!(
            "  {} files could not be read",
            style(report.failures.len()).yellow()
        ))
        .ok();
        if verbose {
            for failure in &report.failures {
                term.write_line(&format!("    {} {}", style("○").dim(), failure.reason))
                    .ok();
            }
        }
    }
    term.write_line("").ok();

    if album.is_empty() {
        return;
    }

    term.write_line(&format!("{}", style("Seasons:").bold().underlined()))
        .ok();
    for (season, photos) in album.gallery.iter() {
        term.write_line(&format!(
            "  {} ({})",
            style(capitalize(season.as_str())).bold(),
            photos.len()
        ))
        .ok();
        for shown in photos {
            term.write_line(&format!(
                "    {} {} · {} · {}",
                style(&shown.title).cyan(),
                shown.photo.name,
                shown.captured_at().format("%Y-%m-%d"),
                style(&shown.camera).dim()
            ))
            .ok();
        }
    }
    term.write_line("").ok();

    term.write_line(&format!("{}", style("Timeline:").bold().underlined()))
        .ok();
    for group in album.timeline.iter() {
        let marker = match group.side {
            Side::Left => "◀",
            Side::Right => "▶",
        };
        let preview = group.preview();
        let names: Vec<&str> = preview.shown.iter().map(|p| p.name.as_str()).collect();
        term.write_line(&format!(
            "  {} {} {}{}",
            style(marker).dim(),
            style(group.label()).bold(),
            names.join(", "),
            overflow_tile(preview.overflow)
        ))
        .ok();
    }
    term.write_line("").ok();

    term.write_line(&format!("{}", style("Places:").bold().underlined()))
        .ok();
    for group in album.locations.iter() {
        let preview = group.preview();
        let names: Vec<&str> = preview.shown.iter().map(|p| p.name.as_str()).collect();
        let label = if group.is_unknown() {
            style(group.location).dim()
        } else {
            style(group.location).yellow()
        };
        term.write_line(&format!(
            "  {} ({}) {}{}",
            label,
            group.len(),
            names.join(", "),
            overflow_tile(preview.overflow)
        ))
        .ok();
    }
    term.write_line("").ok();

    term.write_line(&format!("  {} {}", style("Share:").dim(), album.share_link))
        .ok();
}

fn print_json_results(album: &Album<'_>, report: &BatchReport) -> Result<()> {
    let output = serde_json::json!({
        "album": album,
        "report": report,
    });
    let text = serde_json::to_string_pretty(&output).map_err(|e| GalleryError::Output(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn print_minimal_results(album: &Album<'_>) {
    for (season, photos) in album.gallery.iter() {
        for shown in photos {
            println!("{}\t{}\t{}", season, shown.photo.name, shown.location());
        }
    }
    println!("{}", album.share_link);
}

fn overflow_tile(overflow: usize) -> String {
    if overflow > 0 {
        format!(" +{}", overflow)
    } else {
        String::new()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
