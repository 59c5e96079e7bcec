//! # gallery CLI
//!
//! Command-line interface for the seasonal gallery.
//!
//! ## Usage
//! ```bash
//! gallery build ~/Pictures/2024
//! gallery build ~/Pictures --output json --base-url https://example.test/album
//! ```

mod cli;

use seasonal_gallery::Result;

fn main() -> Result<()> {
    cli::run()
}
