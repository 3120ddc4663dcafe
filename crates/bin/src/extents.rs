//! extents - Print the bounding box of a point file.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use records::{Extents, PointReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "extents", version, about = "Print the minimum and maximum corners of a point file")]
struct Cli {
    /// Point file, whitespace-separated fields per line.
    input: PathBuf,
    /// Records carry only easting and northing.
    #[arg(long)]
    planar: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = File::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    let mut reader = PointReader::new(BufReader::new(file));

    let extents = if cli.planar {
        let mut extents = Extents::planar();
        while let Some(point) = reader.next_planar() {
            extents.include_planar(point.context("failed to read points")?);
        }
        extents
    } else {
        let mut extents = Extents::new();
        for point in reader.by_ref() {
            extents.include(point.context("failed to read points")?);
        }
        extents
    };

    debug!("{} points over {} lines", extents.count(), reader.line());
    if extents.is_empty() {
        warn!("{} holds no points", cli.input.display());
    }
    print!("{extents}");

    Ok(())
}
