//! asc - Rasterize a point cloud into an ESRI ASCII grid of minimum heights.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use records::{Point2, parse_corner};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "asc", version, about = "Rasterize easting/northing/height points to an ASCII grid")]
struct Cli {
    /// Lower-left corner of the grid, as `easting,northing`.
    #[arg(long, value_parser = parse_corner, allow_hyphen_values = true)]
    ll: Point2,
    /// Top-right corner of the grid, as `easting,northing`.
    #[arg(long, value_parser = parse_corner, allow_hyphen_values = true)]
    tr: Point2,
    /// Input file, one `easting northing height` record per line.
    #[arg(long = "in")]
    input: PathBuf,
    /// Output ASCII grid file.
    #[arg(long = "out")]
    output: PathBuf,
    /// Optional TOML file overriding cell size, leaf size and no-data value.
    #[arg(long)]
    config: Option<PathBuf>,
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
    ensure!(
        cli.tr.x > cli.ll.x && cli.tr.y > cli.ll.y,
        "top-right corner {},{} must be north-east of lower-left corner {},{}",
        cli.tr.x,
        cli.tr.y,
        cli.ll.x,
        cli.ll.y
    );

    let config = grid::Config::load(cli.config.as_deref())?;
    info!("Extent: {},{} to {},{}", cli.ll.x, cli.ll.y, cli.tr.x, cli.tr.y);
    info!("  Cell size: {}", config.grid.cell_size);
    info!("  Leaf size: {}", config.grid.leaf_size);

    let input = File::open(&cli.input)
        .with_context(|| format!("failed to open input {}", cli.input.display()))?;
    let output = File::create(&cli.output)
        .with_context(|| format!("failed to create output {}", cli.output.display()))?;

    let summary = grid::rasterize(
        BufReader::new(input),
        BufWriter::new(output),
        cli.ll,
        cli.tr,
        &config,
    )?;
    info!(
        "Wrote {}x{} grid to {} ({} empty cells)",
        summary.ncols,
        summary.nrows,
        cli.output.display(),
        summary.empty_cells
    );

    Ok(())
}
