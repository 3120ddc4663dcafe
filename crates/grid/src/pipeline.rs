//! End-to-end rasterization: points in, ASCII grid out.

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use records::{Point2, PointReader};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::raster::{GridLayout, Raster};
use crate::spatial::QuadTree;

/// What happened during a [`rasterize`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterSummary {
    /// Point records read from the input.
    pub points_read: usize,
    /// Points stored in the index.
    pub points_accepted: usize,
    /// Points outside the extent, dropped.
    pub points_dropped: usize,
    pub ncols: usize,
    pub nrows: usize,
    /// Cells written as no-data.
    pub empty_cells: usize,
}

/// Build the index over `[lower_left, top_right)`, fill it from `input`, and
/// write the minimum-height grid to `output`.
///
/// The first malformed input line aborts the run.
pub fn rasterize<R, W>(
    input: R,
    mut output: W,
    lower_left: Point2,
    top_right: Point2,
    config: &Config,
) -> anyhow::Result<RasterSummary>
where
    R: BufRead,
    W: Write,
{
    config.validate()?;
    let grid = &config.grid;

    let start = Instant::now();
    let mut tree = QuadTree::build(lower_left, top_right, grid.leaf_size);
    info!("time to make quad: {:?}", start.elapsed());
    debug!("  depth {}, {} leaves", tree.depth(), tree.leaf_count());

    let start = Instant::now();
    let mut summary = RasterSummary::default();
    for point in PointReader::new(input) {
        let point = point.context("failed to read input points")?;
        summary.points_read += 1;
        if !tree.insert(point) {
            summary.points_dropped += 1;
        }
    }
    summary.points_accepted = tree.len();
    info!("time to populate quad: {:?}", start.elapsed());
    info!("  {} points stored", summary.points_accepted);
    if summary.points_dropped > 0 {
        warn!("{} points outside the extent were dropped", summary.points_dropped);
    }

    let start = Instant::now();
    let layout = GridLayout::from_config(lower_left, top_right, grid);
    let stats = Raster::new(&tree, layout)
        .write_ascii_grid(&mut output)
        .context("failed to write grid")?;
    output.flush().context("failed to write grid")?;
    info!("time to output: {:?}", start.elapsed());
    debug!("  {} of {} cells empty", stats.empty_cells, stats.cells);

    summary.ncols = layout.ncols;
    summary.nrows = layout.nrows;
    summary.empty_cells = stats.empty_cells;
    Ok(summary)
}
