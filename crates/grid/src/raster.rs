//! Raster assembly: one minimum height per output cell.
//!
//! Rows are produced north to south and cells west to east within a row,
//! matching the top-to-bottom row order of the ESRI ASCII grid format.

use std::io::{self, Write};

use records::{Point2, Point3};

use crate::config::GridConfig;
use crate::spatial::{Bounds, QuadTree};

/// Geometry of the output grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub ncols: usize,
    pub nrows: usize,
    pub xllcorner: f64,
    pub yllcorner: f64,
    pub cellsize: f64,
    pub nodata_value: f64,
}

impl GridLayout {
    /// Lay out whole cells from the lower-left corner. Partial cells at the
    /// east and north edges are left out.
    pub fn new(lower_left: Point2, top_right: Point2, cellsize: f64, nodata_value: f64) -> Self {
        let span = top_right - lower_left;
        Self {
            ncols: (span.x / cellsize) as usize,
            nrows: (span.y / cellsize) as usize,
            xllcorner: lower_left.x,
            yllcorner: lower_left.y,
            cellsize,
            nodata_value,
        }
    }

    /// Create the layout from the grid settings.
    pub fn from_config(lower_left: Point2, top_right: Point2, config: &GridConfig) -> Self {
        Self::new(lower_left, top_right, config.cell_size, config.nodata_value)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.ncols * self.nrows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rectangle of a cell. Row 0 is the northern-most row.
    ///
    /// `col` and `row` must lie inside the grid.
    pub fn cell_bounds(&self, col: usize, row: usize) -> Bounds {
        debug_assert!(
            col < self.ncols && row < self.nrows,
            "cell ({col}, {row}) outside {}x{} grid",
            self.ncols,
            self.nrows
        );
        let n = (self.nrows - 1 - row) as f64;
        let e = col as f64;
        Bounds::new(
            self.xllcorner + e * self.cellsize,
            self.yllcorner + n * self.cellsize,
            self.xllcorner + (e + 1.0) * self.cellsize,
            self.yllcorner + (n + 1.0) * self.cellsize,
        )
    }

    /// Write the six header lines.
    pub fn write_header<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "ncols {}", self.ncols)?;
        writeln!(w, "nrows {}", self.nrows)?;
        writeln!(w, "xllcorner {:.6}", self.xllcorner)?;
        writeln!(w, "yllcorner {:.6}", self.yllcorner)?;
        writeln!(w, "cellsize {:.6}", self.cellsize)?;
        writeln!(w, "nodata_value {:.3}", self.nodata_value)
    }
}

/// Minimum height of `points`, or `nodata` when there are none.
#[inline]
pub fn reduce_min(points: &[Point3], nodata: f64) -> f64 {
    points.iter().map(|p| p.z).reduce(f64::min).unwrap_or(nodata)
}

/// Counters gathered while writing a raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub cells: usize,
    pub empty_cells: usize,
}

/// Minimum-height raster backed by a populated [`QuadTree`].
#[derive(Debug, Clone, Copy)]
pub struct Raster<'a> {
    tree: &'a QuadTree,
    layout: GridLayout,
}

impl<'a> Raster<'a> {
    pub fn new(tree: &'a QuadTree, layout: GridLayout) -> Self {
        Self { tree, layout }
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    fn cell_with(&self, col: usize, row: usize, scratch: &mut Vec<Point3>) -> f64 {
        scratch.clear();
        self.tree.query_bounds(&self.layout.cell_bounds(col, row), scratch);
        reduce_min(scratch, self.layout.nodata_value)
    }

    /// Value of a single cell. Row 0 is the northern-most row.
    ///
    /// `col` and `row` must lie inside the grid.
    pub fn cell(&self, col: usize, row: usize) -> f64 {
        self.cell_with(col, row, &mut Vec::new())
    }

    /// Values of one row, west to east.
    pub fn row(&self, row: usize) -> Vec<f64> {
        let mut scratch = Vec::new();
        (0..self.layout.ncols)
            .map(|col| self.cell_with(col, row, &mut scratch))
            .collect()
    }

    /// All rows, north to south.
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.layout.nrows).map(move |row| self.row(row))
    }

    /// Write the header and body as an ESRI ASCII grid.
    pub fn write_ascii_grid<W: Write>(&self, mut w: W) -> io::Result<RasterStats> {
        self.layout.write_header(&mut w)?;

        let mut stats = RasterStats::default();
        for values in self.rows() {
            for h in values {
                stats.cells += 1;
                if h == self.layout.nodata_value {
                    stats.empty_cells += 1;
                }
                write!(w, "{h:.3} ")?;
            }
            writeln!(w)?;
        }
        Ok(stats)
    }
}
