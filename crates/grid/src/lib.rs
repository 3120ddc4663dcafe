//! Minimum-height rasterization of point clouds.
//!
//! Points are indexed in a fixed-depth QuadTree over the output extent,
//! then every output cell is answered with a range query.

pub mod config;
pub mod pipeline;
pub mod raster;
pub mod spatial;

// Re-export commonly used types
pub use config::{Config, ConfigError, GridConfig};
pub use pipeline::{RasterSummary, rasterize};
pub use raster::{GridLayout, Raster, RasterStats, reduce_min};
pub use records::{Point2, Point3};
pub use spatial::{Bounds, QuadNode, QuadTree};
