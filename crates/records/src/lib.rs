//! Shared point record crate for pointgrid.
//!
//! This crate contains:
//! - Point types (planar and with height)
//! - Parsing of whitespace-separated point lines and `e,n` corners
//! - A line-oriented point reader
//! - Bounding-box accumulation over a point stream

mod error;
mod extents;
mod parse;

pub use error::RecordError;
pub use extents::Extents;
pub use parse::{PointReader, parse_corner, parse_point2, parse_point3};

/// Planar coordinate: `x` is easting, `y` is northing.
pub type Point2 = glam::DVec2;

/// Sampled point: `x` is easting, `y` is northing, `z` is height.
pub type Point3 = glam::DVec3;
