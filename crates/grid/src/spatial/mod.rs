//! Spatial indexing utilities.
//!
//! Fixed-depth QuadTree over a rectangular extent, built once up front.

mod quadtree;

pub use quadtree::{Bounds, Leaves, QuadNode, QuadTree};
