//! QuadTree for spatial indexing of sampled points.
//!
//! The whole partition is built eagerly from the root extent: a node
//! subdivides until both of its sides are shorter than the leaf size.
//! Points only ever land in leaves, and leaves never split again, so a
//! dense region simply grows a long leaf.

use records::{Point2, Point3};

/// Axis-aligned half-open rectangle `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Create bounds from the lower-left and top-right corners.
    #[inline]
    pub fn from_corners(lower_left: Point2, top_right: Point2) -> Self {
        Self::new(lower_left.x, lower_left.y, top_right.x, top_right.y)
    }

    #[inline]
    pub fn lower_left(&self) -> Point2 {
        Point2::new(self.min_x, self.min_y)
    }

    #[inline]
    pub fn top_right(&self) -> Point2 {
        Point2::new(self.max_x, self.max_y)
    }

    /// Check if a planar coordinate lies inside, lower bounds inclusive.
    #[inline]
    pub fn contains_planar(&self, p: Point2) -> bool {
        p.x >= self.min_x && p.x < self.max_x && p.y >= self.min_y && p.y < self.max_y
    }

    /// Check if a point lies inside. Height is ignored.
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        self.contains_planar(p.truncate())
    }

    /// Check whether a query rectangle may hold points of `self`.
    ///
    /// The test is deliberately loose on the upper edge of `self`: a query
    /// starting exactly at `max_x` still counts as overlapping. Leaves filter
    /// their points exactly, so this only costs a visit.
    #[inline]
    pub fn overlaps(&self, query: &Bounds) -> bool {
        !(query.max_x <= self.min_x
            || query.min_x > self.max_x
            || query.max_y <= self.min_y
            || query.min_y > self.max_y)
    }

    /// Get the width of the bounds.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the bounds.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Split into lower-left, lower-right, upper-left and upper-right halves.
    ///
    /// Inner edges are `min + half`, shared exactly between neighbours, so
    /// the four quadrants tile `self` without gaps or overlap.
    pub fn quadrants(&self) -> [Bounds; 4] {
        let mid_x = self.min_x + self.width() / 2.0;
        let mid_y = self.min_y + self.height() / 2.0;
        [
            Bounds::new(self.min_x, self.min_y, mid_x, mid_y),
            Bounds::new(mid_x, self.min_y, self.max_x, mid_y),
            Bounds::new(self.min_x, mid_y, mid_x, self.max_y),
            Bounds::new(mid_x, mid_y, self.max_x, self.max_y),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    Leaf(Vec<Point3>),
    Branch(Box<[QuadNode; 4]>),
}

/// One region of the partition.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadNode {
    bounds: Bounds,
    kind: NodeKind,
}

impl QuadNode {
    /// Recursively build the partition of `bounds`.
    pub fn build(bounds: Bounds, leaf_size: f64) -> Self {
        if bounds.width() < leaf_size && bounds.height() < leaf_size {
            return Self {
                bounds,
                kind: NodeKind::Leaf(Vec::new()),
            };
        }

        let children = bounds.quadrants().map(|q| QuadNode::build(q, leaf_size));
        Self {
            bounds,
            kind: NodeKind::Branch(Box::new(children)),
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Children in lower-left, lower-right, upper-left, upper-right order.
    #[inline]
    pub fn children(&self) -> Option<&[QuadNode; 4]> {
        match &self.kind {
            NodeKind::Branch(children) => Some(&**children),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Points stored in a leaf, in insertion order. Empty for branches.
    #[inline]
    pub fn points(&self) -> &[Point3] {
        match &self.kind {
            NodeKind::Leaf(points) => points,
            NodeKind::Branch(_) => &[],
        }
    }

    /// Route a point down to its leaf. Returns false if it lies outside.
    fn insert(&mut self, p: Point3) -> bool {
        if !self.bounds.contains(p) {
            return false;
        }

        match &mut self.kind {
            NodeKind::Leaf(points) => {
                points.push(p);
                true
            }
            // Children tile the parent, so at most one accepts the point
            NodeKind::Branch(children) => children.iter_mut().any(|c| c.insert(p)),
        }
    }

    fn query(&self, query: &Bounds, out: &mut Vec<Point3>) {
        if !self.bounds.overlaps(query) {
            return;
        }

        match &self.kind {
            NodeKind::Leaf(points) => {
                out.extend(points.iter().copied().filter(|&p| query.contains(p)));
            }
            NodeKind::Branch(children) => {
                for child in children.iter() {
                    child.query(query, out);
                }
            }
        }
    }

    fn depth(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Branch(children) => {
                1 + children.iter().map(QuadNode::depth).max().unwrap_or(0)
            }
        }
    }
}

/// QuadTree over a fixed root extent.
///
/// Built once, then populated with [`QuadTree::insert`] and read with
/// [`QuadTree::query_range`]. Nodes are never added, removed or rebalanced
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadTree {
    root: QuadNode,
    leaf_size: f64,
    len: usize,
}

impl QuadTree {
    /// Build the full partition of `[lower_left, top_right)`.
    ///
    /// `top_right` must be strictly greater than `lower_left` on both axes,
    /// and both corners finite. A node becomes a leaf once both of its
    /// sides are strictly shorter than `leaf_size`.
    pub fn build(lower_left: Point2, top_right: Point2, leaf_size: f64) -> Self {
        Self {
            root: QuadNode::build(Bounds::from_corners(lower_left, top_right), leaf_size),
            leaf_size,
            len: 0,
        }
    }

    /// Insert a point into its leaf.
    ///
    /// Points outside the root extent are dropped and `false` is returned.
    #[inline]
    pub fn insert(&mut self, p: Point3) -> bool {
        let inserted = self.root.insert(p);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Find all points inside `[lower_left, top_right)`.
    pub fn query_range(&self, lower_left: Point2, top_right: Point2) -> Vec<Point3> {
        let mut result = Vec::new();
        self.query_bounds(&Bounds::from_corners(lower_left, top_right), &mut result);
        result
    }

    /// Append all points inside `query` to `out`.
    ///
    /// Results come in leaf order, leaves visited lower-left, lower-right,
    /// upper-left, upper-right.
    #[inline]
    pub fn query_bounds(&self, query: &Bounds, out: &mut Vec<Point3>) {
        self.root.query(query, out);
    }

    #[inline]
    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.root.bounds
    }

    #[inline]
    pub fn leaf_size(&self) -> f64 {
        self.leaf_size
    }

    /// Get the number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of subdivision levels below the root.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// All leaves, depth first in quadrant order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![&self.root] }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }
}

/// Depth-first iterator over the leaves of a [`QuadTree`].
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a QuadNode>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a QuadNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match &node.kind {
                NodeKind::Leaf(_) => return Some(node),
                NodeKind::Branch(children) => self.stack.extend(children.iter().rev()),
            }
        }
        None
    }
}
