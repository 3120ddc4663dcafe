//! Bounding-box accumulation over a point stream.

use std::fmt;

use crate::{Point2, Point3};

/// Running minimum and maximum of each coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    min: Point3,
    max: Point3,
    count: usize,
    /// Only easting and northing are reported.
    planar: bool,
}

impl Extents {
    /// Empty extents over points with height.
    pub fn new() -> Self {
        Self {
            min: Point3::splat(f64::MAX),
            max: Point3::splat(-f64::MAX),
            count: 0,
            planar: false,
        }
    }

    /// Empty extents over planar points.
    pub fn planar() -> Self {
        Self {
            planar: true,
            ..Self::new()
        }
    }

    /// Grow the extents to cover `p`.
    #[inline]
    pub fn include(&mut self, p: Point3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
        self.count += 1;
    }

    /// Grow the easting and northing extents to cover `p`.
    #[inline]
    pub fn include_planar(&mut self, p: Point2) {
        self.min = self.min.min(p.extend(self.min.z));
        self.max = self.max.max(p.extend(self.max.z));
        self.count += 1;
    }

    #[inline]
    pub fn min(&self) -> Point3 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point3 {
        self.max
    }

    /// Number of points included.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for Extents {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Point3> for Extents {
    fn extend<I: IntoIterator<Item = Point3>>(&mut self, iter: I) {
        for p in iter {
            self.include(p);
        }
    }
}

impl fmt::Display for Extents {
    /// Two lines: the minimum corner then the maximum corner.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for corner in [self.min, self.max] {
            if self.planar {
                writeln!(f, "{:.10},{:.10}", corner.x, corner.y)?;
            } else {
                writeln!(f, "{:.10},{:.10},{:.10}", corner.x, corner.y, corner.z)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents_include() {
        let mut extents = Extents::new();
        assert!(extents.is_empty());

        extents.extend([
            Point3::new(5.0, -2.0, 10.0),
            Point3::new(-1.0, 8.0, 3.5),
            Point3::new(2.0, 0.0, 12.0),
        ]);

        assert_eq!(extents.count(), 3);
        assert_eq!(extents.min(), Point3::new(-1.0, -2.0, 3.5));
        assert_eq!(extents.max(), Point3::new(5.0, 8.0, 12.0));
    }

    #[test]
    fn test_extents_display() {
        let mut extents = Extents::new();
        extents.include(Point3::new(1.0, 2.0, 3.0));
        extents.include(Point3::new(4.0, 5.0, 6.25));
        assert_eq!(
            extents.to_string(),
            "1.0000000000,2.0000000000,3.0000000000\n4.0000000000,5.0000000000,6.2500000000\n"
        );
    }

    #[test]
    fn test_extents_planar() {
        let mut extents = Extents::planar();
        extents.include_planar(Point2::new(3.0, -4.0));
        extents.include_planar(Point2::new(-3.0, 4.0));
        assert_eq!(extents.min().truncate(), Point2::new(-3.0, -4.0));
        assert_eq!(extents.max().truncate(), Point2::new(3.0, 4.0));
        assert_eq!(
            extents.to_string(),
            "-3.0000000000,-4.0000000000\n3.0000000000,4.0000000000\n"
        );
    }
}
