use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in local object space.
///
/// Invariant: `min[i] <= max[i]` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from two opposite corners, in any order.
    pub fn new(a: Point3<f32>, b: Point3<f32>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f32>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;

        let mut min_bound = first;
        let mut max_bound = first;
        for p in iter {
            min_bound = min_bound.inf(p);
            max_bound = max_bound.sup(p);
        }

        Some(Self {
            min: min_bound,
            max: max_bound,
        })
    }

    /// Component-wise min/max over a set of eight box corners.
    ///
    /// Feeding the eight corners of a box back in yields the same box.
    pub fn from_corners(corners: &[Point3<f32>; 8]) -> Self {
        // A corner array is never empty.
        let mut min_bound = corners[0];
        let mut max_bound = corners[0];
        for c in &corners[1..] {
            min_bound = min_bound.inf(c);
            max_bound = max_bound.sup(c);
        }
        Self {
            min: min_bound,
            max: max_bound,
        }
    }

    /// The eight corners, in the order x varies slowest and z fastest.
    pub fn corners(&self) -> [Point3<f32>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Raw per-axis size (`max - min`), possibly zero.
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Per-axis size with every component raised to at least `epsilon`.
    ///
    /// Flat boxes would otherwise divide by zero when normalizing.
    pub fn extent(&self, epsilon: f32) -> Vector3<f32> {
        self.size().map(|d| d.max(epsilon))
    }

    /// Midpoint between `min` and `max`.
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points() {
        let points = [
            Point3::new(1.0, -2.0, 0.5),
            Point3::new(-1.0, 3.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        let bb = Aabb::from_points(&points).unwrap();
        assert_eq!(bb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Point3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_from_points_empty() {
        let points: Vec<Point3<f32>> = Vec::new();
        assert!(Aabb::from_points(&points).is_none());
    }

    #[test]
    fn test_new_orders_corners() {
        let bb = Aabb::new(Point3::new(1.0, 0.0, 5.0), Point3::new(0.0, 2.0, -1.0));
        assert_eq!(bb.min, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(bb.max, Point3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_corners_round_trip() {
        let bb = Aabb::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 4.0, 2.5));
        let corners = bb.corners();
        assert!(corners.iter().all(|c| c.x == -1.0 || c.x == 3.0));
        assert_eq!(Aabb::from_corners(&corners), bb);
    }

    #[test]
    fn test_extent_clamps_flat_axis() {
        let bb = Aabb::new(Point3::new(0.0, 0.0, 1.0), Point3::new(2.0, 4.0, 1.0));
        assert_relative_eq!(bb.size().z, 0.0);

        let extent = bb.extent(1e-6);
        assert_relative_eq!(extent.x, 2.0);
        assert_relative_eq!(extent.y, 4.0);
        assert_relative_eq!(extent.z, 1e-6);
    }

    #[test]
    fn test_center() {
        let bb = Aabb::new(Point3::new(-2.0, 0.0, 0.0), Point3::new(2.0, 2.0, 4.0));
        assert_eq!(bb.center(), Point3::new(0.0, 1.0, 2.0));
    }
}
