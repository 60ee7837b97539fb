//! Axis-aligned bounding boxes

use crate::point::Point3f;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    /// A degenerate box at the origin
    pub fn empty() -> Self {
        Self {
            min: Point3f::origin(),
            max: Point3f::origin(),
        }
    }

    /// Compute the bounding box of a set of points
    pub fn from_points(points: &[Point3f]) -> Self {
        let Some(first) = points.first() else {
            return Self::empty();
        };
        let mut min = *first;
        let mut max = *first;
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Self { min, max }
    }

    /// The smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Point3f::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3f::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Center point of the box
    pub fn center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Length of the box diagonal
    pub fn diagonal(&self) -> f32 {
        (self.max - self.min).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_points() {
        let bb = Aabb::from_points(&[
            Point3f::new(-1.0, 2.0, 0.5),
            Point3f::new(3.0, -2.0, 0.0),
        ]);
        assert_eq!(bb.min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Point3f::new(3.0, 2.0, 0.5));
        assert_eq!(bb.center(), Point3f::new(1.0, 0.0, 0.25));
    }

    #[test]
    fn union_covers_both() {
        let a = Aabb::from_points(&[Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0)]);
        let b = Aabb::from_points(&[Point3f::new(-1.0, 0.0, 0.0), Point3f::new(0.5, 2.0, 0.5)]);
        let u = a.union(&b);
        assert_eq!(u.min, Point3f::new(-1.0, 0.0, 0.0));
        assert_eq!(u.max, Point3f::new(1.0, 2.0, 1.0));
    }
}
