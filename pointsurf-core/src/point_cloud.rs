//! Point cloud data structure

use crate::bounds::Aabb;
use crate::point::{Point3f, Vector3f};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A 3D point cloud with an optional per-vertex normal attribute.
///
/// Normals are stored as a separate attribute vector rather than baked into
/// the point type, so a cloud can gain normals later (e.g. from normal
/// estimation) without changing its type. When present, the attribute holds
/// exactly one normal per point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointCloud {
    pub points: Vec<Point3f>,
    normals: Option<Vec<Vector3f>>,
}

impl PointCloud {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            normals: None,
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<Point3f>) -> Self {
        Self {
            points,
            normals: None,
        }
    }

    /// Create a point cloud from points and matching per-vertex normals.
    ///
    /// The normals are dropped if their count does not match the point count.
    pub fn from_points_and_normals(points: Vec<Point3f>, normals: Vec<Vector3f>) -> Self {
        let mut cloud = Self::from_points(points);
        cloud.set_normals(normals);
        cloud
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud.
    ///
    /// Invalidates the normal attribute, since it would no longer cover
    /// every point.
    pub fn push(&mut self, point: Point3f) {
        self.points.push(point);
        self.normals = None;
    }

    /// Attach per-vertex normals. Ignored unless there is one normal per point.
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.points.len() {
            self.normals = Some(normals);
        }
    }

    /// Look up the per-vertex normal attribute, if the cloud carries one
    pub fn normals(&self) -> Option<&[Vector3f]> {
        self.normals.as_deref()
    }

    /// Whether the cloud carries a normal attribute
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Remove the normal attribute
    pub fn clear_normals(&mut self) {
        self.normals = None;
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<'_, Point3f> {
        self.points.iter()
    }

    /// Clear all points and attributes from the cloud
    pub fn clear(&mut self) {
        self.points.clear();
        self.normals = None;
    }

    /// Axis-aligned bounding box of the points
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(&self.points)
    }

    /// Centroid of the points, or the origin for an empty cloud
    pub fn centroid(&self) -> Point3f {
        if self.points.is_empty() {
            return Point3f::origin();
        }
        let sum = self
            .points
            .iter()
            .fold(Vector3f::zeros(), |acc, p| acc + p.coords);
        Point3f::from(sum / self.points.len() as f32)
    }
}

impl Index<usize> for PointCloud {
    type Output = Point3f;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IndexMut<usize> for PointCloud {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3f;
    type IntoIter = std::slice::Iter<'a, Point3f>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<Point3f> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3f>>(iter: I) -> Self {
        Self::from_points(Vec::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_require_matching_length() {
        let mut cloud = PointCloud::from_points(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
        ]);
        cloud.set_normals(vec![Vector3f::z()]);
        assert!(!cloud.has_normals());

        cloud.set_normals(vec![Vector3f::z(), Vector3f::z()]);
        assert!(cloud.has_normals());
        assert_eq!(cloud.normals().unwrap().len(), 2);
    }

    #[test]
    fn push_invalidates_normals() {
        let mut cloud = PointCloud::from_points_and_normals(
            vec![Point3f::new(0.0, 0.0, 0.0)],
            vec![Vector3f::z()],
        );
        assert!(cloud.has_normals());
        cloud.push(Point3f::new(1.0, 0.0, 0.0));
        assert!(!cloud.has_normals());
    }

    #[test]
    fn centroid_of_unit_square() {
        let cloud = PointCloud::from_points(vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ]);
        let c = cloud.centroid();
        assert_eq!(c, Point3f::new(0.5, 0.5, 0.0));
    }
}
