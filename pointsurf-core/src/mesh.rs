//! Triangle mesh data structure

use crate::bounds::Aabb;
use crate::point::{Point3f, Vector3f};
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices, faces, and optional per-vertex normals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no renderable geometry
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Set per-vertex normals. Ignored unless there is one normal per vertex.
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Calculate one normal per face from its vertex winding
    pub fn face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];
                let n = (v1 - v0).cross(&(v2 - v0));
                let len = n.norm();
                if len > f32::EPSILON {
                    n / len
                } else {
                    Vector3f::z()
                }
            })
            .collect()
    }

    /// Compute smooth per-vertex normals by accumulating adjacent face
    /// normals (area weighted via the unnormalized cross product) and store
    /// them on the mesh.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vector3f::zeros(); self.vertices.len()];
        for face in &self.faces {
            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];
            let n = (v1 - v0).cross(&(v2 - v0));
            for &i in face {
                normals[i] += n;
            }
        }
        for n in &mut normals {
            let len = n.norm();
            *n = if len > f32::EPSILON {
                *n / len
            } else {
                Vector3f::z()
            };
        }
        self.normals = Some(normals);
    }

    /// Axis-aligned bounding box of the vertices
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn face_normal_of_ccw_triangle_points_up() {
        let mesh = unit_triangle();
        let normals = mesh.face_normals();
        assert_eq!(normals.len(), 1);
        assert_relative_eq!(normals[0].z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn vertex_normals_cover_all_vertices() {
        let mut mesh = unit_triangle();
        mesh.compute_vertex_normals();
        let normals = mesh.normals.as_ref().unwrap();
        assert_eq!(normals.len(), mesh.vertex_count());
        for n in normals {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn empty_mesh_reports_empty() {
        assert!(TriangleMesh::new().is_empty());
        let no_faces = TriangleMesh::from_vertices_and_faces(
            vec![Point3f::new(0.0, 0.0, 0.0)],
            Vec::new(),
        );
        assert!(no_faces.is_empty());
    }
}
