//! OBJ format support

use crate::MeshReader;
use pointsurf_core::{Error, Point3f, Result, TriangleMesh};
use std::path::Path;

pub struct ObjReader;

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let obj = obj::Obj::load(path.as_ref())
            .map_err(|e| Error::InvalidData(format!("OBJ parse error: {}", e)))?;

        let vertices: Vec<Point3f> = obj
            .data
            .position
            .iter()
            .map(|p| Point3f::new(p[0], p[1], p[2]))
            .collect();

        let mut faces = Vec::new();
        for object in &obj.data.objects {
            for group in &object.groups {
                for poly in &group.polys {
                    let indices: Vec<usize> = poly.0.iter().map(|t| t.0).collect();
                    // triangulate polygons with a fan
                    for i in 1..indices.len().saturating_sub(1) {
                        faces.push([indices[0], indices[i], indices[i + 1]]);
                    }
                }
            }
        }

        Ok(TriangleMesh::from_vertices_and_faces(vertices, faces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_quad_as_two_triangles() {
        let path = std::env::temp_dir().join("pointsurf_quad.obj");
        fs::write(
            &path,
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        )
        .unwrap();

        let mesh = ObjReader::read_mesh(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[0], [0, 1, 2]);
        assert_eq!(mesh.faces[1], [0, 2, 3]);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ObjReader::read_mesh("not/a/real.obj").is_err());
    }
}
