//! PLY format support

use crate::{MeshReader, MeshWriter, PointCloudReader, PointCloudWriter};
use pointsurf_core::{Error, Point3f, PointCloud, Result, TriangleMesh, Vector3f};
use ply_rs::{
    parser::Parser,
    ply::{Addable, DefaultElement, ElementDef, Ply, Property, PropertyDef, PropertyType, ScalarType},
    writer::Writer,
};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub struct PlyReader;
pub struct PlyWriter;

impl PointCloudReader for PlyReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;

        let mut points = Vec::new();
        if let Some(vertex_element) = ply.payload.get("vertex") {
            for vertex in vertex_element {
                let x = property_f32(vertex, "x")?;
                let y = property_f32(vertex, "y")?;
                let z = property_f32(vertex, "z")?;
                points.push(Point3f::new(x, y, z));
            }
        }

        let mut cloud = PointCloud::from_points(points);
        if let Some(normals) = read_vertex_normals(&ply) {
            cloud.set_normals(normals);
        }
        Ok(cloud)
    }
}

impl PointCloudWriter for PlyWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let mut ply = Ply::<DefaultElement>::new();

        let mut vertex_def = ElementDef::new("vertex".to_string());
        vertex_def.count = cloud.len();
        for name in ["x", "y", "z"] {
            vertex_def.properties.add(PropertyDef::new(
                name.to_string(),
                PropertyType::Scalar(ScalarType::Float),
            ));
        }
        if cloud.has_normals() {
            for name in ["nx", "ny", "nz"] {
                vertex_def.properties.add(PropertyDef::new(
                    name.to_string(),
                    PropertyType::Scalar(ScalarType::Float),
                ));
            }
        }
        ply.header.elements.add(vertex_def);

        let normals = cloud.normals();
        let mut vertices = Vec::with_capacity(cloud.len());
        for (i, point) in cloud.iter().enumerate() {
            let mut vertex = DefaultElement::new();
            vertex.insert("x".to_string(), Property::Float(point.x));
            vertex.insert("y".to_string(), Property::Float(point.y));
            vertex.insert("z".to_string(), Property::Float(point.z));
            if let Some(normals) = normals {
                vertex.insert("nx".to_string(), Property::Float(normals[i].x));
                vertex.insert("ny".to_string(), Property::Float(normals[i].y));
                vertex.insert("nz".to_string(), Property::Float(normals[i].z));
            }
            vertices.push(vertex);
        }
        ply.payload.insert("vertex".to_string(), vertices);

        let writer_instance = Writer::new();
        writer_instance.write_ply(&mut writer, &mut ply)?;
        Ok(())
    }
}

impl MeshReader for PlyReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;

        let mut vertices = Vec::new();
        if let Some(vertex_element) = ply.payload.get("vertex") {
            for vertex in vertex_element {
                let x = property_f32(vertex, "x")?;
                let y = property_f32(vertex, "y")?;
                let z = property_f32(vertex, "z")?;
                vertices.push(Point3f::new(x, y, z));
            }
        }

        let mut faces = Vec::new();
        if let Some(face_element) = ply.payload.get("face") {
            for face in face_element {
                let indices = face_indices(face)?;
                // triangulate polygons with a fan
                for i in 1..indices.len().saturating_sub(1) {
                    faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
        }

        let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        if let Some(normals) = read_vertex_normals(&ply) {
            mesh.set_normals(normals);
        }
        Ok(mesh)
    }
}

impl MeshWriter for PlyWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let mut ply = Ply::<DefaultElement>::new();

        let mut vertex_def = ElementDef::new("vertex".to_string());
        vertex_def.count = mesh.vertex_count();
        for name in ["x", "y", "z"] {
            vertex_def.properties.add(PropertyDef::new(
                name.to_string(),
                PropertyType::Scalar(ScalarType::Float),
            ));
        }
        if mesh.normals.is_some() {
            for name in ["nx", "ny", "nz"] {
                vertex_def.properties.add(PropertyDef::new(
                    name.to_string(),
                    PropertyType::Scalar(ScalarType::Float),
                ));
            }
        }
        ply.header.elements.add(vertex_def);

        let mut face_def = ElementDef::new("face".to_string());
        face_def.count = mesh.face_count();
        face_def.properties.add(PropertyDef::new(
            "vertex_indices".to_string(),
            PropertyType::List(ScalarType::UChar, ScalarType::Int),
        ));
        ply.header.elements.add(face_def);

        let mut vertices = Vec::with_capacity(mesh.vertex_count());
        for (i, point) in mesh.vertices.iter().enumerate() {
            let mut vertex = DefaultElement::new();
            vertex.insert("x".to_string(), Property::Float(point.x));
            vertex.insert("y".to_string(), Property::Float(point.y));
            vertex.insert("z".to_string(), Property::Float(point.z));
            if let Some(normals) = &mesh.normals {
                vertex.insert("nx".to_string(), Property::Float(normals[i].x));
                vertex.insert("ny".to_string(), Property::Float(normals[i].y));
                vertex.insert("nz".to_string(), Property::Float(normals[i].z));
            }
            vertices.push(vertex);
        }
        ply.payload.insert("vertex".to_string(), vertices);

        let mut faces = Vec::with_capacity(mesh.face_count());
        for face in &mesh.faces {
            let mut face_element = DefaultElement::new();
            face_element.insert(
                "vertex_indices".to_string(),
                Property::ListInt(vec![face[0] as i32, face[1] as i32, face[2] as i32]),
            );
            faces.push(face_element);
        }
        ply.payload.insert("face".to_string(), faces);

        let writer_instance = Writer::new();
        writer_instance.write_ply(&mut writer, &mut ply)?;
        Ok(())
    }
}

/// Extract a scalar property as f32 from a PLY element
fn property_f32(element: &DefaultElement, name: &str) -> Result<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        _ => Err(Error::InvalidData(format!(
            "property '{}' not found or invalid type",
            name
        ))),
    }
}

/// Per-vertex nx/ny/nz, if every vertex carries them
fn read_vertex_normals(ply: &Ply<DefaultElement>) -> Option<Vec<Vector3f>> {
    let vertex_element = ply.payload.get("vertex")?;
    let mut normals = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let nx = property_f32(vertex, "nx").ok()?;
        let ny = property_f32(vertex, "ny").ok()?;
        let nz = property_f32(vertex, "nz").ok()?;
        normals.push(Vector3f::new(nx, ny, nz));
    }
    if normals.is_empty() {
        None
    } else {
        Some(normals)
    }
}

/// Extract face indices from a PLY face element
fn face_indices(element: &DefaultElement) -> Result<Vec<usize>> {
    match element
        .get("vertex_indices")
        .or_else(|| element.get("vertex_index"))
    {
        Some(Property::ListInt(indices)) => Ok(indices.iter().map(|&i| i as usize).collect()),
        Some(Property::ListUInt(indices)) => Ok(indices.iter().map(|&i| i as usize).collect()),
        _ => Err(Error::InvalidData("face indices not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn point_cloud_roundtrip_preserves_normals() {
        let path = temp_path("pointsurf_ply_cloud.ply");
        let mut cloud = PointCloud::from_points(vec![
            Point3f::new(0.0, 0.5, 1.0),
            Point3f::new(-1.0, 2.0, 3.0),
        ]);
        cloud.set_normals(vec![Vector3f::z(), Vector3f::x()]);
        PlyWriter::write_point_cloud(&cloud, &path).unwrap();

        let loaded = PlyReader::read_point_cloud(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_relative_eq!(loaded.points[1].y, 2.0);
        let normals = loaded.normals().expect("normals lost in roundtrip");
        assert_relative_eq!(normals[0].z, 1.0);
        assert_relative_eq!(normals[1].x, 1.0);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn cloud_without_normals_stays_without() {
        let path = temp_path("pointsurf_ply_plain.ply");
        let cloud = PointCloud::from_points(vec![Point3f::new(1.0, 2.0, 3.0)]);
        PlyWriter::write_point_cloud(&cloud, &path).unwrap();

        let loaded = PlyReader::read_point_cloud(&path).unwrap();
        assert!(!loaded.has_normals());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn mesh_roundtrip() {
        let path = temp_path("pointsurf_ply_mesh.ply");
        let mut mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [1, 3, 2]],
        );
        mesh.compute_vertex_normals();
        PlyWriter::write_mesh(&mesh, &path).unwrap();

        let loaded = PlyReader::read_mesh(&path).unwrap();
        assert_eq!(loaded.vertex_count(), 4);
        assert_eq!(loaded.face_count(), 2);
        assert!(loaded.normals.is_some());
        assert_eq!(loaded.faces[1], [1, 3, 2]);
        fs::remove_file(&path).ok();
    }
}
