//! I/O operations for pointsurf
//!
//! Reading and writing of point clouds and meshes (PLY, XYZ, OBJ), model
//! loading with format auto-detection, and resource directory resolution.

pub mod ply;
pub mod xyz;
pub mod obj;
pub mod resource;

pub use ply::{PlyReader, PlyWriter};
pub use xyz::{XyzReader, XyzWriter};
pub use obj::ObjReader;
pub use resource::resource_dir;

use pointsurf_core::{Error, Model, PointCloud, Result, TriangleMesh};
use std::path::Path;

/// Trait for reading point clouds from files
pub trait PointCloudReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud>;
}

/// Trait for writing point clouds to files
pub trait PointCloudWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> Result<()>;
}

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

/// Auto-detect format and read a point cloud
pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud> {
    let path = path.as_ref();
    match extension(path) {
        Some("ply") => PlyReader::read_point_cloud(path),
        Some("xyz") | Some("txt") => XyzReader::read_point_cloud(path),
        other => Err(Error::UnsupportedFormat(format!(
            "unsupported point cloud format: {:?}",
            other
        ))),
    }
}

/// Auto-detect format and read a mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match extension(path) {
        Some("ply") => PlyReader::read_mesh(path),
        Some("obj") => ObjReader::read_mesh(path),
        other => Err(Error::UnsupportedFormat(format!(
            "unsupported mesh format: {:?}",
            other
        ))),
    }
}

/// Load a file as a tagged [`Model`].
///
/// A PLY file with a populated face element loads as a mesh, otherwise as a
/// point cloud. OBJ always loads as a mesh, XYZ always as a cloud.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let model = match extension(path) {
        Some("ply") => {
            let mesh = PlyReader::read_mesh(path)?;
            if mesh.faces.is_empty() {
                let mut cloud = PointCloud::from_points(mesh.vertices);
                if let Some(normals) = mesh.normals {
                    cloud.set_normals(normals);
                }
                Model::PointCloud(cloud)
            } else {
                Model::Mesh(mesh)
            }
        }
        Some("xyz") | Some("txt") => Model::PointCloud(XyzReader::read_point_cloud(path)?),
        Some("obj") => Model::Mesh(ObjReader::read_mesh(path)?),
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "unsupported model format: {:?}",
                other
            )))
        }
    };
    tracing::info!(path = %path.display(), "loaded model");
    Ok(model)
}
