//! The tagged model handle stored in a viewer registry

use crate::bounds::Aabb;
use crate::mesh::TriangleMesh;
use crate::point_cloud::PointCloud;
use serde::{Deserialize, Serialize};

/// A loaded 3D asset: either a point cloud or a triangle mesh.
///
/// Code that needs a specific variant goes through `as_point_cloud` /
/// `as_mesh` and handles the `None` case instead of assuming the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Model {
    PointCloud(PointCloud),
    Mesh(TriangleMesh),
}

impl Model {
    /// Interpret the model as a point cloud, if it is one
    pub fn as_point_cloud(&self) -> Option<&PointCloud> {
        match self {
            Model::PointCloud(cloud) => Some(cloud),
            Model::Mesh(_) => None,
        }
    }

    /// Mutable point cloud access, if the model is one
    pub fn as_point_cloud_mut(&mut self) -> Option<&mut PointCloud> {
        match self {
            Model::PointCloud(cloud) => Some(cloud),
            Model::Mesh(_) => None,
        }
    }

    /// Interpret the model as a mesh, if it is one
    pub fn as_mesh(&self) -> Option<&TriangleMesh> {
        match self {
            Model::Mesh(mesh) => Some(mesh),
            Model::PointCloud(_) => None,
        }
    }

    /// Whether the model is a point cloud
    pub fn is_point_cloud(&self) -> bool {
        matches!(self, Model::PointCloud(_))
    }

    /// Axis-aligned bounding box of the model's geometry
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Model::PointCloud(cloud) => cloud.bounding_box(),
            Model::Mesh(mesh) => mesh.bounding_box(),
        }
    }
}

impl From<PointCloud> for Model {
    fn from(cloud: PointCloud) -> Self {
        Model::PointCloud(cloud)
    }
}

impl From<TriangleMesh> for Model {
    fn from(mesh: TriangleMesh) -> Self {
        Model::Mesh(mesh)
    }
}
