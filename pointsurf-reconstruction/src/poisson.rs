//! Poisson surface reconstruction

use pointsurf_core::{Error, Point3f, PointCloud, Result, TriangleMesh};
use rayon::prelude::*;

/// Fewest points the solver accepts; below this the octree degenerates.
const MIN_POINTS: usize = 10;

/// Configuration parameters for Poisson reconstruction
#[derive(Debug, Clone)]
pub struct PoissonConfig {
    /// The maximum depth of the octree (default: 8)
    pub depth: u32,
    /// Screening parameter weighting point positions vs normals (default: 1.1)
    pub screening: f32,
    /// Maximum number of Gauss-Seidel relaxation iterations per level (default: 8)
    pub max_relaxation_iters: u32,
}

impl Default for PoissonConfig {
    fn default() -> Self {
        Self {
            depth: 8,
            screening: 1.1,
            max_relaxation_iters: 8,
        }
    }
}

impl PoissonConfig {
    /// Config with a specific octree depth
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

/// Reconstruct a triangle mesh from an oriented point cloud.
///
/// The cloud must carry a per-vertex normal attribute; run
/// `pointsurf_algorithms::estimate_normals` first if it does not.
pub fn poisson_reconstruction(cloud: &PointCloud, config: &PoissonConfig) -> Result<TriangleMesh> {
    if cloud.is_empty() {
        return Err(Error::InvalidData("point cloud is empty".to_string()));
    }
    if cloud.len() < MIN_POINTS {
        return Err(Error::InvalidData(format!(
            "point cloud too small for Poisson reconstruction (minimum {} points)",
            MIN_POINTS
        )));
    }
    let normals = cloud.normals().ok_or_else(|| {
        Error::InvalidData(
            "Poisson reconstruction requires a per-vertex normal attribute".to_string(),
        )
    })?;

    // the solver works in f64
    let points: Vec<nalgebra::Point3<f64>> = cloud
        .points
        .par_iter()
        .map(|p| nalgebra::Point3::new(p.x as f64, p.y as f64, p.z as f64))
        .collect();
    let normals: Vec<nalgebra::Vector3<f64>> = normals
        .par_iter()
        .map(|n| nalgebra::Vector3::new(n.x as f64, n.y as f64, n.z as f64))
        .collect();

    for (i, normal) in normals.iter().enumerate() {
        let magnitude = normal.magnitude();
        if magnitude < 1e-6 || (magnitude - 1.0).abs() > 0.1 {
            return Err(Error::InvalidData(format!(
                "normal at point {} is not unit length (magnitude {})",
                i, magnitude
            )));
        }
    }

    tracing::info!(
        points = points.len(),
        depth = config.depth,
        "running Poisson reconstruction"
    );

    let poisson = poisson_reconstruction::PoissonReconstruction::from_points_and_normals(
        &points,
        &normals,
        config.screening as f64,
        config.depth as usize,
        config.max_relaxation_iters as usize,
        0, // max memory usage, 0 = unlimited
    );

    let buffers = poisson.reconstruct_mesh_buffers();

    if buffers.vertices().is_empty() {
        return Err(Error::Algorithm(
            "Poisson reconstruction generated no vertices".to_string(),
        ));
    }

    let vertices: Vec<Point3f> = buffers
        .vertices()
        .par_iter()
        .map(|v| Point3f::new(v.x as f32, v.y as f32, v.z as f32))
        .collect();

    let indices = buffers.indices();
    if indices.len() % 3 != 0 {
        return Err(Error::Algorithm(
            "Poisson reconstruction produced malformed triangle indices".to_string(),
        ));
    }
    let faces: Vec<[usize; 3]> = indices
        .chunks(3)
        .map(|chunk| [chunk[0] as usize, chunk[1] as usize, chunk[2] as usize])
        .collect();
    if faces.is_empty() {
        return Err(Error::Algorithm(
            "Poisson reconstruction generated no triangles".to_string(),
        ));
    }

    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    mesh.compute_vertex_normals();

    tracing::info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "reconstruction finished"
    );
    Ok(mesh)
}

/// Poisson surface reconstruction with default configuration
pub fn poisson_reconstruction_default(cloud: &PointCloud) -> Result<TriangleMesh> {
    poisson_reconstruction(cloud, &PoissonConfig::default())
}

/// Estimate normals first, then reconstruct.
///
/// `k` is the neighborhood size for normal estimation.
pub fn poisson_reconstruction_with_normals(
    cloud: &PointCloud,
    k: usize,
    config: &PoissonConfig,
) -> Result<TriangleMesh> {
    let mut oriented = cloud.clone();
    pointsurf_algorithms::estimate_normals(&mut oriented, k)?;
    poisson_reconstruction(&oriented, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointsurf_core::Vector3f;

    #[test]
    fn config_defaults() {
        let config = PoissonConfig::default();
        assert_eq!(config.depth, 8);
        assert_eq!(config.max_relaxation_iters, 8);
        assert_eq!(PoissonConfig::with_depth(6).depth, 6);
    }

    #[test]
    fn rejects_empty_cloud() {
        let cloud = PointCloud::new();
        assert!(poisson_reconstruction(&cloud, &PoissonConfig::default()).is_err());
    }

    #[test]
    fn rejects_cloud_without_normals() {
        let cloud = PointCloud::from_points(
            (0..20)
                .map(|i| Point3f::new(i as f32, 0.0, 0.0))
                .collect(),
        );
        let err = poisson_reconstruction(&cloud, &PoissonConfig::default()).unwrap_err();
        assert!(err.to_string().contains("normal"));
    }

    #[test]
    fn rejects_unnormalized_normals() {
        let points: Vec<Point3f> = (0..20).map(|i| Point3f::new(i as f32, 0.0, 0.0)).collect();
        let normals = vec![Vector3f::new(0.0, 0.0, 3.0); 20];
        let cloud = PointCloud::from_points_and_normals(points, normals);
        let err = poisson_reconstruction(&cloud, &PoissonConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unit length"));
    }
}
