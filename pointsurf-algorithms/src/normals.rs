//! Normal estimation via local plane fitting
//!
//! For every point, fits a plane through its k nearest neighbors by taking
//! the eigenvector of the smallest eigenvalue of the neighborhood covariance
//! matrix, then orients the normal away from the cloud centroid.

use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::{Matrix3, SymmetricEigen};
use pointsurf_core::{Error, PointCloud, Result, Vector3f};
use rayon::prelude::*;

/// Estimate per-vertex normals and attach them to the cloud as an attribute.
///
/// `k` is the neighborhood size used for the plane fit; it must be at least 3
/// and the cloud must have more than `k` points.
pub fn estimate_normals(cloud: &mut PointCloud, k: usize) -> Result<()> {
    if k < 3 {
        return Err(Error::InvalidData(
            "normal estimation requires a neighborhood of at least 3 points".to_string(),
        ));
    }
    if cloud.len() <= k {
        return Err(Error::InvalidData(format!(
            "normal estimation with k={} requires more than {} points, got {}",
            k,
            k,
            cloud.len()
        )));
    }

    let mut tree: KdTree<f32, 3> = KdTree::with_capacity(cloud.len());
    for (i, p) in cloud.iter().enumerate() {
        tree.add(&[p.x, p.y, p.z], i as u64);
    }

    let centroid = cloud.centroid();
    let points = &cloud.points;

    let normals: Vec<Vector3f> = points
        .par_iter()
        .map(|p| {
            // k + 1 because the query point is its own nearest neighbor
            let neighbors = tree.nearest_n::<SquaredEuclidean>(&[p.x, p.y, p.z], k + 1);

            let mut mean = Vector3f::zeros();
            for n in &neighbors {
                mean += points[n.item as usize].coords;
            }
            mean /= neighbors.len() as f32;

            let mut cov = Matrix3::zeros();
            for n in &neighbors {
                let d = points[n.item as usize].coords - mean;
                cov += d * d.transpose();
            }
            cov /= neighbors.len() as f32;

            let eigen = SymmetricEigen::new(cov);
            let mut min_idx = 0;
            for i in 1..3 {
                if eigen.eigenvalues[i] < eigen.eigenvalues[min_idx] {
                    min_idx = i;
                }
            }
            let mut normal: Vector3f = eigen.eigenvectors.column(min_idx).into_owned();
            let len = normal.norm();
            if len > f32::EPSILON {
                normal /= len;
            } else {
                normal = Vector3f::z();
            }

            // orient outward from the cloud centroid
            if normal.dot(&(p - centroid)) < 0.0 {
                normal = -normal;
            }
            normal
        })
        .collect();

    tracing::debug!(points = cloud.len(), k, "estimated normals");
    cloud.set_normals(normals);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pointsurf_core::Point3f;

    fn grid_on_plane(n: usize) -> PointCloud {
        let mut points = Vec::new();
        for i in 0..n {
            for j in 0..n {
                points.push(Point3f::new(i as f32 * 0.1, j as f32 * 0.1, 0.0));
            }
        }
        PointCloud::from_points(points)
    }

    #[test]
    fn plane_normals_are_vertical() {
        let mut cloud = grid_on_plane(10);
        estimate_normals(&mut cloud, 8).unwrap();

        let normals = cloud.normals().unwrap();
        assert_eq!(normals.len(), cloud.len());
        for n in normals {
            assert_relative_eq!(n.z.abs(), 1.0, epsilon = 1e-4);
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn sphere_normals_point_outward() {
        let mut points = Vec::new();
        let golden = (1.0 + 5.0_f32.sqrt()) / 2.0;
        for i in 0..500 {
            let theta = 2.0 * std::f32::consts::PI * i as f32 / golden;
            let phi = (1.0 - 2.0 * (i as f32 + 0.5) / 500.0).acos();
            points.push(Point3f::new(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            ));
        }
        let mut cloud = PointCloud::from_points(points);
        estimate_normals(&mut cloud, 12).unwrap();

        let normals = cloud.normals().unwrap();
        for (p, n) in cloud.iter().zip(normals) {
            // on a unit sphere centered at the origin the outward normal is
            // the position itself
            assert!(n.dot(&p.coords) > 0.7, "normal not outward at {:?}", p);
        }
    }

    #[test]
    fn rejects_tiny_clouds() {
        let mut cloud = grid_on_plane(2);
        assert!(estimate_normals(&mut cloud, 8).is_err());
        assert!(!cloud.has_normals());
    }

    #[test]
    fn rejects_degenerate_k() {
        let mut cloud = grid_on_plane(5);
        assert!(estimate_normals(&mut cloud, 2).is_err());
    }
}
