//! Integration tests for pointsurf-reconstruction
//!
//! These run the full Poisson pipeline on synthetic clouds with analytic
//! normals.

use approx::assert_relative_eq;
use pointsurf_core::{Point3f, PointCloud, Vector3f};
use pointsurf_reconstruction::{poisson_reconstruction, PoissonConfig};

/// Fibonacci-spiral sampling of a sphere, with exact outward normals
fn sphere_cloud(radius: f32, num_points: usize) -> PointCloud {
    let golden = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut points = Vec::with_capacity(num_points);
    let mut normals = Vec::with_capacity(num_points);

    for i in 0..num_points {
        let theta = 2.0 * std::f32::consts::PI * i as f32 / golden;
        let phi = (1.0 - 2.0 * (i as f32 + 0.5) / num_points as f32).acos();

        let n = Vector3f::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        );
        points.push(Point3f::from(n * radius));
        normals.push(n);
    }
    PointCloud::from_points_and_normals(points, normals)
}

#[test]
fn sphere_reconstructs_to_nonempty_mesh() {
    let cloud = sphere_cloud(1.0, 800);
    let mesh = poisson_reconstruction(&cloud, &PoissonConfig::with_depth(5))
        .expect("sphere reconstruction failed");

    assert!(!mesh.is_empty());
    assert!(mesh.face_count() > 0);

    // every face must reference valid vertices
    for face in &mesh.faces {
        for &i in face {
            assert!(i < mesh.vertex_count());
        }
    }

    // the computed vertex normals come out unit length
    for n in mesh.normals.as_ref().expect("mesh should carry normals") {
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-4);
    }
}

#[test]
fn reconstructed_sphere_stays_near_unit_radius() {
    let cloud = sphere_cloud(1.0, 800);
    let mesh = poisson_reconstruction(&cloud, &PoissonConfig::with_depth(5))
        .expect("sphere reconstruction failed");

    let mut inside = 0usize;
    for v in &mesh.vertices {
        let r = v.coords.norm();
        if (0.5..1.5).contains(&r) {
            inside += 1;
        }
    }
    // Poisson pads the domain a little, so only require the bulk of
    // vertices near the surface
    assert!(
        inside * 10 >= mesh.vertex_count() * 8,
        "only {}/{} vertices near the sphere",
        inside,
        mesh.vertex_count()
    );
}
