//! Normal Estimation Demo
//!
//! Estimates per-point normals from local neighborhoods and shows the cloud
//! in the viewer. Loads the bundled point cloud when available, otherwise
//! falls back to a synthetic noisy sphere.

use pointsurf_algorithms::estimate_normals;
use pointsurf_core::{Model, Point3f, PointCloud};
use pointsurf_io::{load_model, resource_dir};
use pointsurf_view::Viewer;
use rand::Rng;

const NEIGHBORHOOD_SIZE: usize = 16;

fn noisy_sphere(num_points: usize, radius: f32, noise: f32) -> PointCloud {
    let mut rng = rand::thread_rng();
    let golden = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let points = (0..num_points)
        .map(|i| {
            let theta = 2.0 * std::f32::consts::PI * i as f32 / golden;
            let phi = (1.0 - 2.0 * (i as f32 + 0.5) / num_points as f32).acos();
            Point3f::new(
                radius * phi.sin() * theta.cos() + rng.gen_range(-noise..noise),
                radius * phi.sin() * theta.sin() + rng.gen_range(-noise..noise),
                radius * phi.cos() + rng.gen_range(-noise..noise),
            )
        })
        .collect();
    PointCloud::from_points(points)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let file = resource_dir().join("data").join("polyhedron.ply");
    let mut cloud = match load_model(&file) {
        Ok(Model::PointCloud(cloud)) => cloud,
        Ok(Model::Mesh(_)) => anyhow::bail!("{} holds a mesh, not a point cloud", file.display()),
        Err(e) => {
            tracing::warn!(
                "could not load {} ({}); using a synthetic sphere instead",
                file.display(),
                e
            );
            noisy_sphere(2000, 1.0, 0.01)
        }
    };

    // estimate from scratch even when the file already carried normals
    cloud.clear_normals();
    estimate_normals(&mut cloud, NEIGHBORHOOD_SIZE)?;
    tracing::info!(
        "estimated normals for {} points (k = {})",
        cloud.len(),
        NEIGHBORHOOD_SIZE
    );

    let mut viewer = Viewer::new("pointsurf - normal estimation");
    viewer.add_model(Model::PointCloud(cloud));
    viewer.run()?;
    Ok(())
}
