//! Surface Reconstruction Demo
//!
//! Loads a point cloud into the viewer and binds Ctrl+R to Poisson surface
//! reconstruction: on success the fitted surface replaces the cloud in the
//! viewer's model registry.

use pointsurf_core::Model;
use pointsurf_io::{load_model, resource_dir};
use pointsurf_reconstruction::{poisson_reconstruction, PoissonConfig};
use pointsurf_view::{ColoringMethod, KeyCode, ModelId, Modifiers, Scene, Viewer};
use std::process::ExitCode;

const RECONSTRUCTION_DEPTH: u32 = 6;
const SURFACE_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// Reconstruction callback bound to Ctrl+R.
///
/// Returns true when the event was handled. Refusals (unknown model, not a
/// point cloud, missing normals) mutate nothing and return false; once
/// reconstruction runs, the event counts as handled even if the algorithm
/// produced no surface.
fn reconstruct(scene: &mut Scene, model: ModelId) -> bool {
    let result = {
        let Some(bound) = scene.get(model) else {
            return false;
        };
        let Some(cloud) = bound.as_point_cloud() else {
            tracing::error!("bound model is not a point cloud; refusing to reconstruct");
            return false;
        };
        if !cloud.has_normals() {
            tracing::error!(
                "Poisson surface reconstruction requires normal information. \
                 Estimate normals first (see the normal_estimation demo)."
            );
            return false;
        }

        tracing::info!("reconstruction depth: {}", RECONSTRUCTION_DEPTH);
        poisson_reconstruction(cloud, &PoissonConfig::with_depth(RECONSTRUCTION_DEPTH))
    };

    match result {
        Ok(surface) => {
            let surface_id = scene.add_model(Model::Mesh(surface));
            if let Some(settings) = scene.settings_mut(surface_id) {
                settings.coloring = ColoringMethod::Uniform(SURFACE_COLOR);
            }
            scene.delete_model(model);
            scene.request_redraw();
            true
        }
        Err(e) => {
            tracing::warn!("reconstruction produced no surface: {}", e);
            true
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let file = resource_dir().join("data").join("polyhedron.ply");

    let mut viewer = Viewer::new("pointsurf - surface reconstruction");

    let model_id = match load_model(&file) {
        Ok(model) => viewer.add_model(model),
        Err(e) => {
            tracing::error!(
                "failed to load model from {}: {}. Make sure the file exists \
                 and the format is supported.",
                file.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    viewer.bind(
        KeyCode::KeyR,
        Modifiers::CTRL,
        "run Poisson surface reconstruction",
        move |scene| reconstruct(scene, model_id),
    );
    viewer.set_usage("the reconstructed surface replaces the point cloud");

    match viewer.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("viewer failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
