//! Camera for 3D visualization

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use pointsurf_core::Aabb;

/// A perspective camera orbiting a target point
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    home_position: Point3<f32>,
    home_target: Point3<f32>,
}

impl Camera {
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
            home_position: position,
            home_target: target,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far).into_inner()
    }

    /// Rotate the camera around the target.
    ///
    /// `horizontal` spins around the up axis, `vertical` changes elevation.
    /// Both are radians. Elevation is clamped short of the poles so the view
    /// never flips.
    pub fn orbit(&mut self, horizontal: f32, vertical: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm();
        if radius < f32::EPSILON {
            return;
        }

        let mut yaw = offset.z.atan2(offset.x);
        let mut pitch = (offset.y / radius).asin();

        yaw += horizontal;
        pitch = (pitch + vertical).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );

        let new_offset = Vector3::new(
            radius * pitch.cos() * yaw.cos(),
            radius * pitch.sin(),
            radius * pitch.cos() * yaw.sin(),
        );
        self.position = self.target + new_offset;
    }

    /// Translate camera and target in the view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&self.up).normalize();
        let up = right.cross(&forward);

        let scale = (self.position - self.target).norm();
        let delta = (-right * dx + up * dy) * scale;
        self.position += delta;
        self.target += delta;
    }

    /// Move toward (positive) or away from (negative) the target
    pub fn zoom(&mut self, amount: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm();
        let new_radius = (radius * (1.0 - amount)).max(self.near * 2.0);
        if radius > f32::EPSILON {
            self.position = self.target + offset * (new_radius / radius);
        }
    }

    /// Return to the pose set at construction or by the last `frame` call
    pub fn reset(&mut self) {
        self.position = self.home_position;
        self.target = self.home_target;
    }

    /// Place the camera so the given bounds fill the view
    pub fn frame(&mut self, bounds: &Aabb) {
        let center = bounds.center();
        let mut radius = bounds.diagonal() * 0.5;
        if radius < f32::EPSILON {
            radius = 1.0;
        }

        let distance = radius / (self.fov * 0.5).tan() * 1.2;
        let direction = Vector3::new(1.0, 0.8, 1.0).normalize();

        self.target = center;
        self.position = center + direction * distance;
        self.far = self.far.max(distance + radius * 4.0);
        self.home_position = self.position;
        self.home_target = self.target;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(3.0, 3.0, 3.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            0.1,
            100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pointsurf_core::Point3f;

    #[test]
    fn orbit_preserves_distance() {
        let mut camera = Camera::default();
        let before = (camera.position - camera.target).norm();
        camera.orbit(0.5, 0.3);
        let after = (camera.position - camera.target).norm();
        assert_relative_eq!(before, after, epsilon = 1e-4);
    }

    #[test]
    fn zoom_moves_toward_target() {
        let mut camera = Camera::default();
        let before = (camera.position - camera.target).norm();
        camera.zoom(0.2);
        let after = (camera.position - camera.target).norm();
        assert!(after < before);
    }

    #[test]
    fn frame_then_reset_returns_home() {
        let mut camera = Camera::default();
        let bounds = Aabb::from_points(&[
            Point3f::new(-2.0, -2.0, -2.0),
            Point3f::new(2.0, 2.0, 2.0),
        ]);
        camera.frame(&bounds);
        let framed = camera.position;
        assert_eq!(camera.target, Point3f::origin());

        camera.orbit(1.0, 0.5);
        camera.zoom(0.5);
        camera.reset();
        assert_relative_eq!((camera.position - framed).norm(), 0.0, epsilon = 1e-5);
    }
}
