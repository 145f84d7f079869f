use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use orrery_common::{Camera, Ray};
use orrery_input::Action;

const PITCH_LIMIT: f32 = 89.0;

/// Camera driven by cursor controls: drag turns it in place, zoom scales
/// its distance along z.
///
/// Camera motion is outside the simulation and never affects `tick`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorCamera {
    pub position: Vec3,
    /// Rotation about +Y, radians. Zero looks down -Z.
    pub yaw: f32,
    /// Rotation about +X, radians.
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per pixel of pointer travel.
    pub sensitivity: f32,
}

impl Default for CursorCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 30.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            sensitivity: 0.005,
        }
    }
}

impl CursorCamera {
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch -= delta.y * self.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-PITCH_LIMIT.to_radians(), PITCH_LIMIT.to_radians());
    }

    /// Multiply the distance along z by `factor`.
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            tracing::warn!(factor, "ignoring invalid zoom factor");
            return;
        }
        self.position.z *= factor;
    }

    /// Apply a camera action. Returns whether the camera handled it.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::Orbit(delta) => {
                self.rotate(*delta);
                true
            }
            Action::Zoom(factor) => {
                self.zoom(*factor);
                true
            }
            _ => false,
        }
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Camera for CursorCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    fn pick_ray(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = CursorCamera::default();
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-6);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn center_ray_follows_forward() {
        let mut cam = CursorCamera::default();
        cam.rotate(Vec2::new(40.0, -25.0));
        let ray = cam.pick_ray(Vec2::ZERO);
        assert_eq!(ray.origin, cam.position);
        assert!((ray.direction - cam.forward()).length() < 1e-3);
    }

    #[test]
    fn edge_rays_diverge() {
        let cam = CursorCamera::default();
        let left = cam.pick_ray(Vec2::new(-1.0, 0.0));
        let right = cam.pick_ray(Vec2::new(1.0, 0.0));
        assert!(left.direction.x < 0.0);
        assert!(right.direction.x > 0.0);
        assert!(left.direction.z < 0.0 && right.direction.z < 0.0);
    }

    #[test]
    fn drag_rotates_by_sensitivity() {
        let mut cam = CursorCamera::default();
        cam.rotate(Vec2::new(100.0, 0.0));
        assert!((cam.yaw + 0.5).abs() < 1e-6);
        cam.rotate(Vec2::new(0.0, 1.0e6));
        assert!((cam.pitch + 89.0_f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn zoom_scales_distance() {
        let mut cam = CursorCamera::default();
        assert!(cam.apply(&Action::Zoom(1.2)));
        assert!((cam.position.z - 36.0).abs() < 1e-4);
        cam.zoom(0.0);
        assert!((cam.position.z - 36.0).abs() < 1e-4);
        assert!(!cam.apply(&Action::ReturnToGlobal));
    }
}
