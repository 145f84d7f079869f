use glam::{Quat, Vec2, Vec3};

/// A half-line used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Distance along the ray to the first point on the sphere's surface
    /// in front of the origin. A ray starting inside the sphere reports the
    /// exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// What the core needs from the external camera.
///
/// Projection math stays with the implementor; the core only asks for a
/// pick ray through a point given in normalized device coordinates.
pub trait Camera {
    fn position(&self) -> Vec3;

    fn orientation(&self) -> Quat;

    fn pick_ray(&self, ndc: Vec2) -> Ray;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_sphere_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(ray.direction, Vec3::NEG_Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!((ray.at(t) - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn ray_misses_offset_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn origin_inside_sphere_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }
}
