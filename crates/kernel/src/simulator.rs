use crate::registry::BodyRegistry;

/// Advances self-rotation and circular orbits of every resolved body.
///
/// Self-rotation is a per-step increment, so it integrates once per call
/// and depends on the frame rate. Orbital position is recomputed from the
/// elapsed simulated time on each call. Feed it one monotonic elapsed value
/// per frame.
#[derive(Debug, Clone, Default)]
pub struct OrbitalSimulator {
    steps: u64,
    last_elapsed: Option<f32>,
}

impl OrbitalSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `advance` calls so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn last_elapsed(&self) -> Option<f32> {
        self.last_elapsed
    }

    /// Run one simulation step at `elapsed` simulated time units.
    ///
    /// Bodies whose renderable proxy is still missing are skipped. The
    /// y coordinate is never touched; orbits are planar.
    pub fn advance(&mut self, registry: &mut BodyRegistry, elapsed: f32) {
        if let Some(last) = self.last_elapsed {
            if elapsed < last {
                tracing::warn!(elapsed, last, "elapsed time went backwards");
            }
        }
        self.last_elapsed = Some(elapsed);
        self.steps += 1;

        let mut moved = 0usize;
        for body in registry.iter_mut() {
            let Some(proxy) = body.renderable.as_mut() else {
                continue;
            };

            proxy.rotation_y += body.params.rotation_speed;

            if body.params.orbits() {
                let angle = elapsed * body.params.orbital_speed;
                let radius = body.params.orbital_radius;
                body.orbital_angle = angle;
                proxy.position.x = radius * angle.cos();
                proxy.position.z = radius * angle.sin();
                moved += 1;
            }
        }

        tracing::trace!(step = self.steps, elapsed, moved, "orbital step");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{CelestialBody, OrbitParams, RenderProxy};
    use glam::Vec3;
    use orrery_common::BodyId;

    fn body(id: &str, rotation: f32, orbit: f32, radius: f32, resolved: bool) -> CelestialBody {
        let mut body = CelestialBody::new(
            BodyId::from(id),
            OrbitParams {
                rotation_speed: rotation,
                orbital_speed: orbit,
                orbital_radius: radius,
            },
        );
        if resolved {
            body.renderable = Some(RenderProxy {
                position: Vec3::new(radius, 0.5, 0.0),
                base_rotation: glam::Quat::IDENTITY,
                rotation_y: 0.0,
                scale: Vec3::ONE,
            });
        }
        body
    }

    fn position(registry: &BodyRegistry, id: &str) -> Vec3 {
        registry
            .get(&BodyId::from(id))
            .unwrap()
            .renderable
            .unwrap()
            .position
    }

    #[test]
    fn orbit_stays_on_circle() {
        let mut registry = BodyRegistry::new();
        registry.insert(body("earth", 0.01, 0.7, 7.0, true));
        registry.insert(body("jupiter", 0.02, 0.13, 12.0, true));
        let mut sim = OrbitalSimulator::new();

        for frame in 0..500 {
            let t = frame as f32 * 0.37;
            sim.advance(&mut registry, t);
            for b in registry.iter() {
                let p = b.renderable.unwrap().position;
                let r = b.params.orbital_radius;
                assert!((p.x * p.x + p.z * p.z - r * r).abs() < 1e-2 * r * r);
            }
        }
    }

    #[test]
    fn orbit_keeps_height() {
        let mut registry = BodyRegistry::new();
        registry.insert(body("earth", 0.01, 1.0, 7.0, true));
        let mut sim = OrbitalSimulator::new();
        sim.advance(&mut registry, 2.0);
        assert_eq!(position(&registry, "earth").y, 0.5);
        let angle = registry.get(&BodyId::from("earth")).unwrap().orbital_angle;
        assert!((angle - 2.0).abs() < 1e-6);
    }

    #[test]
    fn stationary_body_never_moves() {
        let mut registry = BodyRegistry::new();
        registry.insert(body("sun", 0.0005, 0.0, 0.0, true));
        registry.insert(body("mars", 0.008, 0.0, 9.0, true));
        let before = position(&registry, "mars");
        let mut sim = OrbitalSimulator::new();
        for frame in 0..50 {
            sim.advance(&mut registry, frame as f32 * 3.0);
        }
        assert_eq!(position(&registry, "mars"), before);
        assert_eq!(position(&registry, "sun"), Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn mars_rotates_in_place() {
        let mut registry = BodyRegistry::new();
        registry.insert(body("mars", 0.008, 0.0, 9.0, true));
        let mut sim = OrbitalSimulator::new();
        for frame in 0..100 {
            sim.advance(&mut registry, frame as f32);
        }
        let mars = registry.get(&BodyId::from("mars")).unwrap();
        let proxy = mars.renderable.unwrap();
        assert!((proxy.rotation_y - 0.8).abs() < 1e-4);
        assert_eq!(proxy.position.x, 9.0 * 0f32.cos());
        assert_eq!(proxy.position.z, 0.0);
        assert_eq!(mars.orbital_angle, 0.0);
        assert_eq!(sim.steps(), 100);
    }

    #[test]
    fn unresolved_bodies_are_skipped() {
        let mut registry = BodyRegistry::new();
        registry.insert(body("pending", 0.1, 1.0, 4.0, false));
        let mut sim = OrbitalSimulator::new();
        sim.advance(&mut registry, 1.0);
        let pending = registry.get(&BodyId::from("pending")).unwrap();
        assert!(pending.renderable.is_none());
        assert_eq!(pending.orbital_angle, 0.0);
    }

    #[test]
    fn backwards_time_is_tolerated() {
        let mut registry = BodyRegistry::new();
        registry.insert(body("earth", 0.01, 1.0, 7.0, true));
        let mut sim = OrbitalSimulator::new();
        sim.advance(&mut registry, 5.0);
        sim.advance(&mut registry, 1.0);
        assert_eq!(sim.last_elapsed(), Some(1.0));
        let p = position(&registry, "earth");
        assert!((p.x - 7.0 * 1f32.cos()).abs() < 1e-5);
    }
}
