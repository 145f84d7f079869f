use glam::Vec2;

use orrery_common::{BodyId, Camera, Viewport};
use orrery_kernel::HitSphere;

/// One proxy under the pick ray.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub id: BodyId,
    pub distance: f32,
}

/// Resolves which body lies under the pointer.
#[derive(Debug, Clone, Default)]
pub struct PickDispatcher {
    picks: u64,
    misses: u64,
}

impl PickDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total picks resolved, and how many hit nothing.
    pub fn stats(&self) -> (u64, u64) {
        (self.picks, self.misses)
    }

    /// Every proxy the ray through `pointer` intersects, nearest first.
    ///
    /// The sort is stable, so proxies at equal distance keep the order in
    /// which they were supplied.
    pub fn intersect_all<'a>(
        &self,
        pointer: Vec2,
        viewport: Viewport,
        camera: &dyn Camera,
        proxies: impl IntoIterator<Item = (&'a BodyId, &'a HitSphere)>,
    ) -> Vec<PickHit> {
        let ray = camera.pick_ray(viewport.to_ndc(pointer));
        let mut hits: Vec<PickHit> = proxies
            .into_iter()
            .filter_map(|(id, sphere)| {
                ray.intersect_sphere(sphere.center, sphere.radius)
                    .map(|distance| PickHit {
                        id: id.clone(),
                        distance,
                    })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Id of the nearest proxy under the pointer, or `None` on a miss.
    ///
    /// Only the proxies passed in are tested; hand it the active context's
    /// set so picks never leak across contexts.
    pub fn resolve<'a>(
        &mut self,
        pointer: Vec2,
        viewport: Viewport,
        camera: &dyn Camera,
        proxies: impl IntoIterator<Item = (&'a BodyId, &'a HitSphere)>,
    ) -> Option<BodyId> {
        self.picks += 1;
        let hit = self
            .intersect_all(pointer, viewport, camera, proxies)
            .into_iter()
            .next();
        match &hit {
            Some(hit) => tracing::debug!(id = %hit.id, distance = hit.distance, "pick hit"),
            None => {
                self.misses += 1;
                tracing::trace!(x = pointer.x, y = pointer.y, "pick missed");
            }
        }
        hit.map(|h| h.id)
    }
}
