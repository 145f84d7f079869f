use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use orrery_common::{BodyId, Transform};

use crate::body::{CelestialBody, HitSphere, RenderProxy};
use crate::table::BodyTable;

/// All simulated bodies, keyed by id.
///
/// Uses BTreeMap so iteration (and therefore pick tie-breaking) is
/// deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyRegistry {
    bodies: BTreeMap<BodyId, CelestialBody>,
    extracted: bool,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one unresolved entry per table row.
    pub fn from_table(table: &BodyTable) -> Self {
        let bodies = table
            .iter()
            .map(|spec| (spec.id.clone(), CelestialBody::new(spec.id.clone(), spec.params())))
            .collect();
        Self {
            bodies,
            extracted: false,
        }
    }

    pub fn insert(&mut self, body: CelestialBody) {
        self.bodies.insert(body.id.clone(), body);
    }

    /// Resolve every body against the loaded system model.
    ///
    /// `lookup` finds a node by name and returns its local transform. Bodies
    /// the model does not contain are removed and returned; they are never
    /// retried. Extraction happens at most once per registry.
    pub fn extract(
        &mut self,
        lookup: impl Fn(&BodyId) -> Option<Transform>,
        proxy_radius: f32,
        group: &Transform,
    ) -> Vec<BodyId> {
        if self.extracted {
            tracing::warn!("body registry already extracted; ignoring second model");
            return Vec::new();
        }
        self.extracted = true;

        let mut dropped = Vec::new();
        for (id, body) in &mut self.bodies {
            match lookup(id) {
                Some(node) => {
                    let proxy = RenderProxy::from_node(&node);
                    body.hit_volume = Some(HitSphere {
                        center: group.transform_point(proxy.position),
                        radius: proxy_radius,
                    });
                    body.renderable = Some(proxy);
                    tracing::debug!(%id, "body found in system model");
                }
                None => {
                    tracing::warn!(%id, "body not found in system model; dropping it");
                    dropped.push(id.clone());
                }
            }
        }
        for id in &dropped {
            self.bodies.remove(id);
        }
        dropped
    }

    pub fn is_extracted(&self) -> bool {
        self.extracted
    }

    /// Move every hit sphere onto its body's current world position.
    pub fn sync_hit_volumes(&mut self, group: &Transform) {
        for body in self.bodies.values_mut() {
            if let (Some(proxy), Some(hit)) = (&body.renderable, &mut body.hit_volume) {
                hit.center = group.transform_point(proxy.position);
            }
        }
    }

    /// Interactive proxies of all resolved bodies, in id order.
    pub fn hit_volumes(&self) -> impl Iterator<Item = (&BodyId, &HitSphere)> {
        self.bodies
            .iter()
            .filter_map(|(id, body)| body.hit_volume.as_ref().map(|hit| (id, hit)))
    }

    pub fn get(&self, id: &BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id)
    }

    pub fn get_mut(&mut self, id: &BodyId) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(id)
    }

    pub fn contains(&self, id: &BodyId) -> bool {
        self.bodies.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CelestialBody> {
        self.bodies.values_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of bodies with a resolved renderable proxy.
    pub fn resolved_count(&self) -> usize {
        self.bodies.values().filter(|b| b.is_resolved()).count()
    }
}
