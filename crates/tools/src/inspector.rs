use orrery_assets::AssetLoader;
use orrery_common::BodyId;
use orrery_scene::{ContextId, Navigator};

/// Navigator inspector for developer tooling.
///
/// Provides read-only queries against navigation and body state for
/// debugging and the CLI.
pub struct NavigatorInspector;

impl NavigatorInspector {
    /// Produce a summary of the navigator state.
    pub fn summary<L: AssetLoader>(nav: &Navigator<L>) -> NavigationSummary {
        let (picks, pick_misses) = nav.picker().stats();
        NavigationSummary {
            active: nav.active_id().clone(),
            surfaces: nav.surfaces().count(),
            bodies: nav.registry().len(),
            resolved: nav.registry().resolved_count(),
            pending_loads: nav.pending_loads(),
            steps: nav.simulator().steps(),
            picks,
            pick_misses,
            pending_events: nav.events().len(),
        }
    }

    /// Current state of one body, if it is still in the registry.
    pub fn inspect_body<L: AssetLoader>(nav: &Navigator<L>, id: &BodyId) -> Option<BodyInfo> {
        nav.registry().get(id).map(|body| {
            let proxy = body.renderable;
            BodyInfo {
                id: body.id.clone(),
                position: proxy.map(|p| p.position.to_array()),
                rotation_y: proxy.map(|p| p.rotation_y),
                orbital_angle: body.orbital_angle,
                orbital_radius: body.params.orbital_radius,
                visited: nav.surface(id).is_some(),
            }
        })
    }

    /// Ids of every body still in the registry, in id order.
    pub fn list_bodies<L: AssetLoader>(nav: &Navigator<L>) -> Vec<BodyId> {
        nav.registry().iter().map(|b| b.id.clone()).collect()
    }
}

/// Summary of navigator state for the inspector.
#[derive(Debug, Clone)]
pub struct NavigationSummary {
    pub active: ContextId,
    /// Surface contexts built so far.
    pub surfaces: usize,
    pub bodies: usize,
    pub resolved: usize,
    pub pending_loads: usize,
    pub steps: u64,
    pub picks: u64,
    pub pick_misses: u64,
    pub pending_events: usize,
}

impl std::fmt::Display for NavigationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Navigator: active={} surfaces={} bodies={}/{} loading={} steps={} picks={} misses={} pending_events={}",
            self.active,
            self.surfaces,
            self.resolved,
            self.bodies,
            self.pending_loads,
            self.steps,
            self.picks,
            self.pick_misses,
            self.pending_events
        )
    }
}

/// Detailed info about a single body.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub id: BodyId,
    /// `None` until the system model has loaded.
    pub position: Option<[f32; 3]>,
    pub rotation_y: Option<f32>,
    pub orbital_angle: f32,
    pub orbital_radius: f32,
    /// Whether its surface context has been built.
    pub visited: bool,
}

impl std::fmt::Display for BodyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.position, self.rotation_y) {
            (Some(p), Some(rot)) => write!(
                f,
                "Body {} pos=({:.2}, {:.2}, {:.2}) rot_y={:.3} angle={:.3} r={:.1}",
                self.id, p[0], p[1], p[2], rot, self.orbital_angle, self.orbital_radius
            ),
            _ => write!(f, "Body {} (not loaded) r={:.1}", self.id, self.orbital_radius),
        }?;
        if self.visited {
            f.write_str(" visited")?;
        }
        Ok(())
    }
}
