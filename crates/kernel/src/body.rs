use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use orrery_common::{BodyId, Transform};

/// Simulation parameters of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitParams {
    /// Radians added to the self-rotation angle on every simulation step.
    pub rotation_speed: f32,
    /// Radians per unit of simulated time. Zero keeps the body in place.
    pub orbital_speed: f32,
    pub orbital_radius: f32,
}

impl OrbitParams {
    pub fn orbits(&self) -> bool {
        self.orbital_speed > 0.0
    }
}

/// Logical state of the body's node in the system model.
///
/// Position is local to the system group; the renderer applies the group
/// transform on top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderProxy {
    pub position: Vec3,
    /// Orientation of the node as authored, tilt included.
    pub base_rotation: Quat,
    /// Self-rotation accumulated since load, around the node's local Y
    /// axis, in radians.
    pub rotation_y: f32,
    pub scale: Vec3,
}

impl RenderProxy {
    /// Adopt a node's transform as found in the loaded model.
    pub fn from_node(transform: &Transform) -> Self {
        Self {
            position: transform.position,
            base_rotation: transform.rotation,
            rotation_y: 0.0,
            scale: transform.scale,
        }
    }

    /// Spin is applied about the node's own Y axis, after its authored
    /// orientation.
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.base_rotation * Quat::from_rotation_y(self.rotation_y),
            scale: self.scale,
        }
    }
}

/// Invisible sphere tested by the pick ray, in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// One simulated body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub id: BodyId,
    pub params: OrbitParams,
    /// Current orbital phase in radians.
    pub orbital_angle: f32,
    /// Absent until the system model has loaded.
    pub renderable: Option<RenderProxy>,
    /// Absent until the system model has loaded.
    pub hit_volume: Option<HitSphere>,
}

impl CelestialBody {
    pub fn new(id: BodyId, params: OrbitParams) -> Self {
        Self {
            id,
            params,
            orbital_angle: 0.0,
            renderable: None,
            hit_volume: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.renderable.is_some()
    }
}
