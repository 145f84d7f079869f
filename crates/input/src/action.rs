use glam::Vec2;
use orrery_common::BodyId;

/// A high-level action produced from raw input.
///
/// Navigation and the camera consume actions, never raw events.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Select whatever lies under the pointer (pixel coordinates).
    Pick(Vec2),
    /// Go to the surface view of a specific body.
    VisitSurface(BodyId),
    /// Return to the solar-system view.
    ReturnToGlobal,
    /// Rotate the camera by a pointer delta in pixels.
    Orbit(Vec2),
    /// Multiply the camera distance by this factor.
    Zoom(f32),
    /// Input mapping that hasn't been bound.
    Noop,
}

impl Action {
    /// Whether this action targets navigation rather than the camera.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Action::Pick(_) | Action::VisitSurface(_) | Action::ReturnToGlobal
        )
    }
}
