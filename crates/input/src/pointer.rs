use glam::Vec2;

use crate::action::Action;

/// Pointer travel, in pixels, above which a press becomes a drag.
const CLICK_SLOP: f32 = 4.0;
const WHEEL_ZOOM: f32 = 1.2;
const PINCH_IN: f32 = 0.98;
const PINCH_OUT: f32 = 1.02;

/// Turns raw mouse/touch events into camera and pick actions.
///
/// A press followed by a release without significant travel is a click
/// and yields [`Action::Pick`]. Moving while pressed yields
/// [`Action::Orbit`] deltas.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pressed_at: Option<Vec2>,
    last: Vec2,
    travelled: f32,
    last_pinch: Option<f32>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn press(&mut self, pos: Vec2) {
        self.pressed_at = Some(pos);
        self.last = pos;
        self.travelled = 0.0;
    }

    /// Pointer moved; returns a rotation delta while a button is held.
    pub fn move_to(&mut self, pos: Vec2) -> Option<Action> {
        self.pressed_at?;
        let delta = pos - self.last;
        self.last = pos;
        self.travelled += delta.length();
        (delta != Vec2::ZERO).then_some(Action::Orbit(delta))
    }

    /// Button released; returns a pick if the press was a click.
    pub fn release(&mut self, pos: Vec2) -> Option<Action> {
        let start = self.pressed_at.take()?;
        let travelled = self.travelled + (pos - self.last).length();
        if travelled <= CLICK_SLOP {
            tracing::trace!(x = start.x, y = start.y, "click");
            Some(Action::Pick(pos))
        } else {
            None
        }
    }

    /// Scroll wheel: positive `delta_y` moves away, negative moves closer.
    pub fn wheel(&mut self, delta_y: f32) -> Action {
        if delta_y > 0.0 {
            Action::Zoom(WHEEL_ZOOM)
        } else {
            Action::Zoom(1.0 / WHEEL_ZOOM)
        }
    }

    /// Two-finger gesture with the current distance between the touches.
    pub fn pinch(&mut self, distance: f32) -> Option<Action> {
        let previous = self.last_pinch.replace(distance)?;
        let factor = if distance > previous { PINCH_IN } else { PINCH_OUT };
        Some(Action::Zoom(factor))
    }

    /// Touches lifted; the next pinch starts fresh.
    pub fn end_pinch(&mut self) {
        self.last_pinch = None;
    }
}
