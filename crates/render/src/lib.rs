//! Rendering Adapter: renderer-agnostic interface and the viewing camera.
//!
//! # Invariants
//! - Renderers read a [`RenderFrame`](orrery_scene::RenderFrame); they never
//!   mutate navigation or body state.
//! - The camera is outside the simulation; moving it never changes what
//!   the navigator does on `tick`.
//!
//! A debug text renderer stands in for a GPU backend. The trait is stable;
//! swap in a real backend without changing consumers.

mod camera;
mod renderer;

pub use camera::CursorCamera;
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "orrery-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
