//! Shared types for the orrery workspace.
//!
//! # Invariants
//! - Body identifiers are stable strings taken verbatim from the body table.
//! - Rays handed out by a [`Camera`] always carry a normalized direction.

pub mod camera;
pub mod types;

pub use camera::{Camera, Ray};
pub use types::{BodyId, Color, Transform, Viewport};

pub fn crate_info() -> &'static str {
    "orrery-common v0.1.0"
}
