//! Orrery kernel: the body table, the body registry and the orbital simulator.
//!
//! # Invariants
//! - The body table is schema-checked before any body is simulated.
//! - Only the simulator mutates body motion state.
//! - Bodies whose renderable proxy has not resolved are skipped, never failed.

pub mod body;
pub mod registry;
pub mod simulator;
pub mod table;

pub use body::{CelestialBody, HitSphere, OrbitParams, RenderProxy};
pub use registry::BodyRegistry;
pub use simulator::OrbitalSimulator;
pub use table::{BodySpec, BodyTable, TableError};

pub fn crate_info() -> &'static str {
    "orrery-kernel v0.1.0"
}
