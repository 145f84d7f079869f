//! Developer Tooling: read-only inspection of a running navigator.
//!
//! # Invariants
//! - Inspection never mutates navigation or body state.

mod inspector;

pub use inspector::{BodyInfo, NavigationSummary, NavigatorInspector};

pub fn crate_info() -> &'static str {
    "orrery-tools v0.1.0"
}
