//! Scene navigation: the global system view, lazily built surface views,
//! and the state machine that switches between them.
//!
//! # Invariants
//! - The active context id always resolves to an existing context.
//! - Contexts are created once and never destroyed.
//! - Orbital motion only advances while the global context is active.
//! - Navigation never waits on an asset load.

pub mod config;
pub mod context;
pub mod navigator;

pub use config::{ConfigError, SceneConfig};
pub use context::{ContextId, Light, ModelPoll, ModelSlot, SceneContext};
pub use navigator::{NavigationError, NavigationEvent, Navigator, RenderFrame};

pub fn crate_info() -> &'static str {
    "orrery-scene v0.1.0"
}
