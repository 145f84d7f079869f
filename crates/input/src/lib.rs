//! Input: raw pointer and key events mapped to navigation actions.
//!
//! # Invariants
//! - Navigation consumes [`Action`]s, never raw events.
//! - A pick only ever tests the proxies it is handed; callers pass the
//!   active context's set.

pub mod action;
pub mod bindings;
pub mod pick;
pub mod pointer;

pub use action::Action;
pub use bindings::{Key, KeyBindings};
pub use pick::{PickDispatcher, PickHit};
pub use pointer::PointerTracker;

pub fn crate_info() -> &'static str {
    "orrery-input v0.1.0"
}
