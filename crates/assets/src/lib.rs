//! Asset loading behind an asynchronous seam.
//!
//! Models are read as glTF node graphs. The core never blocks on a load:
//! it receives a [`PendingAsset`] and polls it from the frame loop.
//!
//! # Invariants
//! - Every load request completes exactly once, with a graph or an error.
//! - No request is retried.

pub mod gltf;
mod loader;
mod pending;
mod subgraph;

use std::path::PathBuf;

pub use loader::{AssetLoader, GltfFileLoader};
pub use pending::{Completer, LoadResult, PendingAsset};
pub use subgraph::{SceneNode, SceneSubgraph};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("glTF error: {0}")]
    Gltf(String),
    #[error("GLB container error: {0}")]
    Glb(String),
    #[error("load of {} was abandoned before completing", .0.display())]
    Abandoned(PathBuf),
}

pub fn crate_info() -> &'static str {
    "orrery-assets v0.1.0"
}
