use std::path::{Path, PathBuf};

use crate::pending::PendingAsset;
use crate::{gltf, AssetError};

/// Asynchronous asset source.
///
/// `load` returns immediately; the result arrives later through the
/// returned [`PendingAsset`]. Each request completes once and is never
/// retried.
pub trait AssetLoader {
    fn load(&mut self, path: &Path) -> PendingAsset;
}

/// Reads glTF/GLB files from disk on a background thread.
#[derive(Debug, Clone)]
pub struct GltfFileLoader {
    root: PathBuf,
    requests: usize,
}

impl GltfFileLoader {
    /// Resolve relative request paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            requests: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of load requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Blocking read and parse, as run on the worker thread.
    pub fn read(path: &Path) -> Result<crate::SceneSubgraph, AssetError> {
        let bytes = std::fs::read(path)?;
        gltf::parse(&bytes)
    }
}

impl AssetLoader for GltfFileLoader {
    fn load(&mut self, path: &Path) -> PendingAsset {
        let full = self.root.join(path);
        self.requests += 1;
        tracing::debug!(path = %full.display(), "asset load requested");

        let (completer, pending) = PendingAsset::channel(full.clone());
        let spawned = std::thread::Builder::new()
            .name("asset-load".into())
            .spawn(move || {
                let result = Self::read(&full);
                if let Err(e) = &result {
                    tracing::debug!(path = %full.display(), "asset read failed: {e}");
                }
                completer.complete(result);
            });
        if let Err(e) = spawned {
            // The closure, and the completer inside it, is dropped with the
            // error, so the promise resolves as abandoned.
            tracing::error!("failed to spawn asset loader thread: {e}");
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gltf::tests::{to_glb, SYSTEM_GLTF};
    use std::time::{Duration, Instant};

    fn wait(pending: &mut PendingAsset) -> crate::LoadResult {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = pending.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "load never completed");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn loads_glb_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("system.glb"), to_glb(SYSTEM_GLTF)).unwrap();

        let mut loader = GltfFileLoader::new(dir.path());
        let mut pending = loader.load(Path::new("system.glb"));
        let graph = wait(&mut pending).unwrap();
        assert!(graph.find_by_name("mars_BezierCircle_14").is_some());
        assert_eq!(loader.requests(), 1);
        assert_eq!(pending.path(), dir.path().join("system.glb"));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = GltfFileLoader::new(dir.path());
        let mut pending = loader.load(Path::new("nope_surface.glb"));
        assert!(matches!(wait(&mut pending), Err(AssetError::Io(_))));
    }

    #[test]
    fn blocking_read_parses_gltf() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), SYSTEM_GLTF).unwrap();
        let graph = GltfFileLoader::read(tmp.path()).unwrap();
        assert_eq!(graph.mesh_count, 3);
    }
}
