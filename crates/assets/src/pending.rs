use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::subgraph::SceneSubgraph;
use crate::AssetError;

pub type LoadResult = Result<SceneSubgraph, AssetError>;

/// Promise side of an in-flight asset load.
///
/// Completes exactly once. The owner polls it from the frame loop; polling
/// never blocks.
#[derive(Debug)]
pub struct PendingAsset {
    path: PathBuf,
    rx: Receiver<LoadResult>,
}

/// Resolver side of a [`PendingAsset`]. Dropping it without completing
/// resolves the promise as abandoned.
#[derive(Debug)]
pub struct Completer {
    path: PathBuf,
    tx: Sender<LoadResult>,
}

impl PendingAsset {
    /// A linked promise/resolver pair for `path`.
    pub fn channel(path: impl Into<PathBuf>) -> (Completer, PendingAsset) {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        (
            Completer {
                path: path.clone(),
                tx,
            },
            PendingAsset { path, rx },
        )
    }

    /// A promise that is already resolved.
    pub fn ready(path: impl Into<PathBuf>, result: LoadResult) -> Self {
        let (completer, pending) = Self::channel(path);
        completer.complete(result);
        pending
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` while the load is still running.
    pub fn poll(&mut self) -> Option<LoadResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AssetError::Abandoned(self.path.clone()))),
        }
    }
}

impl Completer {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn complete(self, result: LoadResult) {
        // The promise may have been dropped already; nobody is waiting then.
        let _ = self.tx.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_until_completed() {
        let (completer, mut pending) = PendingAsset::channel("mars_surface.glb");
        assert!(pending.poll().is_none());
        assert!(pending.poll().is_none());
        completer.complete(Ok(SceneSubgraph::new()));
        assert!(matches!(pending.poll(), Some(Ok(_))));
    }

    #[test]
    fn ready_resolves_on_first_poll() {
        let mut pending = PendingAsset::ready(
            "x.glb",
            Err(AssetError::Gltf("broken".into())),
        );
        assert_eq!(pending.path(), Path::new("x.glb"));
        assert!(matches!(pending.poll(), Some(Err(AssetError::Gltf(_)))));
    }

    #[test]
    fn dropped_completer_is_abandoned() {
        let (completer, mut pending) = PendingAsset::channel("lost.glb");
        drop(completer);
        assert!(matches!(pending.poll(), Some(Err(AssetError::Abandoned(_)))));
    }

    #[test]
    fn completing_after_drop_is_harmless() {
        let (completer, pending) = PendingAsset::channel("late.glb");
        drop(pending);
        completer.complete(Ok(SceneSubgraph::new()));
    }
}
