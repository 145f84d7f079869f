use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orrery_assets::{PendingAsset, SceneSubgraph};
use orrery_common::{BodyId, Color, Transform};

/// Which view a context represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContextId {
    /// The shared solar-system view.
    Global,
    /// The surface view of one body.
    Surface(BodyId),
}

impl ContextId {
    pub fn is_global(&self) -> bool {
        matches!(self, ContextId::Global)
    }

    pub fn body(&self) -> Option<&BodyId> {
        match self {
            ContextId::Global => None,
            ContextId::Surface(id) => Some(id),
        }
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextId::Global => f.write_str("global"),
            ContextId::Surface(id) => write!(f, "surface:{id}"),
        }
    }
}

/// Scene lighting. Colors are packed `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    Ambient { color: u32, intensity: f32 },
    Directional { color: u32, intensity: f32, position: Vec3 },
}

/// Load state of a context's model.
#[derive(Debug)]
pub enum ModelSlot {
    Loading(PendingAsset),
    Ready(SceneSubgraph),
    /// The context keeps rendering its background and lights only.
    Failed(String),
}

/// Outcome of polling a context's model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelPoll {
    /// Still loading.
    Pending,
    /// Finished this poll with a graph of this many nodes.
    Loaded(usize),
    /// Failed this poll.
    Failed(String),
    /// Already finished on an earlier poll.
    Settled,
}

/// One navigable view: background, lights and a model.
///
/// Structure is fixed at creation; only the model slot changes, once,
/// when its load completes.
#[derive(Debug)]
pub struct SceneContext {
    id: ContextId,
    instance: Uuid,
    background: Color,
    lights: Vec<Light>,
    model: ModelSlot,
    model_transform: Transform,
}

impl SceneContext {
    pub fn new(
        id: ContextId,
        background: Color,
        lights: Vec<Light>,
        model: PendingAsset,
        model_transform: Transform,
    ) -> Self {
        Self {
            id,
            instance: Uuid::new_v4(),
            background,
            lights,
            model: ModelSlot::Loading(model),
            model_transform,
        }
    }

    pub fn id(&self) -> &ContextId {
        &self.id
    }

    /// Unique per context object; stable for the context's lifetime.
    pub fn instance(&self) -> Uuid {
        self.instance
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn model(&self) -> &ModelSlot {
        &self.model
    }

    /// Transform applied to the whole model (the system group for the
    /// global context).
    pub fn model_transform(&self) -> Transform {
        self.model_transform
    }

    pub fn subgraph(&self) -> Option<&SceneSubgraph> {
        match &self.model {
            ModelSlot::Ready(graph) => Some(graph),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.model, ModelSlot::Loading(_))
    }

    /// Check the in-flight load and settle the slot if it has finished.
    pub fn poll_model(&mut self) -> ModelPoll {
        let ModelSlot::Loading(pending) = &mut self.model else {
            return ModelPoll::Settled;
        };
        match pending.poll() {
            None => ModelPoll::Pending,
            Some(Ok(graph)) => {
                let nodes = graph.len();
                tracing::info!(context = %self.id, nodes, "model loaded");
                self.model = ModelSlot::Ready(graph);
                ModelPoll::Loaded(nodes)
            }
            Some(Err(e)) => {
                tracing::error!(context = %self.id, "model failed to load: {e}");
                let message = e.to_string();
                self.model = ModelSlot::Failed(message.clone());
                ModelPoll::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_assets::AssetError;

    fn context(pending: PendingAsset) -> SceneContext {
        SceneContext::new(
            ContextId::Surface(BodyId::from("mars")),
            Color::BLACK,
            vec![Light::Ambient {
                color: 0xffffff,
                intensity: 0.5,
            }],
            pending,
            Transform::default(),
        )
    }

    #[test]
    fn context_id_display() {
        assert_eq!(ContextId::Global.to_string(), "global");
        assert_eq!(
            ContextId::Surface(BodyId::from("mars")).to_string(),
            "surface:mars"
        );
        assert!(ContextId::Global.body().is_none());
    }

    #[test]
    fn model_settles_once() {
        let (completer, pending) = PendingAsset::channel("mars_surface.glb");
        let mut ctx = context(pending);
        assert!(ctx.is_loading());
        assert_eq!(ctx.poll_model(), ModelPoll::Pending);

        completer.complete(Ok(SceneSubgraph::new()));
        assert_eq!(ctx.poll_model(), ModelPoll::Loaded(0));
        assert!(ctx.subgraph().is_some());
        assert_eq!(ctx.poll_model(), ModelPoll::Settled);
    }

    #[test]
    fn failed_model_keeps_lights() {
        let pending = PendingAsset::ready("mars_surface.glb", Err(AssetError::Gltf("bad".into())));
        let mut ctx = context(pending);
        assert!(matches!(ctx.poll_model(), ModelPoll::Failed(_)));
        assert!(matches!(ctx.model(), ModelSlot::Failed(_)));
        assert!(ctx.subgraph().is_none());
        assert_eq!(ctx.lights().len(), 1);
        assert_eq!(ctx.background(), Color::BLACK);
    }

    #[test]
    fn instances_are_unique() {
        let a = context(PendingAsset::ready("a", Ok(SceneSubgraph::new())));
        let b = context(PendingAsset::ready("a", Ok(SceneSubgraph::new())));
        assert_ne!(a.instance(), b.instance());
    }

    #[test]
    fn light_yaml_shape() {
        let light: Light = serde_yaml::from_str(
            "kind: directional\ncolor: 16777215\nintensity: 1.0\nposition: [10.0, 10.0, 10.0]\n",
        )
        .unwrap();
        assert_eq!(
            light,
            Light::Directional {
                color: 0xffffff,
                intensity: 1.0,
                position: Vec3::splat(10.0),
            }
        );
    }
}
