use glam::Vec2;
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

use orrery_assets::AssetLoader;
use orrery_common::{BodyId, Camera, Viewport};
use orrery_input::{Action, PickDispatcher};
use orrery_kernel::{BodyRegistry, BodyTable, HitSphere, OrbitalSimulator};

use crate::config::SceneConfig;
use crate::context::{ContextId, ModelPoll, SceneContext};

/// Errors from navigation requests.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("unknown body: {0}")]
    UnknownBody(BodyId),
}

/// A record produced by every navigation-relevant change.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    ContextCreated { context: ContextId, instance: Uuid },
    LoadRequested { context: ContextId, path: PathBuf },
    ModelLoaded { context: ContextId, nodes: usize },
    ModelFailed { context: ContextId, error: String },
    /// The system model was matched against the body table.
    BodiesExtracted { resolved: usize, dropped: Vec<BodyId> },
    Switched { from: ContextId, to: ContextId },
}

/// What the renderer draws this frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub context: &'a SceneContext,
    /// Animated bodies; present only for the global context.
    pub bodies: Option<&'a BodyRegistry>,
}

/// The navigation state machine.
///
/// Owns every scene context, the body registry and the simulator. The
/// global context exists from construction; surface contexts are built on
/// first visit and cached for the rest of the process. Moving directly
/// from one surface to another is allowed.
pub struct Navigator<L: AssetLoader> {
    config: SceneConfig,
    table: BodyTable,
    loader: L,
    registry: BodyRegistry,
    simulator: OrbitalSimulator,
    picker: PickDispatcher,
    global: SceneContext,
    surfaces: BTreeMap<BodyId, SceneContext>,
    active: ContextId,
    events: Vec<NavigationEvent>,
}

impl<L: AssetLoader> Navigator<L> {
    /// Build the global context and request the system model.
    pub fn new(config: SceneConfig, table: BodyTable, mut loader: L) -> Self {
        let pending = loader.load(&config.system_model);
        let global = SceneContext::new(
            ContextId::Global,
            config.background_color(),
            config.lights.clone(),
            pending,
            config.system_transform(),
        );
        tracing::info!(
            model = %config.system_model.display(),
            bodies = table.len(),
            "global context created"
        );

        let events = vec![
            NavigationEvent::ContextCreated {
                context: ContextId::Global,
                instance: global.instance(),
            },
            NavigationEvent::LoadRequested {
                context: ContextId::Global,
                path: config.system_model.clone(),
            },
        ];

        Self {
            registry: BodyRegistry::from_table(&table),
            config,
            table,
            loader,
            simulator: OrbitalSimulator::new(),
            picker: PickDispatcher::new(),
            global,
            surfaces: BTreeMap::new(),
            active: ContextId::Global,
            events,
        }
    }

    /// Advance one frame at `elapsed` simulated time.
    ///
    /// Finished loads are applied first. Motion only advances while the
    /// global context is active; surface views are static.
    pub fn tick(&mut self, elapsed: f32) {
        let _span = tracing::debug_span!("tick", elapsed).entered();
        self.pump_loads();

        if !self.active.is_global() {
            return;
        }
        self.simulator.advance(&mut self.registry, elapsed);
        self.registry.sync_hit_volumes(&self.global.model_transform());
    }

    /// Apply every load that finished since the last call.
    pub fn pump_loads(&mut self) {
        match self.global.poll_model() {
            ModelPoll::Loaded(nodes) => {
                self.events.push(NavigationEvent::ModelLoaded {
                    context: ContextId::Global,
                    nodes,
                });
                self.extract_bodies();
            }
            ModelPoll::Failed(error) => {
                self.events.push(NavigationEvent::ModelFailed {
                    context: ContextId::Global,
                    error,
                });
            }
            ModelPoll::Pending | ModelPoll::Settled => {}
        }

        for (id, context) in &mut self.surfaces {
            let event = match context.poll_model() {
                ModelPoll::Loaded(nodes) => NavigationEvent::ModelLoaded {
                    context: ContextId::Surface(id.clone()),
                    nodes,
                },
                ModelPoll::Failed(error) => NavigationEvent::ModelFailed {
                    context: ContextId::Surface(id.clone()),
                    error,
                },
                ModelPoll::Pending | ModelPoll::Settled => continue,
            };
            self.events.push(event);
        }
    }

    fn extract_bodies(&mut self) {
        let Some(graph) = self.global.subgraph() else {
            return;
        };
        let dropped = self.registry.extract(
            |id| graph.find_by_name(id.as_str()).map(|node| node.transform),
            self.config.proxy_radius,
            &self.global.model_transform(),
        );
        let resolved = self.registry.resolved_count();
        tracing::info!(resolved, dropped = dropped.len(), "bodies extracted from system model");
        self.events
            .push(NavigationEvent::BodiesExtracted { resolved, dropped });
    }

    /// Resolve a pointer click and visit the body under it, if any.
    ///
    /// Only the active context's proxies are tested; surface contexts have
    /// none, so a click there never navigates.
    pub fn handle_pick(
        &mut self,
        pointer: Vec2,
        viewport: Viewport,
        camera: &dyn Camera,
    ) -> Option<BodyId> {
        let proxies: Vec<(&BodyId, &HitSphere)> = if self.active.is_global() {
            self.registry.hit_volumes().collect()
        } else {
            Vec::new()
        };
        let hit = self.picker.resolve(pointer, viewport, camera, proxies)?;

        match self.switch_to_surface(&hit) {
            Ok(_) => Some(hit),
            Err(e) => {
                tracing::warn!("pick resolved to a body that cannot be visited: {e}");
                None
            }
        }
    }

    /// Activate the surface context of `id`, building it on first visit.
    ///
    /// Activation is immediate; the surface model keeps loading in the
    /// background and the context renders lit but empty until it arrives.
    pub fn switch_to_surface(&mut self, id: &BodyId) -> Result<&SceneContext, NavigationError> {
        if !self.table.contains(id) {
            tracing::warn!(%id, "surface requested for unknown body");
            return Err(NavigationError::UnknownBody(id.clone()));
        }

        if !self.surfaces.contains_key(id) {
            let context = self.build_surface(id);
            self.surfaces.insert(id.clone(), context);
        }

        self.activate(ContextId::Surface(id.clone()));
        Ok(self.active_context())
    }

    /// Return to the shared global context. Always succeeds.
    pub fn switch_to_global(&mut self) -> &SceneContext {
        self.activate(ContextId::Global);
        &self.global
    }

    /// Route a navigation action; camera actions are ignored here.
    pub fn apply(
        &mut self,
        action: &Action,
        viewport: Viewport,
        camera: &dyn Camera,
    ) -> Result<(), NavigationError> {
        match action {
            Action::Pick(pointer) => {
                self.handle_pick(*pointer, viewport, camera);
            }
            Action::VisitSurface(id) => {
                self.switch_to_surface(id)?;
            }
            Action::ReturnToGlobal => {
                self.switch_to_global();
            }
            Action::Orbit(_) | Action::Zoom(_) | Action::Noop => {}
        }
        Ok(())
    }

    fn build_surface(&mut self, id: &BodyId) -> SceneContext {
        let path = self.config.surface_model_path(id);
        let pending = self.loader.load(&path);
        let context = SceneContext::new(
            ContextId::Surface(id.clone()),
            self.config.background_color(),
            self.config.lights.clone(),
            pending,
            self.config.surface_transform(),
        );
        tracing::info!(%id, model = %path.display(), "surface context created");

        let context_id = ContextId::Surface(id.clone());
        self.events.push(NavigationEvent::ContextCreated {
            context: context_id.clone(),
            instance: context.instance(),
        });
        self.events.push(NavigationEvent::LoadRequested {
            context: context_id,
            path,
        });
        context
    }

    fn activate(&mut self, to: ContextId) {
        if self.active == to {
            return;
        }
        let from = std::mem::replace(&mut self.active, to.clone());
        tracing::info!(%from, %to, "switched scene context");
        self.events.push(NavigationEvent::Switched { from, to });
    }

    pub fn active_id(&self) -> &ContextId {
        &self.active
    }

    pub fn is_global(&self) -> bool {
        self.active.is_global()
    }

    pub fn active_context(&self) -> &SceneContext {
        match &self.active {
            ContextId::Global => &self.global,
            // Surface ids are inserted before they become active.
            ContextId::Surface(id) => self.surfaces.get(id).unwrap_or(&self.global),
        }
    }

    pub fn global_context(&self) -> &SceneContext {
        &self.global
    }

    pub fn surface(&self, id: &BodyId) -> Option<&SceneContext> {
        self.surfaces.get(id)
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &SceneContext> {
        self.surfaces.values()
    }

    /// Pick proxies of the active context.
    pub fn interactive_proxies(&self) -> Vec<(&BodyId, &HitSphere)> {
        if self.active.is_global() {
            self.registry.hit_volumes().collect()
        } else {
            Vec::new()
        }
    }

    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            context: self.active_context(),
            bodies: self.active.is_global().then_some(&self.registry),
        }
    }

    /// Number of contexts currently waiting on a model.
    pub fn pending_loads(&self) -> usize {
        std::iter::once(&self.global)
            .chain(self.surfaces.values())
            .filter(|c| c.is_loading())
            .count()
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn simulator(&self) -> &OrbitalSimulator {
        &self.simulator
    }

    pub fn picker(&self) -> &PickDispatcher {
        &self.picker
    }

    pub fn table(&self) -> &BodyTable {
        &self.table
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn events(&self) -> &[NavigationEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<NavigationEvent> {
        std::mem::take(&mut self.events)
    }
}
