use orrery_common::Camera;
use orrery_scene::{Light, ModelSlot, RenderFrame};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the active context and the camera once per frame,
/// after the navigator has ticked, and produces output.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the active context.
    fn render(&self, frame: &RenderFrame<'_>, camera: &dyn Camera) -> Self::Output;
}

/// Debug text renderer; stands in for a GPU backend.
///
/// Produces a human-readable description of what would be drawn. Useful
/// for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Cap on listed bodies; `None` lists all of them.
    pub max_bodies: Option<usize>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_bodies(max_bodies: usize) -> Self {
        Self {
            max_bodies: Some(max_bodies),
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &RenderFrame<'_>, camera: &dyn Camera) -> String {
        let ctx = frame.context;
        let mut out = String::new();
        out.push_str(&format!(
            "=== Context {} [{:.8}] ===\n",
            ctx.id(),
            ctx.instance().to_string()
        ));
        out.push_str(&format!("Background: #{:06x}\n", ctx.background().to_hex()));

        let p = camera.position();
        out.push_str(&format!("Camera: pos=({:.1}, {:.1}, {:.1})\n", p.x, p.y, p.z));

        for light in ctx.lights() {
            match light {
                Light::Ambient { color, intensity } => {
                    out.push_str(&format!("Light: ambient #{color:06x} x{intensity:.2}\n"));
                }
                Light::Directional {
                    color,
                    intensity,
                    position,
                } => out.push_str(&format!(
                    "Light: directional #{color:06x} x{intensity:.2} from ({:.1}, {:.1}, {:.1})\n",
                    position.x, position.y, position.z
                )),
            }
        }

        match ctx.model() {
            ModelSlot::Loading(pending) => {
                out.push_str(&format!("Model: loading {}\n", pending.path().display()));
            }
            ModelSlot::Ready(graph) => out.push_str(&format!(
                "Model: {} nodes, {} meshes\n",
                graph.len(),
                graph.mesh_count
            )),
            ModelSlot::Failed(error) => {
                out.push_str(&format!("Model: unavailable ({error})\n"));
            }
        }

        if let Some(registry) = frame.bodies {
            out.push_str(&format!(
                "Bodies: {} ({} resolved)\n",
                registry.len(),
                registry.resolved_count()
            ));
            let limit = self.max_bodies.unwrap_or(usize::MAX);
            for body in registry.iter().take(limit) {
                match &body.renderable {
                    Some(proxy) => out.push_str(&format!(
                        "  {} pos=({:.2}, {:.2}, {:.2}) rot_y={:.3}\n",
                        body.id,
                        proxy.position.x,
                        proxy.position.y,
                        proxy.position.z,
                        proxy.rotation_y
                    )),
                    None => out.push_str(&format!("  {} (pending)\n", body.id)),
                }
            }
        }

        out
    }
}
