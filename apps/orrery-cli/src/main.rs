use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use orrery_assets::{AssetLoader, GltfFileLoader};
use orrery_common::Viewport;
use orrery_input::{Action, Key, KeyBindings};
use orrery_kernel::BodyTable;
use orrery_render::{CursorCamera, DebugTextRenderer, Renderer};
use orrery_scene::{NavigationEvent, Navigator, SceneConfig};
use orrery_tools::NavigatorInspector;

#[derive(Parser)]
#[command(name = "orrery-cli", about = "CLI tool for solar-system navigation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info and the configured bodies
    Info {
        /// Body table to list instead of the built-in one
        #[arg(long)]
        bodies: Option<PathBuf>,
    },
    /// Load and schema-check a YAML body table
    Validate {
        /// Path to the body table
        table: PathBuf,
    },
    /// Run a headless navigation session
    Run {
        /// Directory model paths are resolved against
        #[arg(long, default_value = ".")]
        assets: PathBuf,
        /// YAML body table; defaults to the eight planets
        #[arg(long)]
        bodies: Option<PathBuf>,
        /// YAML scene config; defaults to the built-in layout
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of frames to run
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Simulated milliseconds per frame
        #[arg(long, default_value = "16.0")]
        frame_ms: f32,
        /// Multiplier on simulated time
        #[arg(long, default_value = "1.0")]
        time_scale: f32,
        /// Viewport width in pixels
        #[arg(long, default_value = "800")]
        width: f32,
        /// Viewport height in pixels
        #[arg(long, default_value = "600")]
        height: f32,
        /// Click at FRAME:X:Y (pixels); repeatable
        #[arg(long = "pick", value_parser = parse_pick)]
        picks: Vec<(u64, Vec2)>,
        /// Press KEY at FRAME:KEY; repeatable
        #[arg(long = "key", value_parser = parse_key)]
        keys: Vec<(u64, Key)>,
        /// Print a debug render every N frames; 0 disables
        #[arg(long, default_value = "120")]
        print_every: u64,
        /// Wait up to this many milliseconds for the system model before
        /// the first frame; by default frames start immediately
        #[arg(long)]
        wait_for_system_ms: Option<u64>,
    },
}

fn parse_pick(s: &str) -> Result<(u64, Vec2), String> {
    let mut parts = s.split(':');
    let (Some(frame), Some(x), Some(y), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected FRAME:X:Y, got {s:?}"));
    };
    let frame = frame
        .parse()
        .map_err(|e| format!("bad frame {frame:?}: {e}"))?;
    let x = x.parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y = y.parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok((frame, Vec2::new(x, y)))
}

fn parse_key(s: &str) -> Result<(u64, Key), String> {
    let Some((frame, key)) = s.split_once(':') else {
        return Err(format!("expected FRAME:KEY, got {s:?}"));
    };
    let frame = frame
        .parse()
        .map_err(|e| format!("bad frame {frame:?}: {e}"))?;
    let key = Key::parse(key).ok_or_else(|| format!("unknown key {key:?}"))?;
    Ok((frame, key))
}

fn load_table(path: Option<&PathBuf>) -> anyhow::Result<BodyTable> {
    match path {
        Some(path) => BodyTable::load(path)
            .with_context(|| format!("loading body table {}", path.display())),
        None => Ok(BodyTable::solar_system()),
    }
}

/// Pump loads until the system model settles or `timeout` passes.
fn wait_for_system<L: AssetLoader>(nav: &mut Navigator<L>, timeout: Duration) {
    let start = Instant::now();
    nav.pump_loads();
    while nav.global_context().is_loading() {
        if start.elapsed() >= timeout {
            tracing::warn!("system model still loading; starting anyway");
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
        nav.pump_loads();
    }
}

/// Apply one frame's actions, then tick.
///
/// Navigation never waits on a model; loads that finish are picked up by
/// this or a later tick.
fn step_frame<L: AssetLoader>(
    nav: &mut Navigator<L>,
    camera: &mut CursorCamera,
    viewport: Viewport,
    actions: &[Action],
    elapsed: f32,
) -> anyhow::Result<Vec<NavigationEvent>> {
    for action in actions {
        if action.is_navigation() {
            nav.apply(action, viewport, &*camera)?;
        } else {
            camera.apply(action);
        }
    }
    nav.tick(elapsed);
    Ok(nav.drain_events())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { bodies } => {
            println!("orrery-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", orrery_common::crate_info());
            println!("kernel: {}", orrery_kernel::crate_info());
            println!("assets: {}", orrery_assets::crate_info());
            println!("input: {}", orrery_input::crate_info());
            println!("scene: {}", orrery_scene::crate_info());
            println!("render: {}", orrery_render::crate_info());
            println!("tools: {}", orrery_tools::crate_info());

            let table = load_table(bodies.as_ref())?;
            println!("bodies: {}", table.len());
            for body in table.iter() {
                println!(
                    "  {} rotation={} orbit={} radius={}",
                    body.id, body.rotation_speed, body.orbital_speed, body.orbital_radius
                );
            }
        }
        Commands::Validate { table } => {
            let loaded = load_table(Some(&table))?;
            println!("{}: OK ({} bodies)", table.display(), loaded.len());
        }
        Commands::Run {
            assets,
            bodies,
            config,
            frames,
            frame_ms,
            time_scale,
            width,
            height,
            picks,
            keys,
            print_every,
            wait_for_system_ms,
        } => {
            let table = load_table(bodies.as_ref())?;
            let config = match &config {
                Some(path) => SceneConfig::load(path)
                    .with_context(|| format!("loading scene config {}", path.display()))?,
                None => SceneConfig::default(),
            };
            let viewport = Viewport::new(width, height);
            let mut camera = CursorCamera::default();
            camera.set_aspect(width, height);
            let bindings = KeyBindings::default();
            let renderer = DebugTextRenderer::new();

            println!(
                "Running {frames} frames ({frame_ms} ms, x{time_scale}) from {}",
                assets.display()
            );
            let mut nav = Navigator::new(config, table, GltfFileLoader::new(&assets));
            if let Some(ms) = wait_for_system_ms {
                wait_for_system(&mut nav, Duration::from_millis(ms));
            }

            for frame in 0..frames {
                let mut actions: Vec<Action> = picks
                    .iter()
                    .filter(|(f, _)| *f == frame)
                    .map(|(_, pos)| Action::Pick(*pos))
                    .collect();
                actions.extend(
                    keys.iter()
                        .filter(|(f, _)| *f == frame)
                        .map(|(_, key)| bindings.action_for(*key)),
                );

                let elapsed = frame as f32 * frame_ms / 1000.0 * time_scale;
                let events = step_frame(&mut nav, &mut camera, viewport, &actions, elapsed)?;

                for event in events {
                    match &event {
                        NavigationEvent::Switched { from, to } => {
                            println!("frame {frame}: {from} -> {to}");
                        }
                        other => tracing::debug!(frame, event = ?other, "navigation event"),
                    }
                }

                if print_every > 0 && frame % print_every == 0 {
                    print!("{}", renderer.render(&nav.frame(), &camera));
                }
            }

            println!("{}", NavigatorInspector::summary(&nav));
        }
    }

    Ok(())
}
