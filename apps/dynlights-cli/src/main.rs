use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dynlights_core::{
    DynamicLights, DynamicLightsConfig, DynamicLightsMode, ExplosiveLightingMode, LightEmitter,
};
use dynlights_kernel::{Client, Entity, World};
use dynlights_render::{DebugTextRenderer, RebuildQueue, RenderView, Renderer};
use glam::{DVec3, IVec3};
use tracing_subscriber::EnvFilter;

/// Sections the demo renderer rebuilds per frame.
const REBUILD_BUDGET: usize = 16;

#[derive(Parser)]
#[command(name = "dynlights-cli", about = "Simulate dynamic light sources")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the dynamic lights mode
    #[arg(long, global = true, value_enum)]
    mode: Option<ModeArg>,

    /// Override the creeper lighting mode
    #[arg(long, global = true, value_enum)]
    creeper: Option<CreeperArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the demo scene and report chunk invalidations
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Load a fresh world after the run
        #[arg(long)]
        reload: bool,
    },
    /// Run the demo scene, then print the lightmap around the player
    Lightmap {
        /// Number of ticks to simulate first
        #[arg(short, long, default_value = "20")]
        ticks: u64,
        /// Half-width of the printed slice
        #[arg(short, long, default_value = "8")]
        radius: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Off,
    Fastest,
    Fast,
    Fancy,
}

impl From<ModeArg> for DynamicLightsMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Off => Self::Off,
            ModeArg::Fastest => Self::Fastest,
            ModeArg::Fast => Self::Fast,
            ModeArg::Fancy => Self::Fancy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CreeperArg {
    Off,
    Simple,
    Fancy,
}

impl From<CreeperArg> for ExplosiveLightingMode {
    fn from(arg: CreeperArg) -> Self {
        match arg {
            CreeperArg::Off => Self::Off,
            CreeperArg::Simple => Self::Simple,
            CreeperArg::Fancy => Self::Fancy,
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<DynamicLightsConfig> {
    let mut config = match &cli.config {
        Some(path) => DynamicLightsConfig::load(path)?,
        None => DynamicLightsConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(creeper) = cli.creeper {
        config.creeper_lighting = creeper.into();
    }
    Ok(config)
}

/// Demo scene: a torch-carrying player walking east, a creeper about to
/// explode, a blaze and a zombie in a glowing helmet.
struct Scene {
    client: Client,
    player: dynlights_common::EntityId,
    creeper: dynlights_common::EntityId,
}

impl Scene {
    fn new(config: DynamicLightsConfig) -> Self {
        let mut client = Client::new(DynamicLights::from_config(config));
        let mut world = World::new();
        let player = world.spawn(
            Entity::new("player", DVec3::new(0.5, 64.0, 0.5))
                .holding("torch")
                .as_local_player(),
        );
        let creeper = world.spawn(Entity::new("creeper", DVec3::new(6.5, 64.0, -3.5)));
        world.spawn(Entity::new("blaze", DVec3::new(-20.5, 70.0, 12.5)));
        world.spawn(Entity::new("zombie", DVec3::new(30.5, 64.0, 30.5)).wearing("glowstone"));
        client.load_world(world);
        Self {
            client,
            player,
            creeper,
        }
    }

    /// One tick plus one frame. Returns sources that invalidated chunks.
    fn step(&mut self, tick: u64, queue: &mut RebuildQueue) -> usize {
        if let Some(world) = self.client.world_mut() {
            world.move_by(self.player, DVec3::new(0.25, 0.0, 0.0));
            if let Some(player) = world.get_mut(self.player) {
                // wades into a lake halfway through
                player.eye_submerged = tick >= 40;
            }
            if let Some(creeper) = world.get_mut(self.creeper) {
                creeper.flash_intensity = ((tick as f32 - 10.0) / 30.0).clamp(0.0, 1.0);
            }
        }
        self.client.tick(queue);
        let updated = self.client.render_frame(queue);
        queue.drain(REBUILD_BUDGET);
        updated
    }

    /// Block the player's light shines from.
    fn player_light_block(&self) -> IVec3 {
        self.client
            .world()
            .and_then(|w| w.get(self.player))
            .map(|p| p.eye_position().floor().as_ivec3())
            .unwrap_or(IVec3::new(0, 64, 0))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Info => {
            println!("dynlights-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("core: {}", dynlights_core::crate_info());
            println!("kernel: {}", dynlights_kernel::crate_info());
            println!("render: {}", dynlights_render::crate_info());
            println!(
                "config: mode={:?} creeper={:?} items={}",
                config.mode,
                config.creeper_lighting,
                config.items.len()
            );
        }
        Commands::Simulate { ticks, reload } => {
            println!("Simulating {ticks} ticks (mode={:?})", config.mode);
            let mut scene = Scene::new(config);
            let mut queue = RebuildQueue::new();
            let mut invalidations = 0;
            for tick in 1..=ticks {
                let updated = scene.step(tick, &mut queue);
                invalidations += updated;
                tracing::debug!(
                    tick,
                    updated,
                    sources = scene.client.lights().registry().len(),
                    "frame"
                );
            }

            let stats = scene.client.lights().registry().stats();
            println!(
                "Sources: {}, invalidations: {}, rebuild requests: {}",
                scene.client.lights().registry().len(),
                invalidations,
                queue.requests()
            );
            println!(
                "Registry: adds={} removes={} resets={} clears={}",
                stats.adds, stats.removes, stats.resets, stats.clears
            );

            if reload {
                scene.client.load_world(World::new());
                println!(
                    "After reload: sources={}",
                    scene.client.lights().registry().len()
                );
            }
        }
        Commands::Lightmap { ticks, radius } => {
            let mut scene = Scene::new(config);
            let mut queue = RebuildQueue::new();
            for tick in 1..=ticks {
                scene.step(tick, &mut queue);
            }
            let view = RenderView {
                center: scene.player_light_block(),
                radius,
            };
            let output = DebugTextRenderer::new().render(scene.client.lights().registry(), &view);
            print!("{output}");
        }
    }

    Ok(())
}
