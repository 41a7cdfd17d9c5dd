//! catsim-demo — a headless demonstration of the agent runtime.
//!
//! Usage:
//!   catsim-demo --agents 3 --ticks 200 --personality playful

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use catsim_core::{Boundaries, NeedKind, PersonalityInput, PersonalityPreset, Position};
use catsim_runtime::{
    Agent, AgentMetadata, AgentRegistry, BrainConfigBuilder, BrainEvent, BrainOptions,
    InteractionRegistry, MotionController, ReactionKind,
};
use catsim_runtime::sim_motion::SimMotionController;

#[derive(Parser, Debug)]
#[command(name = "catsim-demo")]
#[command(about = "Headless demonstration of the cat simulation agent runtime", long_about = None)]
struct Args {
    /// Number of agents to spawn
    #[arg(long, default_value_t = 3)]
    agents: u32,

    /// Number of simulated ticks to run before exiting
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Tick length in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Personality preset applied to every spawned agent
    #[arg(long, default_value = "balanced")]
    personality: String,

    /// Width and height of the square play area
    #[arg(long, default_value_t = 1000.0)]
    surface_size: f64,

    /// Verbose output (debug-level tracing)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_preset(name: &str) -> PersonalityPreset {
    match name.to_lowercase().as_str() {
        "lazy" => PersonalityPreset::Lazy,
        "playful" => PersonalityPreset::Playful,
        "curious" => PersonalityPreset::Curious,
        "aloof" => PersonalityPreset::Aloof,
        "energetic" => PersonalityPreset::Energetic,
        _ => PersonalityPreset::Balanced,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("catsim-demo starting: {} agents, {} ticks", args.agents, args.ticks);

    let bounds = Boundaries::new(0.0, args.surface_size, 0.0, args.surface_size)?;
    let interactions = Arc::new(InteractionRegistry::new());
    let registry = Arc::new(AgentRegistry::new());

    let preset = parse_preset(&args.personality);

    for i in 0..args.agents {
        let start = Position::new(
            args.surface_size * (0.2 + 0.6 * (i as f64 / args.agents.max(1) as f64)),
            args.surface_size * 0.5,
        );
        let motion = Arc::new(SimMotionController::new(bounds, start));
        let opts = BrainOptions {
            personality: Some(PersonalityInput::Preset(preset)),
            environment: None,
            config: BrainConfigBuilder::new().build()?,
        };
        let metadata = AgentMetadata { name: Some(format!("cat-{i}")), ..Default::default() };
        let agent = Agent::new(motion, interactions.clone(), opts, metadata)?;

        let mut events = agent.subscribe();
        let name = format!("cat-{i}");
        tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                log_event(&name, &event);
            }
        });

        let agent = registry.add(agent).await;
        agent.resume().await?;
    }

    place_demo_stimuli(&interactions, args.surface_size);

    let tick_duration = Duration::from_millis(args.tick_ms);
    for tick in 0..args.ticks {
        tokio::time::sleep(tick_duration).await;
        if tick % 50 == 0 {
            info!("tick {tick}/{}", args.ticks);
        }
    }

    info!("catsim-demo shutting down");
    registry.clear().await?;
    Ok(())
}

fn log_event(agent_name: &str, event: &BrainEvent) {
    match event {
        BrainEvent::BehaviorChange { previous, new_behavior, .. } => {
            info!("{agent_name}: {previous:?} -> {new_behavior:?}");
        }
        BrainEvent::DecisionMade { chosen, .. } => {
            tracing::debug!("{agent_name}: decided {chosen:?}");
        }
        BrainEvent::ReactionTriggered { kind, interest } => match kind {
            ReactionKind::Need { id } => info!("{agent_name}: noticed need {id} (interest {interest:.2})"),
            ReactionKind::YarnMoving { id } => info!("{agent_name}: noticed yarn {id} (interest {interest:.2})"),
            ReactionKind::Laser => info!("{agent_name}: noticed the laser (interest {interest:.2})"),
            ReactionKind::BoundaryHit => tracing::debug!("{agent_name}: hit the boundary"),
        },
    }
}

fn place_demo_stimuli(interactions: &InteractionRegistry, surface_size: f64) {
    let _: Uuid = interactions.place_need(NeedKind::FoodBasic, Position::new(surface_size * 0.1, surface_size * 0.1));
    let _: Uuid = interactions.place_need(NeedKind::Water, Position::new(surface_size * 0.9, surface_size * 0.1));
    let _: Uuid = interactions.place_yarn(Position::new(surface_size * 0.5, surface_size * 0.9));
}
