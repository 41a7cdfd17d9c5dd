//! The Behavior Library (C6): one async function per `BehaviorType`,
//! each driving a `MotionController` for a randomized duration and
//! resolving to a [`BehaviorOutcome`] rather than ever panicking or
//! returning an error for cancellation — cancellation is data, not an
//! exception, the re-architecture called for over the original's
//! throw-based cancel path.

mod path;

pub use path::{random_target_in, synthesize_path, CurvedPathStyle};

use std::time::Duration;

use rand::Rng;
use tokio::sync::Notify;

use catsim_core::{BehaviorType, Position};

use crate::error::MotionError;
use crate::motion::{MotionController, MotionState};

/// What a behavior function, and in turn the Orchestrator, hand back
/// once the task settles. `Cancelled` covers both `cancel()` being
/// called explicitly and the motion controller being destroyed
/// mid-flight — the caller never needs to tell those apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BehaviorOutcome {
    Completed,
    Cancelled,
}

fn from_motion_result(result: Result<(), MotionError>) -> BehaviorOutcome {
    match result {
        Ok(()) => BehaviorOutcome::Completed,
        Err(MotionError::Destroyed) => BehaviorOutcome::Cancelled,
    }
}

/// Per-execution parameters the Brain hands the Orchestrator: the
/// target of a reactive behavior, the agent's recent position history
/// (for exploring's novelty search), and caller overrides for speed
/// and duration used by explicit triggers.
#[derive(Clone, Debug, Default)]
pub struct BehaviorContext {
    pub target: Option<Position>,
    pub visited_positions: Vec<Position>,
    pub speed_override: Option<f64>,
    pub duration_override: Option<Duration>,
    pub energy: f32,
}

/// Randomized duration for one run of `behavior`, scaled by `energy`
/// for the two behaviors whose duration policy names it explicitly.
pub fn duration_for(behavior: BehaviorType, energy: f32, rng: &mut impl Rng) -> Duration {
    let energy = energy as f64;
    let millis = match behavior {
        BehaviorType::Wandering => rng.gen_range(3_000.0..=8_000.0),
        BehaviorType::Resting => rng.gen_range(4_000.0..=10_000.0) * (1.5 - energy),
        BehaviorType::Playing => rng.gen_range(2_000.0..=6_000.0) * (0.5 + energy),
        BehaviorType::Observing => rng.gen_range(3_000.0..=7_000.0),
        BehaviorType::Exploring => rng.gen_range(5_000.0..=12_000.0),
        BehaviorType::Approaching => rng.gen_range(2_000.0..=4_000.0),
        BehaviorType::Consuming => rng.gen_range(3_000.0..=6_000.0),
        BehaviorType::Chasing => rng.gen_range(1_000.0..=3_000.0),
        BehaviorType::Batting => rng.gen_range(500.0..=1_000.0),
    };
    Duration::from_millis(millis.max(1.0) as u64)
}

/// Runs `behavior` to completion or until `cancel` is notified,
/// whichever comes first. This is the only place cancellation is
/// raced against the behavior's own work, so every individual behavior
/// function below can stay a straight-line `async fn`.
pub async fn execute(
    behavior: BehaviorType,
    motion: &dyn MotionController,
    ctx: &BehaviorContext,
    cancel: &Notify,
) -> BehaviorOutcome {
    tokio::select! {
        outcome = dispatch(behavior, motion, ctx) => outcome,
        _ = cancel.notified() => {
            motion.stop();
            BehaviorOutcome::Cancelled
        }
    }
}

async fn dispatch(behavior: BehaviorType, motion: &dyn MotionController, ctx: &BehaviorContext) -> BehaviorOutcome {
    match behavior {
        BehaviorType::Wandering => wandering(motion).await,
        BehaviorType::Resting => resting(motion, ctx).await,
        BehaviorType::Playing => playing(motion, ctx).await,
        BehaviorType::Observing => observing(motion, ctx).await,
        BehaviorType::Exploring => exploring(motion, ctx).await,
        BehaviorType::Approaching => approaching(motion, ctx).await,
        BehaviorType::Consuming => consuming(motion, ctx).await,
        BehaviorType::Chasing => chasing(motion, ctx).await,
        BehaviorType::Batting => batting(motion, ctx).await,
    }
}

async fn wandering(motion: &dyn MotionController) -> BehaviorOutcome {
    motion.set_state(MotionState::Idle);
    let (duration_ms, path) = {
        let mut rng = rand::thread_rng();
        let duration = duration_for(BehaviorType::Wandering, 0.5, &mut rng);
        let start = motion.position();
        let target = random_target_in(motion.boundaries(), &mut rng);
        let style = CurvedPathStyle::random_wandering(&mut rng);
        (duration.as_millis() as u64, synthesize_path(start, target, style, &mut rng))
    };
    from_motion_result(motion.move_along_path(&path, duration_ms, None).await)
}

async fn resting(motion: &dyn MotionController, ctx: &BehaviorContext) -> BehaviorOutcome {
    motion.stop();
    let duration = ctx
        .duration_override
        .unwrap_or_else(|| duration_for(BehaviorType::Resting, ctx.energy, &mut rand::thread_rng()));
    motion.set_state(if duration.as_millis() <= 5_000 { MotionState::Sitting } else { MotionState::Sleeping });
    tokio::time::sleep(duration).await;
    BehaviorOutcome::Completed
}

async fn playing(motion: &dyn MotionController, ctx: &BehaviorContext) -> BehaviorOutcome {
    motion.set_state(MotionState::Idle);
    let total = ctx
        .duration_override
        .unwrap_or_else(|| duration_for(BehaviorType::Playing, ctx.energy, &mut rand::thread_rng()));
    let deadline = tokio::time::Instant::now() + total;

    while tokio::time::Instant::now() < deadline {
        let (sprint_ms, path, pause) = {
            let mut rng = rand::thread_rng();
            let start = motion.position();
            let target = random_target_in(motion.boundaries(), &mut rng);
            let style = CurvedPathStyle::random_playing(&mut rng);
            let path = synthesize_path(start, target, style, &mut rng);
            let sprint_ms = rng.gen_range(400..=900);
            let pause = Duration::from_millis(rng.gen_range(200..=500));
            (sprint_ms, path, pause)
        };
        match motion.move_along_path(&path, sprint_ms, None).await {
            Ok(()) => {}
            Err(MotionError::Destroyed) => return BehaviorOutcome::Cancelled,
        }
        tokio::time::sleep(pause).await;
    }
    BehaviorOutcome::Completed
}

async fn observing(motion: &dyn MotionController, ctx: &BehaviorContext) -> BehaviorOutcome {
    motion.stop();
    motion.set_state(MotionState::Sitting);
    let duration = ctx
        .duration_override
        .unwrap_or_else(|| duration_for(BehaviorType::Observing, ctx.energy, &mut rand::thread_rng()));
    tokio::time::sleep(duration).await;
    BehaviorOutcome::Completed
}

async fn exploring(motion: &dyn MotionController, ctx: &BehaviorContext) -> BehaviorOutcome {
    motion.set_state(MotionState::Idle);
    let (duration_ms, target) = {
        let mut rng = rand::thread_rng();
        let duration = ctx
            .duration_override
            .unwrap_or_else(|| duration_for(BehaviorType::Exploring, ctx.energy, &mut rng));
        let bounds = motion.boundaries();
        let target = (0..10)
            .map(|_| random_target_in(bounds, &mut rng))
            .max_by(|a, b| {
                let da = path::min_distance_to_visited(*a, &ctx.visited_positions);
                let db = path::min_distance_to_visited(*b, &ctx.visited_positions);
                da.partial_cmp(&db).unwrap()
            })
            .unwrap_or_else(|| random_target_in(bounds, &mut rng));
        (duration.as_millis() as u64, target)
    };
    from_motion_result(motion.move_to(target.x, target.y, duration_ms, None).await)
}

async fn approaching(motion: &dyn MotionController, ctx: &BehaviorContext) -> BehaviorOutcome {
    let Some(target) = ctx.target else {
        return BehaviorOutcome::Cancelled;
    };
    motion.set_state(MotionState::Idle);
    let start = motion.position();
    let dist = start.distance_to(&target);
    let duration_ms = ctx.duration_override.map(|d| d.as_millis() as u64).unwrap_or_else(|| {
        let mut rng = rand::thread_rng();
        let speed = ctx.speed_override.unwrap_or_else(|| rng.gen_range(80.0..=150.0));
        let base = rng.gen_range(2_000.0..=4_000.0);
        base.min((dist / speed.max(1e-6)) * 1_000.0).max(1.0) as u64
    });
    from_motion_result(motion.move_to(target.x, target.y, duration_ms, None).await)
}

async fn consuming(motion: &dyn MotionController, ctx: &BehaviorContext) -> BehaviorOutcome {
    motion.stop();
    motion.set_state(MotionState::Sitting);
    let duration = ctx
        .duration_override
        .unwrap_or_else(|| duration_for(BehaviorType::Consuming, ctx.energy, &mut rand::thread_rng()));
    tokio::time::sleep(duration).await;
    BehaviorOutcome::Completed
}

async fn chasing(motion: &dyn MotionController, ctx: &BehaviorContext) -> BehaviorOutcome {
    let Some(target) = ctx.target else {
        return BehaviorOutcome::Cancelled;
    };
    motion.set_state(MotionState::Running);
    let start = motion.position();
    let dist = start.distance_to(&target);
    let duration_ms = ctx.duration_override.map(|d| d.as_millis() as u64).unwrap_or_else(|| {
        let mut rng = rand::thread_rng();
        let speed = ctx.speed_override.unwrap_or_else(|| rng.gen_range(150.0..=250.0));
        let base = rng.gen_range(1_000.0..=3_000.0);
        base.min((dist / speed.max(1e-6)) * 1_000.0).max(1.0) as u64
    });
    from_motion_result(motion.move_to(target.x, target.y, duration_ms, None).await)
}

async fn batting(motion: &dyn MotionController, ctx: &BehaviorContext) -> BehaviorOutcome {
    motion.stop();
    motion.set_state(MotionState::Sitting);
    let duration = ctx
        .duration_override
        .unwrap_or_else(|| duration_for(BehaviorType::Batting, ctx.energy, &mut rand::thread_rng()));
    tokio::time::sleep(duration).await;
    BehaviorOutcome::Completed
}
