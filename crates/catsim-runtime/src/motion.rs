//! The Motion Controller contract: an external collaborator consumed
//! by the Behavior Library and Orchestrator, never implemented by the
//! core simulation itself. A stub implementation for tests and the
//! demo binary lives in [`crate::sim_motion`].

use async_trait::async_trait;
use uuid::Uuid;

use catsim_core::{Boundaries, Position};

use crate::error::MotionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Sitting,
    Sleeping,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MoveOpts {
    /// How far intermediate waypoints bow off the straight line, in
    /// `[0.5, 1.5]`; 1.0 is the path exactly as synthesized.
    pub curviness: f64,
    pub ease: Option<Easing>,
}

impl Default for MoveOpts {
    fn default() -> Self {
        Self { curviness: 1.0, ease: None }
    }
}

/// The Motion Controller contract (§6). Implemented by the sprite/tween
/// layer in a real deployment; `catsim-runtime` only ever holds
/// `Arc<dyn MotionController>` and never assumes a concrete type.
#[async_trait]
pub trait MotionController: Send + Sync {
    fn id(&self) -> Uuid;
    fn position(&self) -> Position;
    fn boundaries(&self) -> Boundaries;
    fn state(&self) -> MotionState;

    async fn move_to(
        &self,
        x: f64,
        y: f64,
        duration_ms: u64,
        opts: Option<MoveOpts>,
    ) -> Result<(), MotionError>;

    async fn move_along_path(
        &self,
        points: &[Position],
        duration_ms: u64,
        opts: Option<MoveOpts>,
    ) -> Result<(), MotionError>;

    /// Synchronous cancel signal; in-flight `move_to`/`move_along_path`
    /// futures resolve shortly after this returns.
    fn stop(&self);

    fn set_state(&self, state: MotionState);
    fn set_position(&self, x: f64, y: f64);
    fn destroy(&self);

    /// Subscribes to `boundaryHit` notifications, emitted when a move
    /// clamps the requested position to the boundary rectangle.
    fn subscribe_boundary_hit(&self) -> tokio::sync::broadcast::Receiver<()>;
}
