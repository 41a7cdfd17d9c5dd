//! A headless, test/demo-only `MotionController`. Real deployments
//! supply their own implementation backed by the sprite/tween engine;
//! this one just tracks position and state and sleeps for the
//! requested duration, which is all the Behavior Library and
//! Orchestrator need to exercise their cancellation and timing logic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use catsim_core::{Boundaries, Position};

use crate::error::MotionError;
use crate::motion::{MotionController, MotionState, MoveOpts};

pub struct SimMotionController {
    id: Uuid,
    bounds: Boundaries,
    position: Mutex<Position>,
    state: Mutex<MotionState>,
    destroyed: AtomicBool,
    stop_requested: AtomicBool,
    stop_notify: tokio::sync::Notify,
    boundary_tx: broadcast::Sender<()>,
}

impl SimMotionController {
    pub fn new(bounds: Boundaries, start: Position) -> Self {
        let (boundary_tx, _) = broadcast::channel(32);
        Self {
            id: Uuid::new_v4(),
            bounds,
            position: Mutex::new(start),
            state: Mutex::new(MotionState::Idle),
            destroyed: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
            stop_notify: tokio::sync::Notify::new(),
            boundary_tx,
        }
    }

    /// Runs one leg of a move: sleeps for `duration_ms` unless
    /// cancelled first. Returns `Ok(true)` if the leg completed,
    /// `Ok(false)` if it was cancelled mid-flight, `Err` if the
    /// controller was destroyed.
    async fn animate_leg(&self, target: Position, duration_ms: u64) -> Result<bool, MotionError> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(MotionError::Destroyed);
        }
        if self.stop_requested.load(Ordering::SeqCst) {
            return Ok(false);
        }

        let sleep = tokio::time::sleep(Duration::from_millis(duration_ms));
        tokio::select! {
            _ = sleep => {
                if self.destroyed.load(Ordering::SeqCst) {
                    return Err(MotionError::Destroyed);
                }
                let (clamped, hit) = self.bounds.clamp(target);
                *self.position.lock().unwrap() = clamped;
                if hit {
                    let _ = self.boundary_tx.send(());
                }
                Ok(true)
            }
            _ = self.stop_notify.notified() => {
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl MotionController for SimMotionController {
    fn id(&self) -> Uuid {
        self.id
    }

    fn position(&self) -> Position {
        *self.position.lock().unwrap()
    }

    fn boundaries(&self) -> Boundaries {
        self.bounds
    }

    fn state(&self) -> MotionState {
        *self.state.lock().unwrap()
    }

    async fn move_to(
        &self,
        x: f64,
        y: f64,
        duration_ms: u64,
        _opts: Option<MoveOpts>,
    ) -> Result<(), MotionError> {
        self.stop_requested.store(false, Ordering::SeqCst);
        self.animate_leg(Position::new(x, y), duration_ms).await?;
        Ok(())
    }

    async fn move_along_path(
        &self,
        points: &[Position],
        duration_ms: u64,
        _opts: Option<MoveOpts>,
    ) -> Result<(), MotionError> {
        self.stop_requested.store(false, Ordering::SeqCst);
        if points.is_empty() {
            return Ok(());
        }
        let per_leg = duration_ms / points.len() as u64;
        for point in points {
            let completed = self.animate_leg(*point, per_leg.max(1)).await?;
            if !completed {
                break;
            }
        }
        Ok(())
    }

    fn stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
        self.stop_notify.notify_waiters();
    }

    fn set_state(&self, state: MotionState) {
        *self.state.lock().unwrap() = state;
    }

    fn set_position(&self, x: f64, y: f64) {
        *self.position.lock().unwrap() = Position::new(x, y);
    }

    fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
        self.stop_requested.store(true, Ordering::SeqCst);
        self.stop_notify.notify_waiters();
    }

    fn subscribe_boundary_hit(&self) -> broadcast::Receiver<()> {
        self.boundary_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Boundaries {
        Boundaries::new(0.0, 100.0, 0.0, 100.0).unwrap()
    }

    #[tokio::test]
    async fn move_to_updates_position_on_completion() {
        let m = SimMotionController::new(bounds(), Position::new(0.0, 0.0));
        m.move_to(50.0, 50.0, 10, None).await.unwrap();
        assert_eq!(m.position(), Position::new(50.0, 50.0));
    }

    #[tokio::test]
    async fn move_to_clamps_and_emits_boundary_hit() {
        let m = SimMotionController::new(bounds(), Position::new(0.0, 0.0));
        let mut rx = m.subscribe_boundary_hit();
        m.move_to(500.0, 500.0, 10, None).await.unwrap();
        assert_eq!(m.position(), Position::new(100.0, 100.0));
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn stop_cancels_in_flight_move_without_completing_it() {
        let m = std::sync::Arc::new(SimMotionController::new(bounds(), Position::new(0.0, 0.0)));
        let mover = m.clone();
        let handle = tokio::spawn(async move { mover.move_to(99.0, 99.0, 5_000, None).await });
        tokio::time::sleep(Duration::from_millis(5)).await;
        m.stop();
        handle.await.unwrap().unwrap();
        assert_eq!(m.position(), Position::new(0.0, 0.0));
    }

    #[tokio::test]
    async fn destroyed_controller_rejects_new_moves() {
        let m = SimMotionController::new(bounds(), Position::new(0.0, 0.0));
        m.destroy();
        assert!(m.move_to(1.0, 1.0, 10, None).await.is_err());
    }
}
