//! The Behavior Orchestrator (C8): owns at most one in-flight behavior
//! task per agent, and serializes decisions onto it. Starting a new
//! behavior while one is already running implicitly cancels the
//! previous one rather than queuing behind it.

use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use catsim_core::BehaviorType;

use crate::behavior::{self, BehaviorContext, BehaviorOutcome};
use crate::motion::MotionController;

struct CurrentTask {
    behavior: BehaviorType,
    cancel: Arc<Notify>,
    handle: JoinHandle<BehaviorOutcome>,
}

pub struct BehaviorOrchestrator {
    motion: Arc<dyn MotionController>,
    current: Option<CurrentTask>,
}

impl BehaviorOrchestrator {
    pub fn new(motion: Arc<dyn MotionController>) -> Self {
        Self { motion, current: None }
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_behavior(&self) -> Option<BehaviorType> {
        self.current.as_ref().map(|t| t.behavior)
    }

    /// Cancels and replaces whatever is in flight with `behavior`. The
    /// previous task is told to stop but not awaited here — it resolves
    /// to `Cancelled` on its own and its result is simply discarded.
    pub fn execute(&mut self, behavior: BehaviorType, ctx: BehaviorContext) {
        self.cancel();

        let cancel = Arc::new(Notify::new());
        let motion = self.motion.clone();
        let cancel_task = cancel.clone();
        let handle = tokio::spawn(async move {
            behavior::execute(behavior, motion.as_ref(), &ctx, &cancel_task).await
        });

        self.current = Some(CurrentTask { behavior, cancel, handle });
    }

    /// Signals cancellation to whatever is in flight, if anything. Does
    /// not wait for it to resolve.
    pub fn cancel(&mut self) {
        if let Some(task) = self.current.take() {
            task.cancel.notify_waiters();
            self.motion.stop();
            // Drop the handle without awaiting it: the task has already
            // been told to stop and will finish on its own on the
            // runtime, detached from this orchestrator's bookkeeping.
            drop(task.handle);
        }
    }

    /// Resolves once the in-flight task completes. Repeated calls across
    /// separate `select!` polls are safe: nothing is taken out of
    /// `self.current` until the awaited future actually completes, so a
    /// dropped-and-repolled call picks the same task back up.
    pub async fn join_current(&mut self) -> (BehaviorType, BehaviorOutcome) {
        let behavior = self
            .current
            .as_ref()
            .expect("join_current called while idle")
            .behavior;
        let outcome = {
            let handle = &mut self.current.as_mut().unwrap().handle;
            handle.await.unwrap_or(BehaviorOutcome::Cancelled)
        };
        self.current = None;
        (behavior, outcome)
    }
}
