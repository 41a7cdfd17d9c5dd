//! Agent (C10): a thin wrapper binding one Motion Controller, one
//! Brain, and caller-facing metadata. The Agent owns the Brain
//! outright; the Brain only ever holds a shared, weak-in-lifecycle
//! reference to the Motion Controller — destroying the controller must
//! never resurrect the Brain, and destroying the Agent must never be
//! reversible.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use catsim_core::Position;

use crate::brain::{Brain, BrainEvent, BrainOptions, TriggerOpts};
use crate::error::{RuntimeError, RuntimeResult};
use crate::interaction_registry::InteractionRegistry;
use crate::motion::MotionController;

/// Caller-facing descriptive fields, independent of anything the
/// decision engine reasons about.
#[derive(Clone, Debug, Default)]
pub struct AgentMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

pub struct Agent {
    id: Uuid,
    created_at: DateTime<Utc>,
    metadata: RwLock<AgentMetadata>,
    motion: Arc<dyn MotionController>,
    brain: Brain,
    registry: Arc<InteractionRegistry>,
    destroyed: AtomicBool,
}

impl Agent {
    pub fn new(
        motion: Arc<dyn MotionController>,
        registry: Arc<InteractionRegistry>,
        opts: BrainOptions,
        metadata: AgentMetadata,
    ) -> RuntimeResult<Self> {
        let id = motion.id();
        let brain = Brain::new(motion.clone(), registry.clone(), opts)?;
        Ok(Self {
            id,
            created_at: Utc::now(),
            metadata: RwLock::new(metadata),
            motion,
            brain,
            registry,
            destroyed: AtomicBool::new(false),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn position(&self) -> Position {
        self.motion.position()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BrainEvent> {
        self.brain.subscribe()
    }

    pub async fn metadata(&self) -> AgentMetadata {
        self.metadata.read().await.clone()
    }

    pub async fn set_name(&self, name: Option<String>) {
        self.metadata.write().await.name = name;
    }

    pub async fn set_description(&self, description: Option<String>) {
        self.metadata.write().await.description = description;
    }

    pub async fn update_metadata(&self, f: impl FnOnce(&mut AgentMetadata)) {
        f(&mut self.metadata.write().await);
    }

    pub async fn pause(&self) -> RuntimeResult<()> {
        self.brain.stop().await
    }

    pub async fn resume(&self) -> RuntimeResult<()> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(RuntimeError::InvalidState("cannot resume a destroyed agent".into()));
        }
        self.brain.start().await
    }

    /// Stops the Brain, destroys the Motion Controller, and marks this
    /// agent as gone. Idempotent. Removing the id from the Agent
    /// Registry is the registry's job (§4.9), not this method's — the
    /// registry calls `destroy` on its own remove path rather than the
    /// other way around, to avoid a circular owning reference between
    /// `Agent` and `AgentRegistry`.
    pub async fn destroy(&self) -> RuntimeResult<()> {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.brain.destroy().await?;
        self.motion.destroy();
        Ok(())
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Looks the need up by id via the Interaction Registry and
    /// dispatches `Brain::approach_target` at its position.
    pub async fn respond_to_need(&self, id: Uuid) -> RuntimeResult<()> {
        let (_kind, position) = self
            .registry
            .get_need(id)
            .ok_or(RuntimeError::StimulusNotFound(id))?;
        self.brain.approach_target(position, TriggerOpts::default()).await
    }

    /// Looks the yarn up by id and dispatches `Brain::chase_target` at
    /// its current position.
    pub async fn play_with_yarn(&self, id: Uuid) -> RuntimeResult<()> {
        let record = self.registry.get_yarn(id).ok_or(RuntimeError::StimulusNotFound(id))?;
        self.brain.chase_target(record.position, TriggerOpts::default()).await
    }

    pub async fn chase_laser(&self, pos: Position) -> RuntimeResult<()> {
        self.brain.chase_target(pos, TriggerOpts::default()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::BrainConfigBuilder;
    use crate::sim_motion::SimMotionController;
    use catsim_core::Boundaries;

    fn bounds() -> Boundaries {
        Boundaries::new(0.0, 1000.0, 0.0, 1000.0).unwrap()
    }

    fn make_agent() -> Agent {
        let motion = Arc::new(SimMotionController::new(bounds(), Position::new(500.0, 500.0)));
        let registry = Arc::new(InteractionRegistry::new());
        let opts = BrainOptions {
            config: BrainConfigBuilder::new().decision_interval(10, 20).build().unwrap(),
            ..Default::default()
        };
        Agent::new(motion, registry, opts, AgentMetadata::default()).unwrap()
    }

    #[tokio::test]
    async fn respond_to_need_fails_for_unknown_id() {
        let agent = make_agent();
        let err = agent.respond_to_need(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RuntimeError::StimulusNotFound(_)));
    }

    #[tokio::test]
    async fn destroy_is_idempotent_and_blocks_resume() {
        let agent = make_agent();
        agent.destroy().await.unwrap();
        agent.destroy().await.unwrap();
        assert!(agent.is_destroyed());
        assert!(agent.resume().await.is_err());
    }

    #[tokio::test]
    async fn metadata_updates_are_visible_immediately() {
        let agent = make_agent();
        agent.set_name(Some("Whiskers".into())).await;
        assert_eq!(agent.metadata().await.name, Some("Whiskers".into()));
    }
}
