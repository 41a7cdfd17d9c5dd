//! The Brain (C9): the periodic decision loop plus the out-of-band
//! reaction path, modeled as a single actor task the way
//! `AutonomyEngine` drives its own trigger-check loop — one task owns
//! personality, motivation, memory, and the Orchestrator outright, and
//! every external call (start/stop/destroy, explicit triggers,
//! personality or environment overrides) is a message sent into it
//! rather than a lock taken on shared state.

mod config;
mod events;

pub use config::{BrainConfig, BrainConfigBuilder, DetectionRadii};
pub use events::{BrainEvent, ReactionKind};

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;

use catsim_core::decision::{compute_weights, interest, is_valid_transition, select_valid_behavior, Environment, NearbyStimulus};
use catsim_core::{BehaviorType, Memory, Motivation, Personality, PersonalityInput, PersonalityPreset, PersonalityRegistry, Position, Stimulus, YarnState};

use crate::behavior::{BehaviorContext, BehaviorOutcome};
use crate::error::{RuntimeError, RuntimeResult};
use crate::interaction_registry::{InteractionEvent, InteractionRegistry};
use crate::motion::MotionController;
use crate::orchestrator::BehaviorOrchestrator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BrainLifecycle {
    Idle = 0,
    Running = 1,
    Stopped = 2,
    Destroyed = 3,
}

impl BrainLifecycle {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => BrainLifecycle::Idle,
            1 => BrainLifecycle::Running,
            2 => BrainLifecycle::Stopped,
            _ => BrainLifecycle::Destroyed,
        }
    }
}

/// Construction-time options. `config` should already be the product of
/// a `BrainConfigBuilder::build()` call.
#[derive(Clone, Debug)]
pub struct BrainOptions {
    pub personality: Option<PersonalityInput>,
    pub environment: Option<Environment>,
    pub config: BrainConfig,
}

impl Default for BrainOptions {
    fn default() -> Self {
        Self { personality: None, environment: None, config: BrainConfig::default() }
    }
}

/// Caller overrides for an explicit trigger: a custom speed for
/// approach/chase, or a custom hold duration for consume/bat.
#[derive(Clone, Copy, Debug, Default)]
pub struct TriggerOpts {
    pub speed_override: Option<f64>,
    pub duration_override: Option<Duration>,
}

enum BrainCommand {
    Start(oneshot::Sender<RuntimeResult<()>>),
    Stop(oneshot::Sender<()>),
    Destroy(oneshot::Sender<()>),
    SetPersonality(Personality, oneshot::Sender<()>),
    SetEnvironment(Environment, oneshot::Sender<()>),
    SetConfig(BrainConfig, oneshot::Sender<()>),
    ApproachTarget(Position, TriggerOpts, oneshot::Sender<RuntimeResult<()>>),
    Consume(Option<Duration>, oneshot::Sender<RuntimeResult<()>>),
    Bat(Option<Duration>, oneshot::Sender<RuntimeResult<()>>),
    ChaseTarget(Position, TriggerOpts, oneshot::Sender<RuntimeResult<()>>),
}

/// A handle to a running Brain actor. Cheap to hold: every method just
/// sends a message into the actor task and, where the caller needs a
/// result, awaits a oneshot reply.
pub struct Brain {
    cmd_tx: mpsc::Sender<BrainCommand>,
    events: broadcast::Sender<BrainEvent>,
    lifecycle: Arc<AtomicU8>,
}

impl Brain {
    pub fn new(
        motion: Arc<dyn MotionController>,
        registry: Arc<InteractionRegistry>,
        opts: BrainOptions,
    ) -> RuntimeResult<Self> {
        let personality = match opts.personality {
            Some(input) => PersonalityRegistry::resolve(input)?,
            None => PersonalityRegistry::get_preset(PersonalityPreset::Balanced),
        };

        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (events_tx, _events_rx) = broadcast::channel(256);
        let lifecycle = Arc::new(AtomicU8::new(BrainLifecycle::Idle as u8));

        let boundary_rx = motion.subscribe_boundary_hit();
        let interaction_rx = registry.subscribe();
        let orchestrator = BehaviorOrchestrator::new(motion.clone());

        let task = BrainTask {
            motion,
            registry,
            personality,
            motivation: Motivation::default(),
            memory: Memory::default(),
            config: opts.config,
            orchestrator,
            current_behavior: BehaviorType::Wandering,
            last_update: Instant::now(),
            lifecycle: lifecycle.clone(),
            events: events_tx.clone(),
            cmd_rx,
            boundary_rx,
            interaction_rx,
            next_decision: Instant::now() + Duration::from_secs(3600),
            environment_override: opts.environment,
        };
        tokio::spawn(task.run());

        Ok(Self { cmd_tx, events: events_tx, lifecycle })
    }

    pub fn lifecycle(&self) -> BrainLifecycle {
        BrainLifecycle::from_u8(self.lifecycle.load(Ordering::SeqCst))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BrainEvent> {
        self.events.subscribe()
    }

    pub async fn start(&self) -> RuntimeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::Start(tx)).await?;
        rx.await.unwrap_or(Ok(()))
    }

    pub async fn stop(&self) -> RuntimeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::Stop(tx)).await?;
        let _ = rx.await;
        Ok(())
    }

    pub async fn destroy(&self) -> RuntimeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::Destroy(tx)).await?;
        let _ = rx.await;
        Ok(())
    }

    pub async fn set_personality(&self, input: PersonalityInput) -> RuntimeResult<()> {
        let personality = PersonalityRegistry::resolve(input)?;
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::SetPersonality(personality, tx)).await?;
        let _ = rx.await;
        Ok(())
    }

    pub async fn set_environment(&self, environment: Environment) -> RuntimeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::SetEnvironment(environment, tx)).await?;
        let _ = rx.await;
        Ok(())
    }

    /// Replaces the whole config in one atomic step — `BrainConfig` is
    /// immutable, so there is no partial-update window for the decision
    /// loop to observe. Unlike the `RwLock<Arc<BrainConfig>>` a
    /// multi-reader deployment would need, the actor already serializes
    /// every read behind its own message queue, so swapping the owned
    /// field in `handle_command` is enough.
    pub async fn set_config(&self, config: BrainConfig) -> RuntimeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::SetConfig(config, tx)).await?;
        let _ = rx.await;
        Ok(())
    }

    pub async fn approach_target(&self, target: Position, opts: TriggerOpts) -> RuntimeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::ApproachTarget(target, opts, tx)).await?;
        rx.await.unwrap_or(Ok(()))
    }

    pub async fn chase_target(&self, target: Position, opts: TriggerOpts) -> RuntimeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::ChaseTarget(target, opts, tx)).await?;
        rx.await.unwrap_or(Ok(()))
    }

    pub async fn consume(&self, duration: Option<Duration>) -> RuntimeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::Consume(duration, tx)).await?;
        rx.await.unwrap_or(Ok(()))
    }

    pub async fn bat(&self, duration: Option<Duration>) -> RuntimeResult<()> {
        let (tx, rx) = oneshot::channel();
        self.send(BrainCommand::Bat(duration, tx)).await?;
        rx.await.unwrap_or(Ok(()))
    }

    async fn send(&self, cmd: BrainCommand) -> RuntimeResult<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| RuntimeError::InvalidState("brain actor is no longer running".into()))
    }
}

struct BrainTask {
    motion: Arc<dyn MotionController>,
    registry: Arc<InteractionRegistry>,
    personality: Personality,
    motivation: Motivation,
    memory: Memory,
    config: BrainConfig,
    orchestrator: BehaviorOrchestrator,
    current_behavior: BehaviorType,
    last_update: Instant,
    lifecycle: Arc<AtomicU8>,
    events: broadcast::Sender<BrainEvent>,
    cmd_rx: mpsc::Receiver<BrainCommand>,
    boundary_rx: broadcast::Receiver<()>,
    interaction_rx: broadcast::Receiver<InteractionEvent>,
    next_decision: Instant,
    environment_override: Option<Environment>,
}

impl BrainTask {
    async fn run(mut self) {
        loop {
            let running = self.lifecycle.load(Ordering::SeqCst) == BrainLifecycle::Running as u8;
            tokio::select! {
                biased;

                cmd = self.cmd_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => break,
                    }
                }

                outcome = self.orchestrator.join_current(), if !self.orchestrator.is_idle() => {
                    self.on_behavior_resolved(outcome);
                }

                _ = tokio::time::sleep_until(self.next_decision), if running && self.orchestrator.is_idle() => {
                    self.run_decision();
                }

                Ok(event) = self.interaction_rx.recv() => {
                    self.handle_reaction(event);
                }

                Ok(()) = self.boundary_rx.recv() => {
                    self.memory.record_boundary_hit();
                    let _ = self.events.send(BrainEvent::ReactionTriggered {
                        kind: ReactionKind::BoundaryHit,
                        interest: 1.0,
                    });
                }
            }
        }
    }

    async fn handle_command(&mut self, cmd: BrainCommand) {
        match cmd {
            BrainCommand::Start(resp) => {
                let current = self.lifecycle.load(Ordering::SeqCst);
                let reply = if current == BrainLifecycle::Destroyed as u8 {
                    Err(RuntimeError::InvalidState("cannot start a destroyed brain".into()))
                } else {
                    self.lifecycle.store(BrainLifecycle::Running as u8, Ordering::SeqCst);
                    self.last_update = Instant::now();
                    self.schedule_next_decision();
                    Ok(())
                };
                let _ = resp.send(reply);
            }
            BrainCommand::Stop(resp) => {
                let _ = self.lifecycle.compare_exchange(
                    BrainLifecycle::Running as u8,
                    BrainLifecycle::Stopped as u8,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
                let _ = resp.send(());
            }
            BrainCommand::Destroy(resp) => {
                self.orchestrator.cancel();
                self.motion.destroy();
                self.lifecycle.store(BrainLifecycle::Destroyed as u8, Ordering::SeqCst);
                let _ = resp.send(());
            }
            BrainCommand::SetPersonality(p, resp) => {
                self.personality = p;
                let _ = resp.send(());
            }
            BrainCommand::SetEnvironment(e, resp) => {
                self.environment_override = Some(e);
                let _ = resp.send(());
            }
            BrainCommand::SetConfig(c, resp) => {
                self.config = c;
                let _ = resp.send(());
            }
            BrainCommand::ApproachTarget(target, opts, resp) => {
                let reply = self.trigger(BehaviorType::Approaching, Some(target), opts);
                let _ = resp.send(reply);
            }
            BrainCommand::ChaseTarget(target, opts, resp) => {
                let reply = self.trigger(BehaviorType::Chasing, Some(target), opts);
                let _ = resp.send(reply);
            }
            BrainCommand::Consume(duration, resp) => {
                let opts = TriggerOpts { speed_override: None, duration_override: duration };
                let reply = self.trigger(BehaviorType::Consuming, None, opts);
                let _ = resp.send(reply);
            }
            BrainCommand::Bat(duration, resp) => {
                let opts = TriggerOpts { speed_override: None, duration_override: duration };
                let reply = self.trigger(BehaviorType::Batting, None, opts);
                let _ = resp.send(reply);
            }
        }
    }

    fn schedule_next_decision(&mut self) {
        let (min, max) = self.config.decision_interval;
        let delay_ms = rand::thread_rng().gen_range(min..=max);
        self.next_decision = Instant::now() + Duration::from_millis(delay_ms);
    }

    fn trigger(&mut self, behavior: BehaviorType, target: Option<Position>, opts: TriggerOpts) -> RuntimeResult<()> {
        if self.lifecycle.load(Ordering::SeqCst) == BrainLifecycle::Destroyed as u8 {
            return Err(RuntimeError::InvalidState("cannot trigger a destroyed brain".into()));
        }

        let actual = if is_valid_transition(self.current_behavior, behavior) {
            behavior
        } else {
            BehaviorType::Wandering
        };

        if actual != self.current_behavior {
            let _ = self.events.send(BrainEvent::BehaviorChange {
                previous: self.current_behavior,
                new_behavior: actual,
                motivation: self.motivation,
            });
        }

        let position = self.motion.position();
        self.memory.record_decision(position, actual, &self.config.memory_bounds);
        self.current_behavior = actual;

        let ctx = BehaviorContext {
            target,
            visited_positions: self.memory.visited_positions.iter().copied().collect(),
            speed_override: opts.speed_override,
            duration_override: opts.duration_override,
            energy: self.personality.energy,
        };
        self.orchestrator.execute(actual, ctx);
        Ok(())
    }

    fn run_decision(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;
        self.motivation.update(dt, self.current_behavior, &self.config.motivation_decay);

        let position = self.motion.position();
        let environment = self.environment_override.take().unwrap_or_else(|| self.gather_environment(position));

        let weights = compute_weights(&self.personality, &self.motivation, &self.memory, &environment);
        let mut rng = rand::thread_rng();
        let selected = select_valid_behavior(&weights, self.current_behavior, &mut rng);

        let _ = self.events.send(BrainEvent::DecisionMade {
            chosen: selected,
            weights,
            motivation: self.motivation,
        });
        if selected != self.current_behavior {
            let _ = self.events.send(BrainEvent::BehaviorChange {
                previous: self.current_behavior,
                new_behavior: selected,
                motivation: self.motivation,
            });
        }

        self.memory.record_decision(position, selected, &self.config.memory_bounds);

        let ctx = self.build_context(selected, &environment, position);
        self.current_behavior = selected;
        self.orchestrator.execute(selected, ctx);
    }

    fn build_context(&self, behavior: BehaviorType, environment: &Environment, _position: Position) -> BehaviorContext {
        let target = match behavior {
            BehaviorType::Approaching => environment
                .nearest_need
                .map(|n| n.stimulus.position())
                .or_else(|| environment.nearest_idle_yarn.map(|n| n.stimulus.position())),
            BehaviorType::Chasing => environment
                .active_laser
                .map(|n| n.stimulus.position())
                .or_else(|| environment.nearest_rolling_yarn.map(|n| n.stimulus.position())),
            _ => None,
        };
        BehaviorContext {
            target,
            visited_positions: self.memory.visited_positions.iter().copied().collect(),
            speed_override: None,
            duration_override: None,
            energy: self.personality.energy,
        }
    }

    fn gather_environment(&self, position: Position) -> Environment {
        let detect = &self.config.detection;

        let nearest_need = self
            .registry
            .needs_near(position, detect.need)
            .into_iter()
            .next()
            .map(|(_, kind, pos, dist)| NearbyStimulus {
                stimulus: Stimulus::Need { kind, position: pos },
                distance: dist,
            });

        let widest_yarn_radius = detect.yarn_idle.max(detect.yarn_moving);
        let yarns = self.registry.yarns_near(position, widest_yarn_radius);

        let nearest_idle_yarn = yarns
            .iter()
            .filter(|(_, record, dist)| record.state == YarnState::Idle && *dist <= detect.yarn_idle)
            .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap())
            .map(|&(_, record, dist)| NearbyStimulus {
                stimulus: Stimulus::Yarn { position: record.position, state: record.state },
                distance: dist,
            });

        let nearest_rolling_yarn = yarns
            .iter()
            .filter(|(_, record, dist)| record.state != YarnState::Idle && *dist <= detect.yarn_moving)
            .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap())
            .map(|&(_, record, dist)| NearbyStimulus {
                stimulus: Stimulus::Yarn { position: record.position, state: record.state },
                distance: dist,
            });

        let active_laser = self.registry.active_laser().and_then(|laser| {
            let dist = position.distance_to(&laser.position);
            (dist <= detect.laser).then_some(NearbyStimulus {
                stimulus: Stimulus::Laser { position: laser.position, active: laser.active },
                distance: dist,
            })
        });

        Environment { nearest_need, nearest_idle_yarn, nearest_rolling_yarn, active_laser }
    }

    fn on_behavior_resolved(&mut self, (behavior, outcome): (BehaviorType, BehaviorOutcome)) {
        tracing::debug!(?behavior, ?outcome, "behavior task resolved");
        self.schedule_next_decision();
    }

    fn handle_reaction(&mut self, event: InteractionEvent) {
        if self.lifecycle.load(Ordering::SeqCst) != BrainLifecycle::Running as u8 {
            return;
        }

        let (position, stimulus, radius, gate, kind) = match event {
            InteractionEvent::NeedPlaced { id, kind, position } => (
                position,
                Stimulus::Need { kind, position },
                self.config.detection.need,
                self.personality.independence < 0.5,
                ReactionKind::Need { id },
            ),
            InteractionEvent::YarnPlaced { id, position } => (
                position,
                Stimulus::Yarn { position, state: YarnState::Idle },
                self.config.detection.yarn_idle,
                self.personality.energy > 0.4,
                ReactionKind::YarnMoving { id },
            ),
            InteractionEvent::YarnMoved { id, position, state } => (
                position,
                Stimulus::Yarn { position, state },
                self.config.detection.yarn_moving,
                self.personality.energy > 0.4,
                ReactionKind::YarnMoving { id },
            ),
            InteractionEvent::LaserActivated { position } => (
                position,
                Stimulus::Laser { position, active: true },
                self.config.detection.laser,
                self.personality.curiosity > 0.3,
                ReactionKind::Laser,
            ),
            InteractionEvent::LaserMoved { position } => (
                position,
                Stimulus::Laser { position, active: true },
                self.config.detection.laser,
                self.personality.curiosity > 0.3,
                ReactionKind::Laser,
            ),
            InteractionEvent::NeedRemoved { .. }
            | InteractionEvent::YarnRemoved { .. }
            | InteractionEvent::LaserDeactivated => return,
        };

        if !gate {
            return;
        }
        let distance = self.motion.position().distance_to(&position);
        if distance > radius {
            return;
        }

        let value = interest(&stimulus, &self.personality, self.current_behavior, &self.motivation, distance);
        if value > self.config.reaction_threshold {
            let _ = self.events.send(BrainEvent::ReactionTriggered { kind, interest: value });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction_registry::InteractionRegistry;
    use crate::sim_motion::SimMotionController;
    use catsim_core::Boundaries;
    use std::time::Duration as StdDuration;

    fn bounds() -> Boundaries {
        Boundaries::new(0.0, 1000.0, 0.0, 1000.0).unwrap()
    }

    fn make_brain() -> (Brain, Arc<InteractionRegistry>) {
        let motion = Arc::new(SimMotionController::new(bounds(), Position::new(500.0, 500.0)));
        let registry = Arc::new(InteractionRegistry::new());
        let opts = BrainOptions {
            personality: Some(PersonalityInput::Preset(PersonalityPreset::Balanced)),
            environment: None,
            config: BrainConfigBuilder::new().decision_interval(10, 20).build().unwrap(),
        };
        let brain = Brain::new(motion, registry.clone(), opts).unwrap();
        (brain, registry)
    }

    #[tokio::test]
    async fn starts_idle_and_transitions_to_running() {
        let (brain, _registry) = make_brain();
        assert_eq!(brain.lifecycle(), BrainLifecycle::Idle);
        brain.start().await.unwrap();
        assert_eq!(brain.lifecycle(), BrainLifecycle::Running);
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let (brain, _registry) = make_brain();
        brain.start().await.unwrap();
        brain.stop().await.unwrap();
        brain.stop().await.unwrap();
        assert_eq!(brain.lifecycle(), BrainLifecycle::Stopped);
    }

    #[tokio::test]
    async fn destroy_rejects_subsequent_start() {
        let (brain, _registry) = make_brain();
        brain.destroy().await.unwrap();
        assert_eq!(brain.lifecycle(), BrainLifecycle::Destroyed);
        assert!(brain.start().await.is_err());
        brain.destroy().await.unwrap(); // idempotent
    }

    #[tokio::test]
    async fn explicit_chase_then_decision_events_flow() {
        let (brain, _registry) = make_brain();
        let mut events = brain.subscribe();
        brain.start().await.unwrap();
        brain
            .chase_target(Position::new(600.0, 500.0), TriggerOpts::default())
            .await
            .unwrap();

        let event = tokio::time::timeout(StdDuration::from_secs(2), events.recv()).await;
        assert!(event.is_ok());
    }

    #[tokio::test]
    async fn chase_then_resting_trigger_falls_back_to_wandering() {
        let (brain, _registry) = make_brain();
        brain.start().await.unwrap();
        brain
            .chase_target(Position::new(600.0, 500.0), TriggerOpts::default())
            .await
            .unwrap();
        // current_behavior is now Chasing; an explicit resting trigger
        // doesn't exist, but the decision path itself must never settle
        // directly on resting right after a chase — exercised at the
        // selection layer in catsim-core instead. Here we just confirm
        // the brain stays responsive to further triggers.
        brain.consume(Some(StdDuration::from_millis(5))).await.unwrap();
    }
}
