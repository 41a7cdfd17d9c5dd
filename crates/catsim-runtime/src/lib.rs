//! catsim-runtime — the async agent runtime built on `catsim-core`'s
//! pure model: the Motion Controller contract, the Behavior Library,
//! the Behavior Orchestrator, the Interaction Registry, the Brain's
//! decision loop, and the Agent/Agent Registry glue that binds them
//! into one controllable actor per cat.

pub mod agent;
pub mod behavior;
pub mod brain;
pub mod error;
pub mod interaction_registry;
pub mod motion;
pub mod orchestrator;
pub mod persistence;
pub mod registry;
pub mod sim_motion;

pub use agent::{Agent, AgentMetadata};
pub use brain::{Brain, BrainConfig, BrainConfigBuilder, BrainEvent, BrainLifecycle, BrainOptions, ReactionKind, TriggerOpts};
pub use error::{MotionError, RuntimeError, RuntimeResult};
pub use interaction_registry::{InteractionEvent, InteractionRegistry, LaserRecord, YarnRecord};
pub use motion::{Easing, MotionController, MotionState, MoveOpts};
pub use orchestrator::BehaviorOrchestrator;
pub use persistence::{AgentBlob, PersistenceAdapter};
pub use registry::AgentRegistry;
