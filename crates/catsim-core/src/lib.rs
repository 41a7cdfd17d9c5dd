//! catsim-core — personality, motivation, memory, and the decision
//! engine for autonomous cat-like agents.
//!
//! This crate is deliberately free of async and of any process-wide
//! shared state: it is the pure model a `Brain` in `catsim-runtime`
//! drives on each decision. Everything here is plain data and pure
//! functions over that data, so it can be tested and reasoned about
//! without a runtime.

pub mod behavior_type;
pub mod decision;
pub mod error;
pub mod geometry;
pub mod memory;
pub mod motivation;
pub mod personality;
pub mod stimulus;

pub use behavior_type::BehaviorType;
pub use error::{CoreError, CoreResult};
pub use geometry::{Boundaries, Position};
pub use memory::{Memory, MemoryBounds};
pub use motivation::{DecayRates, Motivation, MotivationPatch};
pub use personality::{Personality, PersonalityInput, PersonalityPreset, PersonalityRegistry};
pub use stimulus::{NeedKind, Stimulus, YarnState};
