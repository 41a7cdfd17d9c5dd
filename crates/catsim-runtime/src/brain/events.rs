//! The Brain's own typed event bus, grounded in the same
//! `tokio::sync::broadcast` pattern as the Interaction Registry.

use uuid::Uuid;

use catsim_core::decision::BehaviorWeights;
use catsim_core::{BehaviorType, Motivation};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReactionKind {
    Need { id: Uuid },
    YarnMoving { id: Uuid },
    Laser,
    BoundaryHit,
}

#[derive(Clone, Debug)]
pub enum BrainEvent {
    /// Published only when the decision loop's chosen behavior differs
    /// from the one that was running.
    BehaviorChange { previous: BehaviorType, new_behavior: BehaviorType, motivation: Motivation },
    /// Published on every decision cycle, whether or not it changed
    /// the active behavior.
    DecisionMade { chosen: BehaviorType, weights: BehaviorWeights, motivation: Motivation },
    /// Published by the out-of-band reaction path when a stimulus's
    /// interest clears the configured threshold; does not by itself
    /// change the active behavior.
    ReactionTriggered { kind: ReactionKind, interest: f32 },
}
