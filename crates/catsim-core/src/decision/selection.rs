//! Weighted-random behavior selection and transition validation.
//!
//! Modeled after the workspace's priority-ordered conflict resolver:
//! a pure function returning a decision plus the bookkeeping the caller
//! needs, no hidden state.

use rand::Rng;

use crate::behavior_type::BehaviorType;
use crate::decision::weights::BehaviorWeights;

/// Weighted-random sampling over an ordered slice of `(tag, weight)`
/// pairs, O(n) in the number of behaviors. The `Wandering` floor
/// guarantees `weights.sum() > 0`.
pub fn select_behavior(weights: &BehaviorWeights, rng: &mut impl Rng) -> BehaviorType {
    let total: f32 = weights.sum();
    debug_assert!(total > 0.0, "weight sum must be positive — wandering floor violated");

    let mut draw = rng.gen_range(0.0..total);
    for (tag, weight) in weights.iter() {
        if draw < weight {
            return tag;
        }
        draw -= weight;
    }

    // Floating-point edge case at the very end of the range: fall back
    // to the last non-zero-weight behavior rather than panicking.
    weights
        .iter()
        .rev()
        .find(|&(_, w)| w > 0.0)
        .map(|(tag, _)| tag)
        .unwrap_or(BehaviorType::Wandering)
}

/// `isValidTransition(from, to) -> bool`.
pub fn is_valid_transition(from: BehaviorType, to: BehaviorType) -> bool {
    use BehaviorType::*;

    if to == Wandering {
        return true;
    }
    match (from, to) {
        (Consuming, Consuming) => false,
        // Chasing must pass through wandering before resting; direct
        // chasing -> resting is rejected for one decision cycle.
        (Chasing, Resting) => false,
        (Observing, Wandering) | (Observing, Exploring) => true,
        _ => true,
    }
}

/// Runs selection, then falls back to `Wandering` if the result isn't a
/// valid transition from `prev`.
pub fn select_valid_behavior(
    weights: &BehaviorWeights,
    prev: BehaviorType,
    rng: &mut impl Rng,
) -> BehaviorType {
    let selected = select_behavior(weights, rng);
    if is_valid_transition(prev, selected) {
        selected
    } else {
        BehaviorType::Wandering
    }
}
