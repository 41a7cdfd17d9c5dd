//! Behavior-weight scoring: personality + motivation + memory +
//! environment in, a non-negative weight per behavior out.

use crate::behavior_type::BehaviorType;
use crate::decision::environment::Environment;
use crate::memory::Memory;
use crate::motivation::Motivation;
use crate::personality::Personality;

/// One non-negative weight per `BehaviorType`, indexed by
/// `BehaviorType::index()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BehaviorWeights([f32; 9]);

impl BehaviorWeights {
    /// Constructs weights directly from a backing array, bypassing the
    /// personality/motivation formulas. Used by selection tests that
    /// need to force a specific weight distribution.
    pub fn from_array(values: [f32; 9]) -> Self {
        Self(values)
    }

    pub fn get(&self, tag: BehaviorType) -> f32 {
        self.0[tag.index()]
    }

    fn set(&mut self, tag: BehaviorType, value: f32) {
        self.0[tag.index()] = value;
    }

    fn add(&mut self, tag: BehaviorType, delta: f32) {
        self.0[tag.index()] += delta;
    }

    fn scale(&mut self, tag: BehaviorType, factor: f32) {
        self.0[tag.index()] *= factor;
    }

    pub fn iter(&self) -> impl Iterator<Item = (BehaviorType, f32)> + '_ {
        BehaviorType::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }
}

/// Base weights from personality and motivation alone, before memory
/// penalty, boundary aversion, or stimulus boosts. The four
/// stimulus-only behaviors (`Approaching, Consuming, Chasing, Batting`)
/// start at zero — §4.6 rule 6.
fn base_weights(personality: &Personality, motivation: &Motivation) -> BehaviorWeights {
    let mut w = BehaviorWeights([0.0; 9]);

    // Wandering: fixed floor, never depends on anything else.
    w.set(BehaviorType::Wandering, 0.5);

    // Resting: strictly decreasing in energy, strictly increasing in motivation.rest.
    w.set(
        BehaviorType::Resting,
        0.3 + (1.0 - personality.energy) * 1.0 + motivation.rest * 0.8,
    );

    // Playing: strictly increasing in playfulness, energy, and motivation.stimulation.
    w.set(
        BehaviorType::Playing,
        0.1 + personality.playfulness * 1.0 + personality.energy * 0.5 + motivation.stimulation * 0.8,
    );

    // Observing: increasing in curiosity, decreasing in energy.
    w.set(
        BehaviorType::Observing,
        0.1 + personality.curiosity * 0.6 + (1.0 - personality.energy) * 0.4,
    );

    // Exploring: strictly increasing in curiosity and motivation.exploration.
    w.set(
        BehaviorType::Exploring,
        0.1 + personality.curiosity * 1.0 + motivation.exploration * 0.8,
    );

    w
}

/// `computeWeights(personality, motivation, memory, environment) -> map`.
///
/// Applies, in order: base weights, memory penalty, boundary aversion,
/// stimulus boosts.
pub fn compute_weights(
    personality: &Personality,
    motivation: &Motivation,
    memory: &Memory,
    environment: &Environment,
) -> BehaviorWeights {
    let mut w = base_weights(personality, motivation);

    // Memory penalty: a behavior appearing k times in previous_behaviors
    // has its weight multiplied by max(0.2, 1 - 0.3k).
    for behavior in BehaviorType::ALL {
        let k = memory.occurrences_of(behavior);
        let penalty = (1.0 - 0.3 * k as f32).max(0.2);
        w.scale(behavior, penalty);
    }

    // Boundary aversion.
    if memory.boundary_hits >= 3.0 {
        w.scale(BehaviorType::Exploring, 0.5);
        w.scale(BehaviorType::Wandering, 0.5);
    }

    // Stimulus boosts. `interest` needs the agent's actual current
    // behavior for its state modifiers (§4.6); the most recent entry in
    // previous_behaviors is that behavior, since a decision always
    // records it before the next one's weights are computed.
    let current = memory.previous_behaviors.back().copied().unwrap_or(BehaviorType::Wandering);

    if let Some(need) = environment.nearest_need {
        if need.distance <= 150.0 {
            let i = crate::decision::interest::interest(
                &need.stimulus,
                personality,
                current,
                motivation,
                need.distance,
            );
            if i > 0.5 {
                w.add(BehaviorType::Approaching, 2.0 * i);
            }
        }
    }
    if let Some(yarn) = environment.nearest_idle_yarn {
        if yarn.distance <= 150.0 {
            let i = crate::decision::interest::interest(
                &yarn.stimulus,
                personality,
                current,
                motivation,
                yarn.distance,
            );
            if i > 0.5 {
                w.add(BehaviorType::Approaching, 1.5 * i);
            }
        }
    }
    if let Some(yarn) = environment.nearest_rolling_yarn {
        if yarn.distance <= 200.0 {
            let i = crate::decision::interest::interest(
                &yarn.stimulus,
                personality,
                current,
                motivation,
                yarn.distance,
            );
            if i > 0.5 {
                w.add(BehaviorType::Chasing, 2.5 * i);
            }
        }
    }
    if let Some(laser) = environment.active_laser {
        if laser.distance <= 250.0 {
            let i = crate::decision::interest::interest(
                &laser.stimulus,
                personality,
                current,
                motivation,
                laser.distance,
            );
            w.add(BehaviorType::Chasing, 3.0 * i);
        }
    }

    w
}
