//! Scores how appealing a stimulus is to a given agent right now.

use crate::behavior_type::BehaviorType;
use crate::motivation::Motivation;
use crate::personality::Personality;
use crate::stimulus::{NeedKind, Stimulus, YarnState};

/// `interest(target, personality, state, motivation, distance) -> [0,1]`.
///
/// State modifiers are applied last, after the kind-specific base and
/// scale — the variant adopted to resolve the source's ambiguous early-
/// return/late-modifier split (see DESIGN.md).
pub fn interest(
    target: &Stimulus,
    personality: &Personality,
    current: BehaviorType,
    motivation: &Motivation,
    distance: f64,
) -> f32 {
    if current == BehaviorType::Consuming {
        return 0.0;
    }

    let is_fancy_food = matches!(
        target,
        Stimulus::Need { kind: NeedKind::FoodFancy, .. }
    );

    let mut value = match target {
        Stimulus::Need { kind: NeedKind::FoodBasic, .. } => {
            let base = 0.5 + (1.0 - personality.energy) * 0.3;
            base * (1.0 - personality.independence * 0.3)
        }
        Stimulus::Need { kind: NeedKind::FoodFancy, .. } => {
            let base = 0.7 + personality.curiosity * 0.2;
            (base * (1.0 + personality.curiosity * 0.3)).clamp(0.0, 1.0)
        }
        Stimulus::Need { kind: NeedKind::Water, .. } => {
            let mut base = 0.3;
            if matches!(current, BehaviorType::Playing | BehaviorType::Exploring) {
                base += 0.3;
            }
            base += (1.0 - motivation.rest) * 0.2;
            base * (1.0 - personality.independence * 0.2)
        }
        Stimulus::Yarn { .. } | Stimulus::Laser { .. } => {
            let mut base = 0.5 + personality.curiosity * 0.3;
            if target.is_rolling_or_dragging() {
                base *= 1.5;
            }
            base += personality.energy * 0.2;
            base * (1.0 - personality.independence * 0.3)
        }
    };

    value = match current {
        BehaviorType::Resting => value * if is_fancy_food { 0.5 } else { 0.2 },
        BehaviorType::Playing => value * 0.6,
        BehaviorType::Approaching => value * 0.3,
        _ => value,
    };

    let distance_factor = 0.7 + 0.3 * (1.0 - distance / 500.0).max(0.0);
    value *= distance_factor as f32;

    value.clamp(0.0, 1.0)
}
