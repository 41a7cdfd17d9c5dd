//! The closed set of behaviors an agent can perform.
//!
//! A tagged variant dispatched by the orchestrator, not a subclass
//! hierarchy — `BehaviorType` is the tag.

/// One of the nine named activities an agent can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BehaviorType {
    Wandering,
    Resting,
    Playing,
    Observing,
    Exploring,
    Approaching,
    Consuming,
    Chasing,
    Batting,
}

impl BehaviorType {
    /// All nine variants, in a stable order matching `BehaviorWeights`'
    /// backing array index.
    pub const ALL: [BehaviorType; 9] = [
        BehaviorType::Wandering,
        BehaviorType::Resting,
        BehaviorType::Playing,
        BehaviorType::Observing,
        BehaviorType::Exploring,
        BehaviorType::Approaching,
        BehaviorType::Consuming,
        BehaviorType::Chasing,
        BehaviorType::Batting,
    ];

    pub fn index(self) -> usize {
        match self {
            BehaviorType::Wandering => 0,
            BehaviorType::Resting => 1,
            BehaviorType::Playing => 2,
            BehaviorType::Observing => 3,
            BehaviorType::Exploring => 4,
            BehaviorType::Approaching => 5,
            BehaviorType::Consuming => 6,
            BehaviorType::Chasing => 7,
            BehaviorType::Batting => 8,
        }
    }

    /// `true` for behaviors selectable only via stimulus boosts or
    /// explicit triggers, never from base weights alone.
    pub fn is_reactive_only(self) -> bool {
        matches!(
            self,
            BehaviorType::Approaching
                | BehaviorType::Consuming
                | BehaviorType::Chasing
                | BehaviorType::Batting
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_unique_and_dense() {
        let mut seen = [false; 9];
        for b in BehaviorType::ALL {
            seen[b.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn reactive_only_matches_spec_set() {
        assert!(BehaviorType::Approaching.is_reactive_only());
        assert!(BehaviorType::Consuming.is_reactive_only());
        assert!(BehaviorType::Chasing.is_reactive_only());
        assert!(BehaviorType::Batting.is_reactive_only());
        assert!(!BehaviorType::Wandering.is_reactive_only());
        assert!(!BehaviorType::Resting.is_reactive_only());
    }
}
