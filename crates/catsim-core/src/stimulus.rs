//! Stimulus data types. Placement, lookup and broadcast live in the
//! Interaction Registry (`catsim-runtime`); this crate only needs the
//! shape of a stimulus to score `interest` against it.

use crate::geometry::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NeedKind {
    FoodBasic,
    FoodFancy,
    Water,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum YarnState {
    Idle,
    Rolling,
    Dragging,
}

/// An externally placed object that can attract an agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stimulus {
    Need {
        kind: NeedKind,
        position: Position,
    },
    Yarn {
        position: Position,
        state: YarnState,
    },
    Laser {
        position: Position,
        active: bool,
    },
}

impl Stimulus {
    pub fn position(&self) -> Position {
        match self {
            Stimulus::Need { position, .. } => *position,
            Stimulus::Yarn { position, .. } => *position,
            Stimulus::Laser { position, .. } => *position,
        }
    }

    /// Laser is always treated as "rolling" for interest-scoring
    /// purposes, matching the stimulus-boost rule in the decision engine.
    pub fn is_rolling_or_dragging(&self) -> bool {
        match self {
            Stimulus::Yarn { state, .. } => {
                matches!(state, YarnState::Rolling | YarnState::Dragging)
            }
            Stimulus::Laser { .. } => true,
            Stimulus::Need { .. } => false,
        }
    }
}
