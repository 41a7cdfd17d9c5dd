//! The Decision Engine: behavior-weight scoring, weighted selection,
//! and transition validation — the only component in this crate that
//! reasons about all of personality, motivation, memory, and
//! environment at once.

mod environment;
mod interest;
mod selection;
mod weights;

pub use environment::{Environment, NearbyStimulus};
pub use interest::interest;
pub use selection::{is_valid_transition, select_behavior, select_valid_behavior};
pub use weights::{compute_weights, BehaviorWeights};
