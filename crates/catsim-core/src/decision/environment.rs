//! Snapshot of nearby stimuli the decision engine reasons about.
//!
//! The Interaction Registry lives in `catsim-runtime` and knows how to
//! find the nearest things; it hands the Brain a plain `Environment`
//! snapshot each decision so this crate stays free of any registry or
//! async dependency.

use crate::stimulus::Stimulus;

/// A stimulus paired with the agent's distance to it, as gathered by
/// the Brain ahead of one decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearbyStimulus {
    pub stimulus: Stimulus,
    pub distance: f64,
}

/// The nearest instance of each stimulus kind within its detection
/// radius, or `None` if nothing was found in range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Environment {
    pub nearest_need: Option<NearbyStimulus>,
    pub nearest_idle_yarn: Option<NearbyStimulus>,
    pub nearest_rolling_yarn: Option<NearbyStimulus>,
    pub active_laser: Option<NearbyStimulus>,
}
