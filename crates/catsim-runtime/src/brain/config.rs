//! `BrainConfig`: the immutable, validated configuration a `Brain`
//! reads from; built through `BrainConfigBuilder` the same way
//! `Personality` is built through `Personality::from_vector` —
//! validated once at construction, never partially applied.

use catsim_core::{CoreError, DecayRates, MemoryBounds};

use crate::error::{RuntimeError, RuntimeResult};

/// Detection radii per stimulus kind (§4.6 rules 3-5), in surface units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionRadii {
    pub need: f64,
    pub yarn_idle: f64,
    pub yarn_moving: f64,
    pub laser: f64,
}

impl Default for DetectionRadii {
    fn default() -> Self {
        Self { need: 150.0, yarn_idle: 150.0, yarn_moving: 200.0, laser: 250.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BrainConfig {
    /// `[min, max]` milliseconds between decisions.
    pub decision_interval: (u64, u64),
    pub motivation_decay: DecayRates,
    pub memory_bounds: MemoryBounds,
    pub detection: DetectionRadii,
    /// Minimum `interest` an out-of-band stimulus needs to fire a
    /// `ReactionTriggered` event.
    pub reaction_threshold: f32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            decision_interval: (2_000, 5_000),
            motivation_decay: DecayRates::default(),
            memory_bounds: MemoryBounds::default(),
            detection: DetectionRadii::default(),
            reaction_threshold: 0.6,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BrainConfigBuilder {
    decision_interval: Option<(u64, u64)>,
    motivation_decay: Option<DecayRates>,
    memory_bounds: Option<MemoryBounds>,
    detection: Option<DetectionRadii>,
    reaction_threshold: Option<f32>,
}

impl BrainConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decision_interval(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.decision_interval = Some((min_ms, max_ms));
        self
    }

    pub fn motivation_decay(mut self, rates: DecayRates) -> Self {
        self.motivation_decay = Some(rates);
        self
    }

    pub fn memory_bounds(mut self, bounds: MemoryBounds) -> Self {
        self.memory_bounds = Some(bounds);
        self
    }

    pub fn detection(mut self, radii: DetectionRadii) -> Self {
        self.detection = Some(radii);
        self
    }

    pub fn reaction_threshold(mut self, threshold: f32) -> Self {
        self.reaction_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> RuntimeResult<BrainConfig> {
        let defaults = BrainConfig::default();
        let config = BrainConfig {
            decision_interval: self.decision_interval.unwrap_or(defaults.decision_interval),
            motivation_decay: self.motivation_decay.unwrap_or(defaults.motivation_decay),
            memory_bounds: self.memory_bounds.unwrap_or(defaults.memory_bounds),
            detection: self.detection.unwrap_or(defaults.detection),
            reaction_threshold: self.reaction_threshold.unwrap_or(defaults.reaction_threshold),
        };

        let (min, max) = config.decision_interval;
        if min == 0 || min > max {
            return Err(RuntimeError::Core(CoreError::InvalidConfiguration(
                "decision_interval requires 0 < min <= max".into(),
            )));
        }
        if config.motivation_decay.rest < 0.0
            || config.motivation_decay.stimulation < 0.0
            || config.motivation_decay.exploration < 0.0
        {
            return Err(RuntimeError::Core(CoreError::InvalidConfiguration(
                "motivation decay rates must be non-negative".into(),
            )));
        }
        if config.memory_bounds.max_visited == 0 || config.memory_bounds.max_previous_behaviors == 0 {
            return Err(RuntimeError::Core(CoreError::InvalidConfiguration(
                "memory bounds must be at least 1".into(),
            )));
        }
        if !(0.0..=1.0).contains(&config.reaction_threshold) {
            return Err(RuntimeError::Core(CoreError::InvalidConfiguration(
                "reaction_threshold must be in [0,1]".into(),
            )));
        }

        Ok(config)
    }
}
