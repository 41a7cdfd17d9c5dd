//! Immutable personality traits and the registry of fixed presets.
//!
//! # Invariants
//!
//! - **I-PERS-001**: all five traits are finite and in `[0,1]`.
//! - **I-PERS-002**: `Personality` is `Copy` — every accessor returns an
//!   owned value, callers can never mutate a shared preset.

mod presets;

pub use presets::PersonalityPreset;

use crate::error::{CoreError, CoreResult};

/// Five traits in `[0,1]` that modulate behavior weights and interest
/// scoring. Immutable after construction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Personality {
    pub energy: f32,
    pub curiosity: f32,
    pub playfulness: f32,
    pub independence: f32,
    pub sociability: f32,
}

fn validate_trait(name: &str, value: f32) -> CoreResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(CoreError::InvalidPersonality(format!(
            "{name} must be finite and in [0,1], got {value}"
        )));
    }
    Ok(())
}

impl Personality {
    /// Validates and constructs a custom personality from a five-element
    /// vector `[energy, curiosity, playfulness, independence, sociability]`.
    pub fn from_vector(v: [f32; 5]) -> CoreResult<Self> {
        validate_trait("energy", v[0])?;
        validate_trait("curiosity", v[1])?;
        validate_trait("playfulness", v[2])?;
        validate_trait("independence", v[3])?;
        validate_trait("sociability", v[4])?;
        Ok(Self {
            energy: v[0],
            curiosity: v[1],
            playfulness: v[2],
            independence: v[3],
            sociability: v[4],
        })
    }

    pub fn as_vector(&self) -> [f32; 5] {
        [
            self.energy,
            self.curiosity,
            self.playfulness,
            self.independence,
            self.sociability,
        ]
    }
}

/// Stateless lookup for the fixed personality presets. Every accessor
/// returns a fresh owned copy, never a shared reference, since
/// `Personality` is `Copy`.
pub struct PersonalityRegistry;

impl PersonalityRegistry {
    pub fn get_preset(preset: PersonalityPreset) -> Personality {
        preset.to_personality()
    }

    pub fn list_presets() -> &'static [PersonalityPreset] {
        PersonalityPreset::ALL
    }

    pub fn validate(vector: &[f32; 5]) -> CoreResult<()> {
        Personality::from_vector(*vector).map(|_| ())
    }

    /// String preset name or validated custom vector, both return an
    /// owned `Personality`.
    pub fn resolve(input: PersonalityInput) -> CoreResult<Personality> {
        match input {
            PersonalityInput::Preset(p) => Ok(p.to_personality()),
            PersonalityInput::Custom(v) => Personality::from_vector(v),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum PersonalityInput {
    Preset(PersonalityPreset),
    Custom([f32; 5]),
}
