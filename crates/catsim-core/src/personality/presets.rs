//! The six fixed personality presets, each a hardcoded trait vector.

use super::Personality;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PersonalityPreset {
    Lazy,
    Playful,
    Curious,
    Aloof,
    Energetic,
    Balanced,
}

impl PersonalityPreset {
    pub const ALL: &'static [PersonalityPreset] = &[
        Self::Lazy,
        Self::Playful,
        Self::Curious,
        Self::Aloof,
        Self::Energetic,
        Self::Balanced,
    ];

    pub fn to_personality(self) -> Personality {
        match self {
            Self::Lazy => Personality {
                energy: 0.2,
                curiosity: 0.3,
                playfulness: 0.2,
                independence: 0.6,
                sociability: 0.4,
            },
            Self::Playful => Personality {
                energy: 0.8,
                curiosity: 0.6,
                playfulness: 0.9,
                independence: 0.3,
                sociability: 0.7,
            },
            Self::Curious => Personality {
                energy: 0.6,
                curiosity: 0.9,
                playfulness: 0.5,
                independence: 0.4,
                sociability: 0.5,
            },
            Self::Aloof => Personality {
                energy: 0.5,
                curiosity: 0.4,
                playfulness: 0.3,
                independence: 0.9,
                sociability: 0.2,
            },
            Self::Energetic => Personality {
                energy: 0.9,
                curiosity: 0.7,
                playfulness: 0.7,
                independence: 0.4,
                sociability: 0.6,
            },
            Self::Balanced => Personality {
                energy: 0.5,
                curiosity: 0.5,
                playfulness: 0.5,
                independence: 0.5,
                sociability: 0.5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for preset in PersonalityPreset::ALL {
            let p = preset.to_personality();
            for v in p.as_vector() {
                assert!((0.0..=1.0).contains(&v), "{preset:?} out of range: {v}");
            }
        }
    }

    #[test]
    fn lazy_has_low_energy_aloof_has_low_sociability() {
        assert!(PersonalityPreset::Lazy.to_personality().energy < 0.3);
        assert!(PersonalityPreset::Aloof.to_personality().sociability < 0.3);
    }
}
