//! In-place mutation of rhythms and pitches.

use crate::bundle::MelodicEvent;
use crate::rng::RandomNumberGenerator;

pub const DEFAULT_RHYTHM_RATE: f64 = 0.1;
pub const DEFAULT_PITCH_RATE: f64 = 0.05;

/// Per-element mutation probabilities applied by the child builder.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationRates {
    pub rhythm: f64,
    pub pitch: f64,
}

impl MutationRates {
    pub fn new(rhythm: f64, pitch: f64) -> Self {
        Self { rhythm, pitch }
    }

    /// Rates that leave every child exactly as crossover produced it.
    pub fn none() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Default for MutationRates {
    fn default() -> Self {
        Self::new(DEFAULT_RHYTHM_RATE, DEFAULT_PITCH_RATE)
    }
}

/// Replaces each duration, with probability `rate`, by a uniform draw from `profile`.
///
/// An empty profile leaves the rhythm untouched.
pub fn mutate_rhythm(
    rhythm: &mut [f64],
    profile: &[f64],
    rate: f64,
    rng: &mut RandomNumberGenerator,
) {
    for duration in rhythm.iter_mut() {
        if rng.chance(rate) {
            if let Some(&replacement) = rng.choose(profile) {
                *duration = replacement;
            }
        }
    }
}

/// Re-pitches each note, with probability `rate`, by a uniform draw from `scale`.
///
/// Rests are skipped and draw nothing from `rng`.
pub fn mutate_pitch(
    melody: &mut [MelodicEvent],
    scale: &[u8],
    rate: f64,
    rng: &mut RandomNumberGenerator,
) {
    for event in melody.iter_mut() {
        match event {
            MelodicEvent::Note { pitch, .. } => {
                if rng.chance(rate) {
                    if let Some(&replacement) = rng.choose(scale) {
                        *pitch = replacement;
                    }
                }
            }
            MelodicEvent::Rest { .. } => {}
        }
    }
}
